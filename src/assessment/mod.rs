//! Assessment Module
//!
//! Typed questionnaire answers and the JSON boundary that validates them.

pub mod answers;
pub mod response;

pub use answers::*;
pub use response::*;
