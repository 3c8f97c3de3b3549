//! Classification Module
//!
//! Scores assessment answers per axis and maps the aggregate score to a
//! skill tier through a fixed threshold table.

pub mod classifier;
pub mod scoring;
pub mod tier;

pub use classifier::*;
pub use scoring::*;
pub use tier::*;
