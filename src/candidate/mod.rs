//! Candidate Module
//!
//! Candidate registration, the in-memory registry that stores assigned
//! tiers, and the listing, statistics and export views over it.

pub mod events;
pub mod export;
pub mod query;
pub mod record;
pub mod registry;
pub mod stats;
pub mod validation;

pub use events::*;
pub use export::*;
pub use query::*;
pub use record::*;
pub use registry::*;
pub use stats::*;
