//! Candidate Tiering
//!
//! Deterministic skill-tier classification for candidate assessments, plus
//! the candidate registry that stores the assigned tiers.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                     Candidate Registry                        │
//! │   register / update / recompute / list / stats / export       │
//! ├───────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────┐        ┌──────────────────────────┐  │
//! │  │  Assessment Input   │ ─────▶ │     Tier Classifier      │  │
//! │  │  (strict JSON,      │        │  weights → score →       │  │
//! │  │   answer arrays)    │        │  thresholds + gates      │  │
//! │  └─────────────────────┘        └──────────────────────────┘  │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`assessment`]: Typed questionnaire answers and input validation
//! - [`classification`]: Scoring table, tiers, and the classifier
//! - [`candidate`]: Candidate records and the in-memory registry
//! - [`error`]: Error types and handling

pub mod assessment;
pub mod candidate;
pub mod classification;
pub mod error;

// Re-export commonly used types
pub use assessment::{
    parse_responses, AnswerItem, AssessmentResponse, CapabilityAxis, ExperienceLevel,
    KnowledgeAxis,
};

pub use candidate::{
    Candidate, CandidateId, CandidateInput, CandidatePage, CandidateQuery, CandidateRegistry,
    CandidateStats, CandidateUpdate, ExportFilter, RegistryEvent, SortField, SortOrder,
};

pub use classification::{
    classify, ScoringConfig, SkillTier, TierClassification, TierClassifier, TierInfo,
    TierThreshold,
};

pub use error::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
