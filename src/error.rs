//! Error types for candidate tiering
//!
//! Provides structured error types for assessment validation, scoring
//! configuration, and the candidate registry.

use thiserror::Error;

/// Unified error type for the crate
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Internal Errors
    // =========================================================================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation failed for {field}: {message}")]
    Validation { field: String, message: String },

    // =========================================================================
    // Registry Errors
    // =========================================================================
    #[error("Candidate not found: {id}")]
    CandidateNotFound { id: String },

    #[error("A candidate with email {email} already exists")]
    CandidateExists { email: String },

    #[error("No candidates found for export")]
    NoCandidatesToExport,

    // =========================================================================
    // Parse Errors
    // =========================================================================
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a field validation failure
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// HTTP status a request handler should answer with for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation { .. } | Error::JsonParse(_) => 400,
            Error::CandidateNotFound { .. } | Error::NoCandidatesToExport => 404,
            Error::CandidateExists { .. } => 409,
            Error::Internal(_)
            | Error::Configuration(_)
            | Error::YamlParse(_)
            | Error::Io(_) => 500,
        }
    }

    /// Check if the caller is at fault
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// Check if this is a validation failure
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }
}

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, Error>;
