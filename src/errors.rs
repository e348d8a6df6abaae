//! Error types for CourseBuddy
//!
//! One error enum for the whole library. Snapshot and image failures are
//! recovered where they happen and never reach this type's callers.

use thiserror::Error;

/// Main error type for the CourseBuddy assistant
#[derive(Error, Debug)]
pub enum AssistantError {
    /// Document kind outside the closed set
    #[error("Unrecognized document kind: {0}")]
    UnknownKind(String),

    /// Document kind declared inside the wrong snapshot group
    #[error("Document kind {declared} does not belong in the {group} group")]
    KindMismatch { declared: String, group: String },

    /// Ranking or composition failed unexpectedly
    #[error("{0}")]
    Processing(String),

    /// Request took longer than the allowed budget
    #[error("Request timed out after {duration_ms}ms (budget {budget_ms}ms)")]
    Timeout { duration_ms: u64, budget_ms: u64 },

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic errors with context
    #[error("Assistant error: {0}")]
    Generic(String),
}

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, AssistantError>;

impl AssistantError {
    /// True for the advisory post-hoc timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, AssistantError::Timeout { .. })
    }
}

/// Convert anyhow errors to AssistantError
impl From<anyhow::Error> for AssistantError {
    fn from(err: anyhow::Error) -> Self {
        AssistantError::Generic(err.to_string())
    }
}
