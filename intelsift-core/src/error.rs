//! Core error types for intelsift.

use thiserror::Error;

/// Core error type for intelsift operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A record was constructed from invalid parts.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// A subject string could not be interpreted.
    #[error("Invalid subject: {0}")]
    InvalidSubject(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
