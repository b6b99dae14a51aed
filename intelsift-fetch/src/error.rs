//! Lookup error types.

use thiserror::Error;

// ============================================================================
// Lookup Error
// ============================================================================

/// Error type for lookup operations.
///
/// Endpoint-level failures are non-fatal: the pipeline classifies them via
/// [`LookupError::class`] and falls through to the next endpoint, except for
/// auth rejections which terminate the chain for the current subject.
#[derive(Debug, Error)]
pub enum LookupError {
    /// HTTP request failed (connection, TLS, or timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider rejected the API key.
    #[error("API key rejected: {0}")]
    AuthRejected(String),

    /// Response body is not parsable or lacks required fields.
    #[error("Invalid response: {0}")]
    Format(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Core model error.
    #[error("Core error: {0}")]
    Core(#[from] intelsift_core::CoreError),

    /// Well-formed response explicitly carrying no intelligence.
    #[error("No intelligence in response")]
    Empty,

    /// Every endpoint in the chain was tried without success.
    ///
    /// This is a normal, expected outcome, distinct from a transport
    /// failure; callers should treat it as "no result".
    #[error("All endpoints exhausted")]
    Exhausted,

    /// The pipeline was built without any endpoints.
    #[error("No endpoints configured")]
    NoEndpoints,
}

impl LookupError {
    /// Classifies this error into the attempt-outcome taxonomy.
    pub fn class(&self) -> AttemptClass {
        match self {
            Self::Http(_) => AttemptClass::Transport,
            Self::AuthRejected(_) => AttemptClass::Auth,
            Self::Format(_) | Self::Json(_) | Self::Core(_) => AttemptClass::Format,
            Self::Empty | Self::Exhausted | Self::NoEndpoints => AttemptClass::Empty,
        }
    }
}

// ============================================================================
// Attempt Class
// ============================================================================

/// Outcome class of a failed query attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptClass {
    /// Connection or timeout failure reaching the provider.
    Transport,
    /// Provider rejected the API key.
    Auth,
    /// Response was unparsable or missing required fields.
    Format,
    /// Well-formed response carrying no intelligence.
    Empty,
}

impl AttemptClass {
    /// Returns a short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Auth => "auth",
            Self::Format => "format",
            Self::Empty => "empty",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(
            LookupError::AuthRejected("bad key".to_string()).class(),
            AttemptClass::Auth
        );
        assert_eq!(
            LookupError::Format("missing field".to_string()).class(),
            AttemptClass::Format
        );
        assert_eq!(LookupError::Empty.class(), AttemptClass::Empty);
    }

    #[test]
    fn test_labels() {
        assert_eq!(AttemptClass::Transport.label(), "transport");
        assert_eq!(AttemptClass::Auth.label(), "auth");
    }
}
