//! Lookup strategy trait and types.
//!
//! A strategy represents one remote endpoint for a query kind. The ordered
//! endpoints for a kind form the fallback chain executed by the pipeline.

use async_trait::async_trait;
use intelsift_core::{IntelRecord, QueryKind, Subject};

use crate::context::LookupContext;
use crate::error::LookupError;

// ============================================================================
// Lookup Result
// ============================================================================

/// The result of a successful endpoint lookup.
///
/// A successful lookup always carries at least one record; strategies report
/// [`LookupError::Empty`] instead of an empty record list.
#[derive(Debug, Clone)]
pub struct LookupResult {
    /// The normalized records produced by the endpoint.
    pub records: Vec<IntelRecord>,
    /// The endpoint that produced them.
    pub endpoint_id: String,
    /// The query kind.
    pub kind: QueryKind,
}

impl LookupResult {
    /// Creates a new lookup result.
    pub fn new(
        records: Vec<IntelRecord>,
        endpoint_id: impl Into<String>,
        kind: QueryKind,
    ) -> Self {
        Self {
            records,
            endpoint_id: endpoint_id.into(),
            kind,
        }
    }
}

// ============================================================================
// Lookup Strategy Trait
// ============================================================================

/// One candidate remote endpoint for a query kind.
///
/// ## Implementing a Strategy
///
/// ```ignore
/// struct IpApiStrategy;
///
/// #[async_trait]
/// impl LookupStrategy for IpApiStrategy {
///     fn id(&self) -> &str {
///         "ip-api.com"
///     }
///
///     fn query_kind(&self) -> QueryKind {
///         QueryKind::Geolocation
///     }
///
///     async fn lookup(
///         &self,
///         ctx: &LookupContext,
///         subject: &Subject,
///     ) -> Result<LookupResult, LookupError> {
///         let response = ctx.http.get(&self.url_for(subject)).await?;
///         // Normalize the body and return a LookupResult
///     }
/// }
/// ```
#[async_trait]
pub trait LookupStrategy: Send + Sync {
    /// Unique identifier for this endpoint (e.g. "ip-api.com").
    fn id(&self) -> &str;

    /// The query kind this endpoint serves.
    fn query_kind(&self) -> QueryKind;

    /// Issues the request and normalizes the response.
    ///
    /// Returns a [`LookupResult`] with at least one record on success, or a
    /// [`LookupError`] classifying the failure.
    async fn lookup(
        &self,
        ctx: &LookupContext,
        subject: &Subject,
    ) -> Result<LookupResult, LookupError>;

    /// Whether the pipeline should advance to the next endpoint after this
    /// error.
    ///
    /// Transport, format, and empty outcomes fall through; an auth rejection
    /// terminates the chain for the current subject.
    fn should_fallback(&self, error: &LookupError) -> bool {
        !matches!(error, LookupError::AuthRejected(_))
    }

    /// Priority of this endpoint (higher = tried first).
    fn priority(&self) -> u32 {
        50
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use intelsift_core::CanonicalRecord;

    struct NullStrategy;

    #[async_trait]
    impl LookupStrategy for NullStrategy {
        fn id(&self) -> &str {
            "null"
        }

        fn query_kind(&self) -> QueryKind {
            QueryKind::Geolocation
        }

        async fn lookup(
            &self,
            _ctx: &LookupContext,
            _subject: &Subject,
        ) -> Result<LookupResult, LookupError> {
            Err(LookupError::Empty)
        }
    }

    #[test]
    fn test_default_fallback_policy() {
        let s = NullStrategy;
        assert!(s.should_fallback(&LookupError::Empty));
        assert!(s.should_fallback(&LookupError::Format("bad".to_string())));
        assert!(!s.should_fallback(&LookupError::AuthRejected("402".to_string())));
    }

    #[test]
    fn test_result_new() {
        let record = CanonicalRecord::new("ip-api.com", "1.1.1.1");
        let result = LookupResult::new(
            vec![record.into()],
            "ip-api.com",
            QueryKind::Geolocation,
        );
        assert_eq!(result.endpoint_id, "ip-api.com");
        assert_eq!(result.records.len(), 1);
    }
}
