//! Fallback pipeline for executing endpoint strategies in order.
//!
//! The pipeline walks the endpoint chain for one subject strictly in
//! priority order, stopping at the first endpoint that yields usable
//! records. The first responsive, well-formed source wins; later endpoints
//! are never consulted even if they might return richer data.

use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use intelsift_core::{IntelRecord, QueryKind, Subject};

use crate::context::LookupContext;
use crate::error::{AttemptClass, LookupError};
use crate::strategy::{LookupResult, LookupStrategy};

// ============================================================================
// Lookup Attempt
// ============================================================================

/// Record of a single query attempt.
///
/// Attempts are ephemeral: created per endpoint call and folded into the
/// outcome for diagnostics.
#[derive(Debug, Clone)]
pub struct LookupAttempt {
    /// The endpoint that was attempted.
    pub endpoint_id: String,
    /// The query kind.
    pub kind: QueryKind,
    /// Whether the attempt produced records.
    pub success: bool,
    /// Outcome class if the attempt failed.
    pub class: Option<AttemptClass>,
    /// Error text if the attempt failed.
    pub error: Option<String>,
    /// How long the attempt took.
    pub duration: Duration,
}

impl LookupAttempt {
    /// Creates a successful attempt record.
    pub fn success(endpoint_id: impl Into<String>, kind: QueryKind, duration: Duration) -> Self {
        Self {
            endpoint_id: endpoint_id.into(),
            kind,
            success: true,
            class: None,
            error: None,
            duration,
        }
    }

    /// Creates a failed attempt record.
    pub fn failure(
        endpoint_id: impl Into<String>,
        kind: QueryKind,
        error: &LookupError,
        duration: Duration,
    ) -> Self {
        Self {
            endpoint_id: endpoint_id.into(),
            kind,
            success: false,
            class: Some(error.class()),
            error: Some(error.to_string()),
            duration,
        }
    }
}

// ============================================================================
// Lookup Outcome
// ============================================================================

/// The outcome of a pipeline execution for one subject.
#[derive(Debug)]
pub struct LookupOutcome {
    /// The result (success, exhaustion, or a chain-terminating error).
    pub result: Result<LookupResult, LookupError>,
    /// All attempts made, in chain order.
    pub attempts: Vec<LookupAttempt>,
    /// Total duration of all attempts.
    pub duration: Duration,
}

impl LookupOutcome {
    /// Returns true if some endpoint yielded records.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Returns true if every endpoint was tried without success.
    ///
    /// Exhaustion is a normal outcome — absence of intelligence, not a
    /// failure.
    pub fn is_exhausted(&self) -> bool {
        matches!(self.result, Err(LookupError::Exhausted))
    }

    /// Returns the records if the lookup succeeded.
    pub fn records(&self) -> Option<&[IntelRecord]> {
        self.result.as_ref().ok().map(|r| r.records.as_slice())
    }

    /// Returns the number of endpoints that were tried.
    pub fn attempts_count(&self) -> usize {
        self.attempts.len()
    }

    /// Returns the successful endpoint ID, if any.
    pub fn successful_endpoint(&self) -> Option<&str> {
        self.result.as_ref().ok().map(|r| r.endpoint_id.as_str())
    }
}

// ============================================================================
// Lookup Pipeline
// ============================================================================

/// An ordered chain of endpoint strategies for one query kind.
///
/// Retry policy is "try the next different endpoint", never "retry the same
/// endpoint": no endpoint is called twice within one execution.
pub struct LookupPipeline {
    strategies: Vec<Box<dyn LookupStrategy>>,
}

impl LookupPipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Creates a pipeline with the given strategies.
    pub fn with_strategies(strategies: Vec<Box<dyn LookupStrategy>>) -> Self {
        let mut pipeline = Self { strategies };
        pipeline.sort_by_priority();
        pipeline
    }

    /// Adds a strategy to the pipeline.
    pub fn add_strategy(&mut self, strategy: Box<dyn LookupStrategy>) {
        self.strategies.push(strategy);
        self.sort_by_priority();
    }

    /// Sorts strategies by priority (highest first).
    fn sort_by_priority(&mut self) {
        self.strategies.sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    /// Returns the number of endpoints in the chain.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Returns true if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Returns the endpoint IDs in chain order.
    pub fn endpoint_ids(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.id()).collect()
    }

    /// Executes the chain, trying endpoints in order until one succeeds.
    #[instrument(skip(self, ctx), fields(subject = %subject, endpoints = self.strategies.len()))]
    pub async fn execute(&self, ctx: &LookupContext, subject: &Subject) -> LookupOutcome {
        let start = Instant::now();
        let mut attempts = Vec::new();

        if self.strategies.is_empty() {
            return LookupOutcome {
                result: Err(LookupError::NoEndpoints),
                attempts,
                duration: start.elapsed(),
            };
        }

        info!(count = self.strategies.len(), "Executing lookup chain");

        for strategy in &self.strategies {
            let endpoint_id = strategy.id();
            let kind = strategy.query_kind();
            let attempt_start = Instant::now();

            debug!(endpoint = %endpoint_id, "Trying endpoint");

            match strategy.lookup(ctx, subject).await {
                Ok(result) => {
                    let duration = attempt_start.elapsed();
                    info!(
                        endpoint = %endpoint_id,
                        records = result.records.len(),
                        duration = ?duration,
                        "Endpoint succeeded"
                    );

                    attempts.push(LookupAttempt::success(endpoint_id, kind, duration));

                    return LookupOutcome {
                        result: Ok(result),
                        attempts,
                        duration: start.elapsed(),
                    };
                }
                Err(error) => {
                    let duration = attempt_start.elapsed();
                    warn!(
                        endpoint = %endpoint_id,
                        class = error.class().label(),
                        error = %error,
                        duration = ?duration,
                        "Endpoint failed"
                    );

                    attempts.push(LookupAttempt::failure(endpoint_id, kind, &error, duration));

                    if !strategy.should_fallback(&error) {
                        debug!(endpoint = %endpoint_id, "Endpoint terminates chain");
                        return LookupOutcome {
                            result: Err(error),
                            attempts,
                            duration: start.elapsed(),
                        };
                    }
                }
            }
        }

        // Absence of intelligence is a normal outcome, not an error.
        info!(subject = %subject, "Chain exhausted, no result");
        LookupOutcome {
            result: Err(LookupError::Exhausted),
            attempts,
            duration: start.elapsed(),
        }
    }
}

impl Default for LookupPipeline {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use intelsift_core::CanonicalRecord;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct RecordingStrategy {
        id: String,
        priority: u32,
        calls: Arc<AtomicUsize>,
        outcome: fn() -> Result<(), LookupError>,
    }

    impl RecordingStrategy {
        fn succeeding(id: &str, priority: u32, calls: Arc<AtomicUsize>) -> Self {
            Self {
                id: id.to_string(),
                priority,
                calls,
                outcome: || Ok(()),
            }
        }

        fn failing(
            id: &str,
            priority: u32,
            calls: Arc<AtomicUsize>,
            outcome: fn() -> Result<(), LookupError>,
        ) -> Self {
            Self {
                id: id.to_string(),
                priority,
                calls,
                outcome,
            }
        }
    }

    #[async_trait]
    impl LookupStrategy for RecordingStrategy {
        fn id(&self) -> &str {
            &self.id
        }

        fn query_kind(&self) -> QueryKind {
            QueryKind::Geolocation
        }

        async fn lookup(
            &self,
            _ctx: &LookupContext,
            subject: &Subject,
        ) -> Result<LookupResult, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.outcome)()?;
            let record = CanonicalRecord::new(self.id.clone(), subject.as_str());
            Ok(LookupResult::new(
                vec![record.into()],
                self.id.clone(),
                QueryKind::Geolocation,
            ))
        }

        fn priority(&self) -> u32 {
            self.priority
        }
    }

    fn test_subject() -> Subject {
        Subject::ip("8.8.8.8")
    }

    #[tokio::test]
    async fn test_empty_pipeline() {
        let pipeline = LookupPipeline::new();
        let ctx = LookupContext::new().unwrap();
        let outcome = pipeline.execute(&ctx, &test_subject()).await;

        assert!(!outcome.is_success());
        assert!(matches!(outcome.result, Err(LookupError::NoEndpoints)));
    }

    #[tokio::test]
    async fn test_first_success_stops_chain() {
        let first_calls = Arc::new(AtomicUsize::new(0));
        let second_calls = Arc::new(AtomicUsize::new(0));
        let pipeline = LookupPipeline::with_strategies(vec![
            Box::new(RecordingStrategy::succeeding("first", 100, first_calls.clone())),
            Box::new(RecordingStrategy::succeeding("second", 50, second_calls.clone())),
        ]);

        let ctx = LookupContext::new().unwrap();
        let outcome = pipeline.execute(&ctx, &test_subject()).await;

        assert!(outcome.is_success());
        assert_eq!(outcome.attempts_count(), 1);
        assert_eq!(outcome.successful_endpoint(), Some("first"));
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fallback_reaches_later_endpoint() {
        let calls = Arc::new(AtomicUsize::new(0));
        let pipeline = LookupPipeline::with_strategies(vec![
            Box::new(RecordingStrategy::failing("down", 100, calls.clone(), || {
                Err(LookupError::Format("not json".to_string()))
            })),
            Box::new(RecordingStrategy::failing("empty", 80, calls.clone(), || {
                Err(LookupError::Empty)
            })),
            Box::new(RecordingStrategy::succeeding("up", 60, calls.clone())),
        ]);

        let ctx = LookupContext::new().unwrap();
        let outcome = pipeline.execute(&ctx, &test_subject()).await;

        assert!(outcome.is_success());
        assert_eq!(outcome.attempts_count(), 3);
        assert_eq!(outcome.successful_endpoint(), Some("up"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(outcome.attempts[0].class, Some(AttemptClass::Format));
        assert_eq!(outcome.attempts[1].class, Some(AttemptClass::Empty));
    }

    #[tokio::test]
    async fn test_exhaustion_is_no_result_not_error() {
        let calls = Arc::new(AtomicUsize::new(0));
        let pipeline = LookupPipeline::with_strategies(vec![
            Box::new(RecordingStrategy::failing("a", 100, calls.clone(), || {
                Err(LookupError::Empty)
            })),
            Box::new(RecordingStrategy::failing("b", 50, calls.clone(), || {
                Err(LookupError::Format("garbage".to_string()))
            })),
        ]);

        let ctx = LookupContext::new().unwrap();
        let outcome = pipeline.execute(&ctx, &test_subject()).await;

        assert!(!outcome.is_success());
        assert!(outcome.is_exhausted());
        assert!(outcome.records().is_none());
        assert_eq!(outcome.attempts_count(), 2);
    }

    #[tokio::test]
    async fn test_auth_rejection_terminates_chain() {
        let later_calls = Arc::new(AtomicUsize::new(0));
        let pipeline = LookupPipeline::with_strategies(vec![
            Box::new(RecordingStrategy::failing(
                "auth",
                100,
                Arc::new(AtomicUsize::new(0)),
                || Err(LookupError::AuthRejected("invalid key".to_string())),
            )),
            Box::new(RecordingStrategy::succeeding("later", 50, later_calls.clone())),
        ]);

        let ctx = LookupContext::new().unwrap();
        let outcome = pipeline.execute(&ctx, &test_subject()).await;

        assert!(!outcome.is_success());
        assert!(!outcome.is_exhausted());
        assert!(matches!(outcome.result, Err(LookupError::AuthRejected(_))));
        assert_eq!(outcome.attempts_count(), 1);
        assert_eq!(later_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_priority_order() {
        let calls = Arc::new(AtomicUsize::new(0));
        // Added out of order; priorities must decide the chain order.
        let pipeline = LookupPipeline::with_strategies(vec![
            Box::new(RecordingStrategy::succeeding("low", 10, calls.clone())),
            Box::new(RecordingStrategy::succeeding("high", 90, calls.clone())),
        ]);

        assert_eq!(pipeline.endpoint_ids(), vec!["high", "low"]);
    }
}
