//! Two-phase submit/poll state machine.

use intelsift_core::CanonicalRecord;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::parser::{parse_poll, parse_submit};
use super::transport::SearchTransport;

/// HTTP status the service uses to signal an invalid API key.
const PAYMENT_REQUIRED: u16 = 402;

// ============================================================================
// Search Token
// ============================================================================

/// Opaque identifier issued by the submit step.
///
/// Valid for exactly one poll call; no expiry is modeled — the protocol
/// assumes the result is ready after the settling delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchToken(String);

impl SearchToken {
    /// Wraps a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Search State
// ============================================================================

/// Terminal states of one phonebook search.
///
/// The three failure states are distinct so diagnostics can tell which
/// phase broke; none of them aborts a batch.
#[derive(Debug)]
pub enum SearchState {
    /// Poll returned a selectors collection (possibly empty).
    Ready(Vec<CanonicalRecord>),
    /// The service rejected the API key at either phase.
    AuthFailed,
    /// Submit failed (bad status or unparsable body).
    SubmitFailed(String),
    /// Poll failed (bad status or unparsable body).
    PollFailed(String),
}

impl SearchState {
    /// Returns the records if the search completed.
    pub fn records(&self) -> Option<&[CanonicalRecord]> {
        match self {
            Self::Ready(records) => Some(records),
            _ => None,
        }
    }

    /// Returns true if the search completed successfully.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Returns a short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ready(_) => "ready",
            Self::AuthFailed => "auth_failed",
            Self::SubmitFailed(_) => "submit_failed",
            Self::PollFailed(_) => "poll_failed",
        }
    }
}

// ============================================================================
// Phonebook Search Driver
// ============================================================================

/// Drives the submit → settle → poll sequence for one subject.
///
/// No automatic retry of either phase is performed; a failure ends the
/// subject's search. The settling delay is a true wait: the poll call is
/// ordered strictly after it, because the remote service processes the
/// search asynchronously and returns incomplete results if polled too soon.
pub struct PhonebookSearch<T: SearchTransport> {
    transport: T,
    settle_delay: Duration,
}

impl<T: SearchTransport> PhonebookSearch<T> {
    /// Creates a search driver.
    pub fn new(transport: T, settle_delay: Duration) -> Self {
        Self {
            transport,
            settle_delay,
        }
    }

    /// Runs the full two-phase search for one term.
    #[instrument(skip(self, api_key), fields(term = term))]
    pub async fn run(&self, term: &str, api_key: &str) -> SearchState {
        let token = match self.submit(term, api_key).await {
            Ok(token) => token,
            Err(state) => return state,
        };

        debug!(delay = ?self.settle_delay, "Waiting for search to settle");
        tokio::time::sleep(self.settle_delay).await;

        self.poll(&token, term, api_key).await
    }

    /// Submit phase: Init → Submitted(token) or a terminal failure.
    async fn submit(&self, term: &str, api_key: &str) -> Result<SearchToken, SearchState> {
        let reply = match self.transport.submit(term, api_key).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Submit transport failure");
                return Err(SearchState::SubmitFailed(e.to_string()));
            }
        };

        match reply.status {
            200 => match parse_submit(&reply.body) {
                Ok(token) => {
                    debug!("Search submitted");
                    Ok(SearchToken::new(token))
                }
                Err(e) => {
                    warn!(error = %e, "Unparsable submit body");
                    Err(SearchState::SubmitFailed(e.to_string()))
                }
            },
            PAYMENT_REQUIRED => {
                warn!("Service rejected the API key");
                Err(SearchState::AuthFailed)
            }
            status => {
                warn!(status, "Submit returned unexpected status");
                Err(SearchState::SubmitFailed(format!("HTTP {status}")))
            }
        }
    }

    /// Poll phase: Submitted(token) → Ready(records) or a terminal failure.
    async fn poll(&self, token: &SearchToken, term: &str, api_key: &str) -> SearchState {
        let reply = match self.transport.poll(token.as_str(), api_key).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Poll transport failure");
                return SearchState::PollFailed(e.to_string());
            }
        };

        match reply.status {
            200 => match parse_poll(&reply.body, term) {
                Ok(records) => {
                    info!(count = records.len(), "Phonebook search complete");
                    SearchState::Ready(records)
                }
                Err(e) => {
                    warn!(error = %e, "Unparsable poll body");
                    SearchState::PollFailed(e.to_string())
                }
            },
            PAYMENT_REQUIRED => {
                warn!("Service rejected the API key");
                SearchState::AuthFailed
            }
            status => {
                warn!(status, "Poll returned unexpected status");
                SearchState::PollFailed(format!("HTTP {status}"))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intelx::transport::WireReply;
    use async_trait::async_trait;
    use intelsift_fetch::LookupError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Instant;

    /// Stub transport that records call ordering and timing.
    struct StubTransport {
        submit_reply: WireReply,
        poll_reply: WireReply,
        submit_at: Mutex<Option<Instant>>,
        poll_at: Mutex<Option<Instant>>,
        poll_calls: AtomicUsize,
    }

    impl StubTransport {
        fn new(submit: (u16, &str), poll: (u16, &str)) -> Self {
            Self {
                submit_reply: WireReply {
                    status: submit.0,
                    body: submit.1.to_string(),
                },
                poll_reply: WireReply {
                    status: poll.0,
                    body: poll.1.to_string(),
                },
                submit_at: Mutex::new(None),
                poll_at: Mutex::new(None),
                poll_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SearchTransport for &StubTransport {
        async fn submit(&self, _term: &str, _key: &str) -> Result<WireReply, LookupError> {
            *self.submit_at.lock().unwrap() = Some(Instant::now());
            Ok(self.submit_reply.clone())
        }

        async fn poll(&self, _token: &str, _key: &str) -> Result<WireReply, LookupError> {
            self.poll_calls.fetch_add(1, Ordering::SeqCst);
            *self.poll_at.lock().unwrap() = Some(Instant::now());
            Ok(self.poll_reply.clone())
        }
    }

    const SUBMIT_OK: (u16, &str) = (200, r#"{"id": "tok-1"}"#);
    const POLL_OK: (u16, &str) =
        (200, r#"{"selectors": [{"selectorvalue": "alice@example.com"}]}"#);

    #[tokio::test]
    async fn test_happy_path_reaches_ready() {
        let stub = StubTransport::new(SUBMIT_OK, POLL_OK);
        let search = PhonebookSearch::new(&stub, Duration::from_millis(10));

        let state = search.run("example.com", "key").await;
        assert!(state.is_ready());
        let records = state.records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].resolved_query.as_deref(), Some("alice@example.com"));
    }

    #[tokio::test]
    async fn test_poll_ordered_after_settling_delay() {
        let delay = Duration::from_millis(50);
        let stub = StubTransport::new(SUBMIT_OK, POLL_OK);
        let search = PhonebookSearch::new(&stub, delay);

        let state = search.run("example.com", "key").await;
        assert!(state.is_ready());

        let submitted = stub.submit_at.lock().unwrap().unwrap();
        let polled = stub.poll_at.lock().unwrap().unwrap();
        assert!(polled.duration_since(submitted) >= delay);
    }

    #[tokio::test]
    async fn test_invalid_key_on_submit_never_polls() {
        let stub = StubTransport::new((402, ""), POLL_OK);
        let search = PhonebookSearch::new(&stub, Duration::from_millis(1));

        let state = search.run("example.com", "bad-key").await;
        assert!(matches!(state, SearchState::AuthFailed));
        assert_eq!(stub.poll_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unparsable_submit_body_never_polls() {
        let stub = StubTransport::new((200, "<html>"), POLL_OK);
        let search = PhonebookSearch::new(&stub, Duration::from_millis(1));

        let state = search.run("example.com", "key").await;
        assert!(matches!(state, SearchState::SubmitFailed(_)));
        assert_eq!(stub.poll_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_submit_server_error_is_submit_failed() {
        let stub = StubTransport::new((500, "oops"), POLL_OK);
        let search = PhonebookSearch::new(&stub, Duration::from_millis(1));

        let state = search.run("example.com", "key").await;
        assert!(matches!(state, SearchState::SubmitFailed(_)));
    }

    #[tokio::test]
    async fn test_invalid_key_on_poll_is_auth_failed() {
        let stub = StubTransport::new(SUBMIT_OK, (402, ""));
        let search = PhonebookSearch::new(&stub, Duration::from_millis(1));

        let state = search.run("example.com", "key").await;
        assert!(matches!(state, SearchState::AuthFailed));
        assert_eq!(stub.poll_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unparsable_poll_body_is_poll_failed() {
        let stub = StubTransport::new(SUBMIT_OK, (200, "not json"));
        let search = PhonebookSearch::new(&stub, Duration::from_millis(1));

        let state = search.run("example.com", "key").await;
        assert!(matches!(state, SearchState::PollFailed(_)));
    }

    #[tokio::test]
    async fn test_empty_selectors_is_ready_with_no_records() {
        let stub = StubTransport::new(SUBMIT_OK, (200, r#"{"selectors": []}"#));
        let search = PhonebookSearch::new(&stub, Duration::from_millis(1));

        let state = search.run("example.com", "key").await;
        assert!(state.is_ready());
        assert!(state.records().unwrap().is_empty());
    }
}
