//! Wire transport for the phonebook protocol.

use async_trait::async_trait;
use intelsift_fetch::{HttpClient, LookupError};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Base URL of the phonebook service.
const INTELX_BASE: &str = "https://2.intelx.io";

/// Result limit passed to the poll call.
const POLL_LIMIT: u32 = 1_000_000;

// ============================================================================
// Wire Types
// ============================================================================

/// Raw reply from one wire call: status code plus unparsed body.
///
/// The protocol layer owns interpretation; the transport only moves bytes.
#[derive(Debug, Clone)]
pub struct WireReply {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

/// Submit request body.
#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    term: &'a str,
    buckets: Vec<String>,
    lookuplevel: u32,
    maxresults: u32,
    timeout: u32,
    datefrom: &'a str,
    dateto: &'a str,
    sort: u32,
    media: u32,
    terminate: Vec<String>,
}

impl<'a> SubmitRequest<'a> {
    fn for_term(term: &'a str) -> Self {
        Self {
            term,
            buckets: Vec::new(),
            lookuplevel: 0,
            maxresults: 100,
            timeout: 0,
            datefrom: "",
            dateto: "",
            sort: 4,
            media: 0,
            terminate: Vec::new(),
        }
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// The two wire calls of the phonebook protocol.
///
/// Implemented over HTTP in production and by stubs in tests.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    /// Submits a search term; the reply body carries the search token.
    async fn submit(&self, term: &str, api_key: &str) -> Result<WireReply, LookupError>;

    /// Polls for the results of a previously submitted search.
    async fn poll(&self, token: &str, api_key: &str) -> Result<WireReply, LookupError>;
}

// ============================================================================
// HTTP Transport
// ============================================================================

/// Production transport over the live phonebook endpoints.
#[derive(Debug, Clone)]
pub struct HttpSearchTransport {
    http: Arc<HttpClient>,
    base: String,
}

impl HttpSearchTransport {
    /// Creates a transport against the default service base URL.
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self::with_base(http, INTELX_BASE)
    }

    /// Creates a transport against a custom base URL.
    pub fn with_base(http: Arc<HttpClient>, base: impl Into<String>) -> Self {
        Self {
            http,
            base: base.into(),
        }
    }
}

#[async_trait]
impl SearchTransport for HttpSearchTransport {
    #[instrument(skip(self, api_key))]
    async fn submit(&self, term: &str, api_key: &str) -> Result<WireReply, LookupError> {
        debug!("Submitting phonebook search");

        let url = format!("{}/phonebook/search?k={}", self.base, api_key);
        let request = SubmitRequest::for_term(term);

        let response = self.http.post_json(&url, &request).await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(WireReply { status, body })
    }

    #[instrument(skip(self, api_key, token))]
    async fn poll(&self, token: &str, api_key: &str) -> Result<WireReply, LookupError> {
        debug!("Polling phonebook results");

        let url = format!(
            "{}/phonebook/search/result?k={}&id={}&limit={}",
            self.base, api_key, token, POLL_LIMIT
        );

        let response = self.http.get(&url).await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(WireReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_request_shape() {
        let request = SubmitRequest::for_term("example.com");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["term"], "example.com");
        assert_eq!(json["maxresults"], 100);
        assert_eq!(json["sort"], 4);
        assert!(json["buckets"].as_array().unwrap().is_empty());
    }
}
