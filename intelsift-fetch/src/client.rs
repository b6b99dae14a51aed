//! HTTP client wrapper with tracing and bounded timeouts.

use reqwest::{header::HeaderMap, Client, Response};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::error::LookupError;

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for intelsift.
const USER_AGENT: &str = concat!("intelsift/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper used by all lookup strategies.
///
/// Every request is bounded by the client timeout; there is no cancellation
/// beyond the timeout elapsing.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    /// Creates a new HTTP client with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Http`] if the underlying client cannot be
    /// built (e.g. no TLS backend available).
    pub fn new() -> Result<Self, LookupError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with a custom timeout.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Http`] if the underlying client cannot be
    /// built.
    pub fn with_timeout(timeout: Duration) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { inner: client })
    }

    /// Performs a GET request.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get(&self, url: &str) -> Result<Response, LookupError> {
        debug!("GET request");

        let response = self.inner.get(url).send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Performs a GET request with custom headers.
    #[instrument(skip(self, headers), fields(url = %url))]
    pub async fn get_with_headers(
        &self,
        url: &str,
        headers: HeaderMap,
    ) -> Result<Response, LookupError> {
        debug!("GET request with headers");

        let response = self.inner.get(url).headers(headers).send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Performs a POST request with a JSON body.
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn post_json<T: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<Response, LookupError> {
        debug!("POST request with JSON");

        let response = self.inner.post(url).json(body).send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_is_fallible_not_panicking() {
        let client = HttpClient::with_timeout(Duration::from_secs(5));
        assert!(client.is_ok());
        assert!(HttpClient::new().is_ok());
    }
}
