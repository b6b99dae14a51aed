//! Lookup context and settings.
//!
//! The context is passed to every strategy and bundles the HTTP client with
//! the operator-facing knobs (timeout, credential cap, settling delay).

use std::sync::Arc;
use std::time::Duration;

use crate::client::HttpClient;
use crate::error::LookupError;

// ============================================================================
// Lookup Settings
// ============================================================================

/// Settings for lookup operations.
#[derive(Debug, Clone)]
pub struct LookupSettings {
    /// Bounded timeout for each remote request.
    pub timeout: Duration,
    /// Mandatory wait between the two-phase protocol's submit and poll.
    ///
    /// The remote service processes searches asynchronously and returns
    /// incomplete results if polled too soon; this is an external timing
    /// constraint, not a tunable performance parameter.
    pub settle_delay: Duration,
    /// Maximum credential records extracted per breach-dump query.
    pub max_credentials: usize,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            settle_delay: Duration::from_secs(2),
            max_credentials: 20,
        }
    }
}

impl LookupSettings {
    /// Returns settings with a custom request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ============================================================================
// Lookup Context
// ============================================================================

/// Context provided to lookup strategies.
#[derive(Debug, Clone)]
pub struct LookupContext {
    /// HTTP client with tracing and bounded timeouts.
    pub http: Arc<HttpClient>,
    /// Lookup settings.
    pub settings: LookupSettings,
}

impl LookupContext {
    /// Creates a context with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Http`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, LookupError> {
        Self::with_settings(LookupSettings::default())
    }

    /// Creates a context with custom settings.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Http`] if the HTTP client cannot be built.
    pub fn with_settings(settings: LookupSettings) -> Result<Self, LookupError> {
        Ok(Self {
            http: Arc::new(HttpClient::with_timeout(settings.timeout)?),
            settings,
        })
    }

    /// Creates a builder for customizing the context.
    pub fn builder() -> LookupContextBuilder {
        LookupContextBuilder::new()
    }

    /// Returns the effective timeout for remote requests.
    pub fn timeout(&self) -> Duration {
        self.settings.timeout
    }
}


// ============================================================================
// Lookup Context Builder
// ============================================================================

/// Builder for constructing a [`LookupContext`].
pub struct LookupContextBuilder {
    http: Option<Arc<HttpClient>>,
    settings: LookupSettings,
}

impl LookupContextBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            http: None,
            settings: LookupSettings::default(),
        }
    }

    /// Sets the HTTP client.
    pub fn http(mut self, http: Arc<HttpClient>) -> Self {
        self.http = Some(http);
        self
    }

    /// Sets the lookup settings.
    pub fn settings(mut self, settings: LookupSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = timeout;
        self
    }

    /// Sets the credential cap per breach-dump query.
    pub fn max_credentials(mut self, max: usize) -> Self {
        self.settings.max_credentials = max;
        self
    }

    /// Builds the lookup context.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Http`] if no client was supplied and one
    /// cannot be built.
    pub fn build(self) -> Result<LookupContext, LookupError> {
        let http = match self.http {
            Some(http) => http,
            None => Arc::new(HttpClient::with_timeout(self.settings.timeout)?),
        };
        Ok(LookupContext {
            http,
            settings: self.settings,
        })
    }
}

impl Default for LookupContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
