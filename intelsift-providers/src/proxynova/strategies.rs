//! ProxyNova COMB fetch strategy.

use async_trait::async_trait;
use intelsift_core::{IntelRecord, QueryKind, Subject};
use intelsift_fetch::{LookupContext, LookupError, LookupResult, LookupStrategy};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use tracing::{debug, instrument};

use super::extract::extract_credentials;

const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Credential lookup via the ProxyNova COMB endpoint.
#[derive(Debug, Default)]
pub struct CombStrategy;

impl CombStrategy {
    /// Creates the strategy.
    pub fn new() -> Self {
        Self
    }

    fn url_for(email: &str) -> String {
        format!("https://api.proxynova.com/comb?query={email}")
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_UA));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }
}

#[async_trait]
impl LookupStrategy for CombStrategy {
    fn id(&self) -> &str {
        "proxynova.comb"
    }

    fn query_kind(&self) -> QueryKind {
        QueryKind::BreachLookup
    }

    #[instrument(skip(self, ctx), fields(subject = %subject))]
    async fn lookup(
        &self,
        ctx: &LookupContext,
        subject: &Subject,
    ) -> Result<LookupResult, LookupError> {
        debug!("Querying COMB database");

        let url = Self::url_for(subject.as_str());
        let response = ctx.http.get_with_headers(&url, Self::headers()).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Format(format!("HTTP {status}")));
        }

        let body = response.text().await?;
        let records = extract_credentials(
            &body,
            subject.as_str(),
            ctx.settings.max_credentials,
        );

        if records.is_empty() {
            return Err(LookupError::Empty);
        }

        debug!(count = records.len(), "Breach records with credentials found");
        Ok(LookupResult::new(
            records.into_iter().map(IntelRecord::from).collect(),
            self.id(),
            QueryKind::BreachLookup,
        ))
    }

    fn priority(&self) -> u32 {
        80
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_template() {
        assert_eq!(
            CombStrategy::url_for("a@b.c"),
            "https://api.proxynova.com/comb?query=a@b.c"
        );
    }
}
