//! LeakCheck fetch strategy.

use async_trait::async_trait;
use intelsift_core::{QueryKind, Subject};
use intelsift_fetch::{LookupContext, LookupError, LookupResult, LookupStrategy};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use tracing::{debug, instrument};

use super::parser::parse_leakcheck_response;

const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Breach lookup via the LeakCheck public endpoint.
#[derive(Debug, Default)]
pub struct LeakCheckStrategy;

impl LeakCheckStrategy {
    /// Creates the strategy.
    pub fn new() -> Self {
        Self
    }

    fn url_for(email: &str) -> String {
        format!("https://leakcheck.io/api/public?check={email}")
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_UA));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }
}

#[async_trait]
impl LookupStrategy for LeakCheckStrategy {
    fn id(&self) -> &str {
        "leakcheck.io"
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
        debug!("Querying LeakCheck");

        let url = Self::url_for(subject.as_str());
        let response = ctx.http.get_with_headers(&url, Self::headers()).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Format(format!("HTTP {status}")));
        }

        let body = response.text().await?;
        let record = parse_leakcheck_response(&body, subject.as_str())?;

        Ok(LookupResult::new(
            vec![record.into()],
            self.id(),
            QueryKind::BreachLookup,
        ))
    }

    fn priority(&self) -> u32 {
        100
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_template() {
        assert_eq!(
            LeakCheckStrategy::url_for("a@b.c"),
            "https://leakcheck.io/api/public?check=a@b.c"
        );
    }
}
