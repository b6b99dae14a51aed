//! Geolocation endpoint strategies.
//!
//! Endpoint order mirrors observed reliability: ip-api.com first, then
//! ipapi.co, freegeoip.app, and iplocation.net as the last resort.

use async_trait::async_trait;
use intelsift_core::{QueryKind, Subject};
use intelsift_fetch::{LookupContext, LookupError, LookupResult, LookupStrategy};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use serde_json::Value;
use tracing::{debug, instrument};

use super::schema;

/// Browser-style user agent; some of these endpoints reject obvious bots.
const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// ip-api.com field selection (free tier).
const IP_API_FIELDS: &str =
    "status,message,country,countryCode,region,regionName,city,zip,lat,lon,timezone,isp,org,as,query";

fn geo_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_UA));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers
}

/// Issues the request and runs the schema dispatch on the body.
#[instrument(skip(ctx), fields(endpoint = endpoint_id))]
async fn fetch_and_normalize(
    ctx: &LookupContext,
    url: &str,
    endpoint_id: &str,
    subject: &Subject,
) -> Result<LookupResult, LookupError> {
    let response = ctx.http.get_with_headers(url, geo_headers()).await?;

    let status = response.status();
    if !status.is_success() {
        return Err(LookupError::Format(format!("HTTP {status}")));
    }

    let body = response.text().await?;
    let value: Value = serde_json::from_str(&body)?;

    let record = schema::normalize(&value, endpoint_id, subject.as_str())?;
    debug!(endpoint = endpoint_id, "Geolocation found");
    Ok(LookupResult::new(
        vec![record.into()],
        endpoint_id,
        QueryKind::Geolocation,
    ))
}

// ============================================================================
// ip-api.com
// ============================================================================

/// Primary geolocation endpoint.
#[derive(Debug, Default)]
pub struct IpApiStrategy;

impl IpApiStrategy {
    /// Creates the strategy.
    pub fn new() -> Self {
        Self
    }

    fn url_for(target: &str) -> String {
        format!("http://ip-api.com/json/{target}?fields={IP_API_FIELDS}")
    }
}

#[async_trait]
impl LookupStrategy for IpApiStrategy {
    fn id(&self) -> &str {
        "ip-api.com"
    }

    fn query_kind(&self) -> QueryKind {
        QueryKind::Geolocation
    }

    async fn lookup(
        &self,
        ctx: &LookupContext,
        subject: &Subject,
    ) -> Result<LookupResult, LookupError> {
        let url = Self::url_for(subject.as_str());
        fetch_and_normalize(ctx, &url, self.id(), subject).await
    }

    fn priority(&self) -> u32 {
        100
    }
}

// ============================================================================
// ipapi.co
// ============================================================================

/// First alternate geolocation endpoint.
#[derive(Debug, Default)]
pub struct IpApiCoStrategy;

impl IpApiCoStrategy {
    /// Creates the strategy.
    pub fn new() -> Self {
        Self
    }

    fn url_for(target: &str) -> String {
        format!("https://ipapi.co/{target}/json/")
    }
}

#[async_trait]
impl LookupStrategy for IpApiCoStrategy {
    fn id(&self) -> &str {
        "ipapi.co"
    }

    fn query_kind(&self) -> QueryKind {
        QueryKind::Geolocation
    }

    async fn lookup(
        &self,
        ctx: &LookupContext,
        subject: &Subject,
    ) -> Result<LookupResult, LookupError> {
        let url = Self::url_for(subject.as_str());
        fetch_and_normalize(ctx, &url, self.id(), subject).await
    }

    fn priority(&self) -> u32 {
        80
    }
}

// ============================================================================
// freegeoip.app
// ============================================================================

/// Second alternate geolocation endpoint.
#[derive(Debug, Default)]
pub struct FreeGeoIpStrategy;

impl FreeGeoIpStrategy {
    /// Creates the strategy.
    pub fn new() -> Self {
        Self
    }

    fn url_for(target: &str) -> String {
        format!("http://freegeoip.app/json/{target}")
    }
}

#[async_trait]
impl LookupStrategy for FreeGeoIpStrategy {
    fn id(&self) -> &str {
        "freegeoip.app"
    }

    fn query_kind(&self) -> QueryKind {
        QueryKind::Geolocation
    }

    async fn lookup(
        &self,
        ctx: &LookupContext,
        subject: &Subject,
    ) -> Result<LookupResult, LookupError> {
        let url = Self::url_for(subject.as_str());
        fetch_and_normalize(ctx, &url, self.id(), subject).await
    }

    fn priority(&self) -> u32 {
        60
    }
}

// ============================================================================
// iplocation.net
// ============================================================================

/// Last-resort geolocation endpoint. Frequently serves HTML, which the
/// JSON parse rejects as a format error and the chain moves on.
#[derive(Debug, Default)]
pub struct IpLocationStrategy;

impl IpLocationStrategy {
    /// Creates the strategy.
    pub fn new() -> Self {
        Self
    }

    fn url_for(target: &str) -> String {
        format!("https://iplocation.net/ip/{target}")
    }
}

#[async_trait]
impl LookupStrategy for IpLocationStrategy {
    fn id(&self) -> &str {
        "iplocation.net"
    }

    fn query_kind(&self) -> QueryKind {
        QueryKind::Geolocation
    }

    async fn lookup(
        &self,
        ctx: &LookupContext,
        subject: &Subject,
    ) -> Result<LookupResult, LookupError> {
        let url = Self::url_for(subject.as_str());
        fetch_and_normalize(ctx, &url, self.id(), subject).await
    }

    fn priority(&self) -> u32 {
        40
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_templates() {
        assert_eq!(
            IpApiCoStrategy::url_for("8.8.8.8"),
            "https://ipapi.co/8.8.8.8/json/"
        );
        assert_eq!(
            FreeGeoIpStrategy::url_for("example.com"),
            "http://freegeoip.app/json/example.com"
        );
        assert!(IpApiStrategy::url_for("8.8.8.8").starts_with("http://ip-api.com/json/8.8.8.8?fields="));
    }

    #[test]
    fn test_priorities_define_chain_order() {
        assert!(IpApiStrategy::new().priority() > IpApiCoStrategy::new().priority());
        assert!(IpApiCoStrategy::new().priority() > FreeGeoIpStrategy::new().priority());
        assert!(FreeGeoIpStrategy::new().priority() > IpLocationStrategy::new().priority());
    }
}
