//! Geolocation response schemas and signature dispatch.
//!
//! Providers return the same facts under different key names. Each known
//! shape is a tagged variant with explicit optional fields; the dispatcher
//! selects the variant by signature match, never by speculative field
//! access, and the first matching signature determines the mapping —
//! schemas are not merged or cross-validated.

use intelsift_core::CanonicalRecord;
use intelsift_fetch::LookupError;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

// ============================================================================
// Schema Detection
// ============================================================================

/// Known geolocation response shapes, in dispatch priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoSchema {
    /// ip-api.com shape: `status` marker plus `country`/`lat`/`lon`/`query`.
    IpApi,
    /// ipapi.co shape: `country_name`/`latitude`/`longitude`/`ip`.
    IpApiCo,
    /// Any other payload carrying at least one recognizable geo key.
    Generic,
}

impl GeoSchema {
    /// Detects the schema of a parsed payload by key signature.
    pub fn detect(value: &Value) -> Option<Self> {
        if value.get("status").is_some() {
            return Some(Self::IpApi);
        }
        if value.get("country_name").is_some() {
            return Some(Self::IpApiCo);
        }
        let generic_keys = ["country", "city", "lat", "lon"];
        if generic_keys.iter().any(|k| value.get(k).is_some()) {
            return Some(Self::Generic);
        }
        None
    }
}

// ============================================================================
// Payload Variants
// ============================================================================

/// ip-api.com payload.
#[derive(Debug, Deserialize)]
struct IpApiPayload {
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    isp: Option<String>,
    #[serde(default)]
    org: Option<String>,
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    timezone: Option<String>,
}

/// ipapi.co payload.
#[derive(Debug, Deserialize)]
struct IpApiCoPayload {
    country_name: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    org: Option<String>,
    #[serde(default)]
    ip: Option<String>,
    #[serde(default)]
    timezone: Option<String>,
}

/// Best-effort payload for providers without a dedicated variant.
#[derive(Debug, Deserialize)]
struct GenericGeoPayload {
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    country_name: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    isp: Option<String>,
    #[serde(default)]
    org: Option<String>,
    #[serde(default)]
    ip: Option<String>,
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    timezone: Option<String>,
}

// ============================================================================
// Normalization
// ============================================================================

/// Normalizes a parsed geolocation payload into a canonical record.
///
/// # Errors
///
/// - [`LookupError::Empty`] when the payload is well-formed but explicitly
///   carries no intelligence (e.g. an ip-api.com `status: "fail"` body).
/// - [`LookupError::Format`] when no known signature matches.
pub fn normalize(
    value: &Value,
    endpoint_id: &str,
    subject: &str,
) -> Result<CanonicalRecord, LookupError> {
    let schema = GeoSchema::detect(value).ok_or_else(|| {
        LookupError::Format("no recognizable geolocation fields".to_string())
    })?;
    debug!(endpoint = endpoint_id, schema = ?schema, "Dispatching geo payload");

    match schema {
        GeoSchema::IpApi => normalize_ip_api(value, endpoint_id, subject),
        GeoSchema::IpApiCo => normalize_ipapi_co(value, endpoint_id, subject),
        GeoSchema::Generic => normalize_generic(value, endpoint_id, subject),
    }
}

fn normalize_ip_api(
    value: &Value,
    endpoint_id: &str,
    subject: &str,
) -> Result<CanonicalRecord, LookupError> {
    let payload: IpApiPayload = serde_json::from_value(value.clone())?;

    match payload.status.as_deref() {
        Some("success") => {}
        Some(_) => {
            debug!(
                endpoint = endpoint_id,
                message = payload.message.as_deref().unwrap_or(""),
                "Provider reported failure status"
            );
            return Err(LookupError::Empty);
        }
        None => {
            return Err(LookupError::Format("missing status marker".to_string()));
        }
    }

    let mut record = CanonicalRecord::new(endpoint_id, subject);
    record.country = payload.country;
    record.city = payload.city;
    record.latitude = payload.lat;
    record.longitude = payload.lon;
    record.isp = payload.isp;
    record.organization = payload.org;
    record.resolved_query = payload.query;
    record.timezone = payload.timezone;
    Ok(record)
}

fn normalize_ipapi_co(
    value: &Value,
    endpoint_id: &str,
    subject: &str,
) -> Result<CanonicalRecord, LookupError> {
    let payload: IpApiCoPayload = serde_json::from_value(value.clone())?;

    let mut record = CanonicalRecord::new(endpoint_id, subject);
    record.country = payload.country_name;
    record.city = payload.city;
    record.latitude = payload.latitude;
    record.longitude = payload.longitude;
    // ipapi.co reports the network operator under "org" only.
    record.isp = payload.org;
    record.resolved_query = payload.ip;
    record.timezone = payload.timezone;
    Ok(record)
}

fn normalize_generic(
    value: &Value,
    endpoint_id: &str,
    subject: &str,
) -> Result<CanonicalRecord, LookupError> {
    let payload: GenericGeoPayload = serde_json::from_value(value.clone())?;

    let mut record = CanonicalRecord::new(endpoint_id, subject);
    record.country = payload.country.or(payload.country_name);
    record.city = payload.city;
    record.latitude = payload.lat.or(payload.latitude);
    record.longitude = payload.lon.or(payload.longitude);
    record.isp = payload.isp;
    record.organization = payload.org;
    record.resolved_query = payload.query.or(payload.ip);
    record.timezone = payload.timezone;

    if !record.has_fields() {
        return Err(LookupError::Empty);
    }
    Ok(record)
}

// ============================================================================
// Tests
// ============================================================================
