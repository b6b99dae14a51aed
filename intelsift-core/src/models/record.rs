//! Normalized intelligence records.
//!
//! Provider responses arrive in wildly different shapes; normalizers in the
//! providers crate reduce them to the two record types here. Fields that a
//! provider did not report stay `None` rather than being defaulted to a
//! placeholder — "Unknown" strings are a presentation concern.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ============================================================================
// Canonical Record
// ============================================================================

/// A normalized geolocation/intelligence fact.
///
/// `source` and `subject` are always present; every other field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// Identity of the endpoint that produced this record.
    pub source: String,
    /// The subject string that was queried.
    pub subject: String,
    /// Country name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// City name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Latitude in decimal degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Internet service provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isp: Option<String>,
    /// Organization name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    /// The query string as resolved/echoed by the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_query: Option<String>,
    /// Timezone identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl CanonicalRecord {
    /// Creates a record with only the mandatory fields set.
    pub fn new(source: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            subject: subject.into(),
            country: None,
            city: None,
            latitude: None,
            longitude: None,
            isp: None,
            organization: None,
            resolved_query: None,
            timezone: None,
        }
    }

    /// Returns true if any optional field is populated.
    pub fn has_fields(&self) -> bool {
        self.country.is_some()
            || self.city.is_some()
            || self.latitude.is_some()
            || self.longitude.is_some()
            || self.isp.is_some()
            || self.organization.is_some()
            || self.resolved_query.is_some()
            || self.timezone.is_some()
    }

    /// Returns the populated fields as (column, value) pairs.
    ///
    /// Used by tabular sinks; column order is stable.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![
            ("source", self.source.clone()),
            ("subject", self.subject.clone()),
        ];
        if let Some(v) = &self.country {
            out.push(("country", v.clone()));
        }
        if let Some(v) = &self.city {
            out.push(("city", v.clone()));
        }
        if let Some(v) = self.latitude {
            out.push(("latitude", v.to_string()));
        }
        if let Some(v) = self.longitude {
            out.push(("longitude", v.to_string()));
        }
        if let Some(v) = &self.isp {
            out.push(("isp", v.clone()));
        }
        if let Some(v) = &self.organization {
            out.push(("organization", v.clone()));
        }
        if let Some(v) = &self.resolved_query {
            out.push(("resolved_query", v.clone()));
        }
        if let Some(v) = &self.timezone {
            out.push(("timezone", v.clone()));
        }
        out
    }
}

// ============================================================================
// Credential Record
// ============================================================================

/// A single leaked email/password pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// The leaked account email.
    pub email: String,
    /// The leaked password. May itself contain colons.
    pub password: String,
    /// Fixed label identifying the breach-dump provider.
    pub source: String,
}

impl CredentialRecord {
    /// Creates a credential record.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRecord`] if either the email or the
    /// password is empty. A record is never created from a line lacking a
    /// separator, so both halves must be present.
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let email = email.into();
        let password = password.into();
        if email.is_empty() {
            return Err(CoreError::InvalidRecord("empty email".to_string()));
        }
        if password.is_empty() {
            return Err(CoreError::InvalidRecord("empty password".to_string()));
        }
        Ok(Self {
            email,
            password,
            source: source.into(),
        })
    }

    /// Returns the populated fields as (column, value) pairs.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("email", self.email.clone()),
            ("password", self.password.clone()),
            ("source", self.source.clone()),
        ]
    }
}

// ============================================================================
// Intel Record
// ============================================================================

/// Either record kind, as accumulated by a [`crate::ResultSet`].
///
/// A breach chain can yield both: a match-signal [`CanonicalRecord`] from a
/// JSON provider, or [`CredentialRecord`]s extracted from a dump body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "record")]
pub enum IntelRecord {
    /// A normalized geolocation/intelligence record.
    Canonical(CanonicalRecord),
    /// A leaked credential pair.
    Credential(CredentialRecord),
}

impl IntelRecord {
    /// Returns the populated fields as (column, value) pairs.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Canonical(r) => r.fields(),
            Self::Credential(r) => r.fields(),
        }
    }

    /// Returns the source label of the record.
    pub fn source(&self) -> &str {
        match self {
            Self::Canonical(r) => &r.source,
            Self::Credential(r) => &r.source,
        }
    }
}

impl From<CanonicalRecord> for IntelRecord {
    fn from(record: CanonicalRecord) -> Self {
        Self::Canonical(record)
    }
}

impl From<CredentialRecord> for IntelRecord {
    fn from(record: CredentialRecord) -> Self {
        Self::Credential(record)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_mandatory_only() {
        let record = CanonicalRecord::new("ip-api.com", "8.8.8.8");
        assert!(!record.has_fields());
        assert_eq!(
            record.fields(),
            vec![
                ("source", "ip-api.com".to_string()),
                ("subject", "8.8.8.8".to_string()),
            ]
        );
    }

    #[test]
    fn test_canonical_optional_fields_skipped_in_json() {
        let record = CanonicalRecord::new("ip-api.com", "8.8.8.8");
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("country"));
        assert!(!json.contains("latitude"));
    }

    #[test]
    fn test_canonical_fields_order() {
        let mut record = CanonicalRecord::new("ipapi.co", "1.1.1.1");
        record.country = Some("Australia".to_string());
        record.latitude = Some(-33.86);
        let fields = record.fields();
        let columns: Vec<_> = fields.iter().map(|(c, _)| *c).collect();
        assert_eq!(columns, vec!["source", "subject", "country", "latitude"]);
    }

    #[test]
    fn test_credential_rejects_empty_parts() {
        assert!(CredentialRecord::new("", "pw", "COMB").is_err());
        assert!(CredentialRecord::new("a@b.c", "", "COMB").is_err());
        assert!(CredentialRecord::new("a@b.c", "pw", "COMB").is_ok());
    }

    #[test]
    fn test_intel_record_dispatch() {
        let cred = CredentialRecord::new("a@b.c", "pw", "COMB").unwrap();
        let record = IntelRecord::from(cred);
        assert_eq!(record.source(), "COMB");
        let columns: Vec<_> = record.fields().iter().map(|(c, _)| *c).collect();
        assert_eq!(columns, vec!["email", "password", "source"]);
    }
}
