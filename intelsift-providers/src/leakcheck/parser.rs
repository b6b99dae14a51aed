//! LeakCheck response parser.

use intelsift_core::CanonicalRecord;
use intelsift_fetch::LookupError;
use serde::Deserialize;
use tracing::debug;

/// Response from the LeakCheck public API.
#[derive(Debug, Deserialize)]
pub struct LeakCheckResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub found: u64,
    #[serde(default)]
    pub sources: Vec<LeakCheckSource>,
}

/// One breach source entry.
#[derive(Debug, Deserialize)]
pub struct LeakCheckSource {
    #[serde(default)]
    pub name: Option<String>,
}

/// Parses a LeakCheck body into a match-signal record.
///
/// LeakCheck never returns credential pairs, only whether the email was
/// found; a match yields a canonical record with just source and subject.
pub fn parse_leakcheck_response(
    json_str: &str,
    subject: &str,
) -> Result<CanonicalRecord, LookupError> {
    let response: LeakCheckResponse = serde_json::from_str(json_str)
        .map_err(|e| LookupError::Format(format!("invalid JSON: {e}")))?;

    if !response.success || response.found == 0 {
        debug!(subject, "LeakCheck reports no breaches");
        return Err(LookupError::Empty);
    }

    let first_source = response
        .sources
        .first()
        .and_then(|s| s.name.as_deref())
        .unwrap_or("unknown");
    debug!(
        subject,
        found = response.found,
        sources = response.sources.len(),
        first_source,
        "Email found in breach database"
    );
    Ok(CanonicalRecord::new("leakcheck.io", subject))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_yields_signal_record() {
        let json = r#"{
            "success": true,
            "found": 3,
            "fields": ["password"],
            "sources": [{"name": "Collection1", "date": "2019-01"}]
        }"#;

        let record = parse_leakcheck_response(json, "alice@test.com").unwrap();
        assert_eq!(record.source, "leakcheck.io");
        assert_eq!(record.subject, "alice@test.com");
        // Match signal only: no geo fields are ever populated.
        assert!(!record.has_fields());
    }

    #[test]
    fn test_no_match_is_empty() {
        let json = r#"{"success": false, "found": 0}"#;
        let err = parse_leakcheck_response(json, "clean@test.com").unwrap_err();
        assert!(matches!(err, LookupError::Empty));
    }

    #[test]
    fn test_success_without_hits_is_empty() {
        let json = r#"{"success": true, "found": 0}"#;
        let err = parse_leakcheck_response(json, "clean@test.com").unwrap_err();
        assert!(matches!(err, LookupError::Empty));
    }

    #[test]
    fn test_garbage_is_format_error() {
        let err = parse_leakcheck_response("<html>busy</html>", "x@y.z").unwrap_err();
        assert!(matches!(err, LookupError::Format(_)));
    }
}
