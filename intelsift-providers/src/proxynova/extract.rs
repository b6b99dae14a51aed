//! Credential extraction from breach-dump text.

use intelsift_core::CredentialRecord;
use tracing::debug;

/// Fixed source label for records extracted from the COMB endpoint.
pub const CREDENTIAL_SOURCE: &str = "COMB";

/// Parses raw breach-dump text into credential records.
///
/// The parsing contract:
/// - the body splits on newlines; blank lines are discarded
/// - a first non-blank line textually identical to `queried_subject` is the
///   service echoing the query (no breach found) and is excluded, not counted
/// - a line is accepted only if it contains a `:` separator; the first colon
///   splits email from password, so later colons stay in the password
/// - at most `max_records` records are produced; excess lines are ignored
pub fn extract_credentials(
    raw: &str,
    queried_subject: &str,
    max_records: usize,
) -> Vec<CredentialRecord> {
    let mut records = Vec::new();
    let mut seen_content = false;

    for line in raw.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let first_content = !seen_content;
        seen_content = true;

        // Echo line: exact full-line equality against the queried subject,
        // checked on the first non-blank line only.
        if first_content && line == queried_subject {
            debug!(subject = queried_subject, "Service echoed the query, no breach data");
            continue;
        }

        let Some((email, password)) = line.split_once(':') else {
            continue;
        };

        if records.len() >= max_records {
            debug!(max = max_records, "Credential cap reached, ignoring excess lines");
            break;
        }

        // Rejects lines with an empty half, e.g. "user:" or ":pw".
        if let Ok(record) = CredentialRecord::new(email, password, CREDENTIAL_SOURCE) {
            records.push(record);
        }
    }

    records
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_line_extraction() {
        let raw = "alice@test.com:pw1\nbob@test.com:pw2";
        let records = extract_credentials(raw, "alice@test.com", 20);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].email, "alice@test.com");
        assert_eq!(records[0].password, "pw1");
        assert_eq!(records[1].email, "bob@test.com");
        assert_eq!(records[1].password, "pw2");
        assert_eq!(records[0].source, "COMB");
    }

    #[test]
    fn test_first_colon_splits_rest_stays_in_password() {
        let records = extract_credentials("user:pa:ss", "someone@test.com", 20);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].email, "user");
        assert_eq!(records[0].password, "pa:ss");
    }

    #[test]
    fn test_echo_line_excluded() {
        // The service merely repeats the query: no breach found.
        let raw = "alice@test.com\nbob@test.com:pw2";
        let records = extract_credentials(raw, "alice@test.com", 20);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].email, "bob@test.com");
    }

    #[test]
    fn test_echo_after_leading_blank_lines_excluded() {
        let raw = "\n\nalice@test.com\nbob@test.com:pw2";
        let records = extract_credentials(raw, "alice@test.com", 20);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].email, "bob@test.com");
    }

    #[test]
    fn test_echo_of_colon_bearing_subject_excluded() {
        // A subject containing a colon must not be mistaken for a credential.
        let raw = "\nuser:pass\nbob@test.com:pw2";
        let records = extract_credentials(raw, "user:pass", 20);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].email, "bob@test.com");
    }

    #[test]
    fn test_echo_detection_is_first_line_only() {
        // The same text later in the body is not an echo.
        let raw = "bob@test.com:pw\nalice@test.com:pw2";
        let records = extract_credentials(raw, "alice@test.com", 20);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_blank_and_separator_less_lines_skipped() {
        let raw = "\n\nnot a credential line\na@b.c:pw\n";
        let records = extract_credentials(raw, "a@b.c", 20);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_cap_ignores_excess() {
        let raw = "a@b.c:1\nb@b.c:2\nc@b.c:3";
        let records = extract_credentials(raw, "x@y.z", 2);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].password, "2");
    }

    #[test]
    fn test_empty_halves_rejected() {
        let raw = "user:\n:password\nok@test.com:pw";
        let records = extract_credentials(raw, "x@y.z", 20);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].email, "ok@test.com");
    }

    #[test]
    fn test_crlf_bodies() {
        let raw = "a@b.c:pw1\r\nb@b.c:pw2\r\n";
        let records = extract_credentials(raw, "x@y.z", 20);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].password, "pw1");
    }
}
