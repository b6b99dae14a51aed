//! Phonebook response parsers.

use intelsift_core::CanonicalRecord;
use intelsift_fetch::LookupError;
use serde::Deserialize;

/// Source label recorded on phonebook results.
pub const PHONEBOOK_SOURCE: &str = "intelx.phonebook";

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    #[serde(default)]
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PollResponse {
    selectors: Option<Vec<Selector>>,
}

#[derive(Debug, Deserialize)]
struct Selector {
    #[serde(default)]
    selectorvalue: Option<String>,
}

/// Extracts the search token from a submit reply body.
pub fn parse_submit(body: &str) -> Result<String, LookupError> {
    let response: SubmitResponse = serde_json::from_str(body)
        .map_err(|e| LookupError::Format(format!("invalid submit JSON: {e}")))?;

    match response.id {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(LookupError::Format("missing identifier field".to_string())),
    }
}

/// Extracts the selector matches from a poll reply body.
///
/// The `selectors` collection must be present; an empty collection is a
/// valid "search done, nothing found" result.
pub fn parse_poll(body: &str, term: &str) -> Result<Vec<CanonicalRecord>, LookupError> {
    let response: PollResponse = serde_json::from_str(body)
        .map_err(|e| LookupError::Format(format!("invalid poll JSON: {e}")))?;

    let Some(selectors) = response.selectors else {
        return Err(LookupError::Format("missing selectors collection".to_string()));
    };

    Ok(selectors
        .into_iter()
        .filter_map(|s| s.selectorvalue)
        .map(|value| {
            let mut record = CanonicalRecord::new(PHONEBOOK_SOURCE, term);
            record.resolved_query = Some(value);
            record
        })
        .collect())
}
