//! Query kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of intelligence a lookup chain produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    /// Breach-credential lookup (leaked email/password data).
    BreachLookup,
    /// IP/domain geolocation lookup.
    Geolocation,
}

impl QueryKind {
    /// Returns the display name for this kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::BreachLookup => "Breach Lookup",
            Self::Geolocation => "Geolocation",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
