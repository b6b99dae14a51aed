//! Subjects under investigation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An identifier being investigated.
///
/// Subjects are immutable once created; they are supplied by the caller or
/// read from an input list at batch start.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Subject {
    /// An email address.
    Email(String),
    /// A bare domain name.
    Domain(String),
    /// An IP address or host string.
    Ip(String),
    /// A link pattern searched against indexed URLs.
    LinkPattern(String),
}

impl Subject {
    /// Creates an email subject.
    pub fn email(value: impl Into<String>) -> Self {
        Self::Email(value.into())
    }

    /// Creates a domain subject.
    pub fn domain(value: impl Into<String>) -> Self {
        Self::Domain(value.into())
    }

    /// Creates an IP/host subject.
    pub fn ip(value: impl Into<String>) -> Self {
        Self::Ip(value.into())
    }

    /// Creates a link-pattern subject.
    pub fn link_pattern(value: impl Into<String>) -> Self {
        Self::LinkPattern(value.into())
    }

    /// Returns the raw subject string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Email(s) | Self::Domain(s) | Self::Ip(s) | Self::LinkPattern(s) => s,
        }
    }

    /// Returns a short label for the subject kind.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::Domain(_) => "domain",
            Self::Ip(_) => "ip",
            Self::LinkPattern(_) => "links",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
