//! Domain models for intelsift.
//!
//! All models are plain data types with serde support. Provider-specific
//! response shapes live in the providers crate; only the normalized,
//! provider-agnostic forms are defined here.

mod query;
mod record;
mod resultset;
mod subject;

pub use query::QueryKind;
pub use record::{CanonicalRecord, CredentialRecord, IntelRecord};
pub use resultset::ResultSet;
pub use subject::Subject;
