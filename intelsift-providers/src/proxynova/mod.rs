//! ProxyNova COMB lookup.
//!
//! The COMB (Compilation of Many Breaches) endpoint returns a plain-text
//! body of newline-separated `email:password` lines. The extractor parses
//! that body into credential records while filtering noise.

mod extract;
mod strategies;

pub use extract::{extract_credentials, CREDENTIAL_SOURCE};
pub use strategies::CombStrategy;
