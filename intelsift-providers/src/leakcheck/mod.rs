//! LeakCheck public breach lookup.
//!
//! Free endpoint, JSON only: it signals whether an email appears in known
//! breaches but never returns credential pairs. A match becomes a
//! match-signal canonical record; a no-match body is empty so the chain
//! falls through to the credential-dump provider.

pub(crate) mod parser;
mod strategies;

pub use strategies::LeakCheckStrategy;
