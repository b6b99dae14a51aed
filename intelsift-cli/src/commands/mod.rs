//! CLI command implementations.

pub mod breach;
pub mod geo;
pub mod search;
