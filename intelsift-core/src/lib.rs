// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # intelsift Core
//!
//! Core types and models for the intelsift workspace.
//!
//! This crate provides the foundational abstractions used across all other
//! intelsift crates, including:
//!
//! - Domain models (subjects, intelligence records, result sets)
//! - Error types
//!
//! ## Key Types
//!
//! - [`Subject`] - The email, domain, or IP/host under investigation
//! - [`QueryKind`] - The kind of intelligence being requested
//! - [`CanonicalRecord`] - Normalized, provider-agnostic intelligence result
//! - [`CredentialRecord`] - A single leaked email/password pair
//! - [`IntelRecord`] - Either record kind, as stored by a result set
//! - [`ResultSet`] - Insertion-ordered accumulation of records for a batch

pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    CanonicalRecord,
    CredentialRecord,
    IntelRecord,
    QueryKind,
    ResultSet,
    Subject,
};
