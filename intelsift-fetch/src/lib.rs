// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # intelsift Fetch
//!
//! Lookup infrastructure for the intelsift workspace.
//!
//! Every remote endpoint is modeled as a [`LookupStrategy`]; the ordered
//! endpoints for one query kind form a [`LookupPipeline`], which walks the
//! chain strictly in priority order until one endpoint yields usable
//! records.
//!
//! ## Example
//!
//! ```ignore
//! use intelsift_fetch::{LookupContext, LookupPipeline};
//!
//! let ctx = LookupContext::new()?;
//! let pipeline = LookupPipeline::with_strategies(vec![
//!     Box::new(IpApiStrategy::new()),
//!     Box::new(IpApiCoStrategy::new()),
//! ]);
//! let outcome = pipeline.execute(&ctx, &subject).await;
//! if let Some(records) = outcome.records() {
//!     // first responsive, well-formed source won
//! }
//! ```

pub mod client;
pub mod context;
pub mod error;
pub mod pipeline;
pub mod strategy;

// Re-export key types at crate root
pub use client::HttpClient;
pub use context::{LookupContext, LookupContextBuilder, LookupSettings};
pub use error::{AttemptClass, LookupError};
pub use pipeline::{LookupAttempt, LookupOutcome, LookupPipeline};
pub use strategy::{LookupResult, LookupStrategy};
