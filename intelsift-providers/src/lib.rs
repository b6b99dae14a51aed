// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # intelsift Providers
//!
//! Remote service implementations for intelsift.
//!
//! Each module wraps one third-party service: its URL templates, request
//! headers, and the normalizer that maps its idiosyncratic response shape
//! onto the canonical record types.
//!
//! - [`geo`] - Geolocation endpoints (ip-api.com, ipapi.co, freegeoip.app,
//!   iplocation.net) and the tagged schema dispatch
//! - [`leakcheck`] - LeakCheck public breach lookup (JSON match signal)
//! - [`proxynova`] - ProxyNova COMB lookup and the credential extractor
//! - [`intelx`] - IntelX phonebook two-phase submit/poll protocol
//! - [`registry`] - Ordered endpoint chains per query kind

pub mod geo;
pub mod intelx;
pub mod leakcheck;
pub mod proxynova;
pub mod registry;

pub use intelx::{PhonebookSearch, SearchState, SearchToken};
pub use proxynova::extract_credentials;
pub use registry::EndpointRegistry;
