//! Geolocation providers.
//!
//! Four alternate endpoints form the geolocation fallback chain. Each
//! returns JSON with a provider-specific field naming scheme; the schema
//! module reduces all of them to [`intelsift_core::CanonicalRecord`].

pub(crate) mod schema;
mod strategies;

pub use schema::GeoSchema;
pub use strategies::{
    FreeGeoIpStrategy, IpApiCoStrategy, IpApiStrategy, IpLocationStrategy,
};
