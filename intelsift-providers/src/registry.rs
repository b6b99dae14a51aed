//! Endpoint registry.
//!
//! Builds the ordered endpoint chain for each query kind. Chains are
//! configuration data: the candidate endpoints and their order never change
//! at runtime.

use intelsift_core::QueryKind;
use intelsift_fetch::{LookupPipeline, LookupStrategy};

use crate::geo::{FreeGeoIpStrategy, IpApiCoStrategy, IpApiStrategy, IpLocationStrategy};
use crate::leakcheck::LeakCheckStrategy;
use crate::proxynova::CombStrategy;

/// Static registry of endpoint chains.
pub struct EndpointRegistry;

impl EndpointRegistry {
    /// Builds the geolocation fallback chain.
    ///
    /// Order: ip-api.com, ipapi.co, freegeoip.app, iplocation.net.
    pub fn geolocation_chain() -> LookupPipeline {
        let strategies: Vec<Box<dyn LookupStrategy>> = vec![
            Box::new(IpApiStrategy::new()),
            Box::new(IpApiCoStrategy::new()),
            Box::new(FreeGeoIpStrategy::new()),
            Box::new(IpLocationStrategy::new()),
        ];
        LookupPipeline::with_strategies(strategies)
    }

    /// Builds the breach-lookup fallback chain.
    ///
    /// Order: LeakCheck (JSON match signal), then the COMB credential dump.
    pub fn breach_chain() -> LookupPipeline {
        let strategies: Vec<Box<dyn LookupStrategy>> = vec![
            Box::new(LeakCheckStrategy::new()),
            Box::new(CombStrategy::new()),
        ];
        LookupPipeline::with_strategies(strategies)
    }

    /// Builds the chain for a query kind.
    pub fn chain_for(kind: QueryKind) -> LookupPipeline {
        match kind {
            QueryKind::Geolocation => Self::geolocation_chain(),
            QueryKind::BreachLookup => Self::breach_chain(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geolocation_chain_order() {
        let chain = EndpointRegistry::geolocation_chain();
        assert_eq!(
            chain.endpoint_ids(),
            vec!["ip-api.com", "ipapi.co", "freegeoip.app", "iplocation.net"]
        );
    }

    #[test]
    fn test_breach_chain_order() {
        let chain = EndpointRegistry::breach_chain();
        assert_eq!(chain.endpoint_ids(), vec!["leakcheck.io", "proxynova.comb"]);
    }

    #[test]
    fn test_chain_for_kind() {
        assert_eq!(EndpointRegistry::chain_for(QueryKind::Geolocation).len(), 4);
        assert_eq!(EndpointRegistry::chain_for(QueryKind::BreachLookup).len(), 2);
    }
}
