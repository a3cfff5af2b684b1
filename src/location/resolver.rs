//! Location resolver — orchestrates the fallback chain.
//!
//! Flow: Nominatim → OpenCage → built-in table → unresolved.
//! Tiers run strictly in order; a tier is only attempted after the
//! previous one definitively failed, and every failure falls through
//! silently. Nothing but the binary outcome leaves this module.

use super::providers::{LiveGeocoder, Nominatim, OpenCage};
use super::table;
use super::types::Coordinate;

/// The geocode resolver with its fallback pipeline.
///
/// Holds no state between calls: every invocation re-resolves from
/// scratch, and a fully exhausted chain yields `None` rather than an
/// error so callers can save a profile without coordinates and show a
/// non-blocking notice.
pub struct GeocodeResolver {
    primary: Box<dyn LiveGeocoder>,
    secondary: Box<dyn LiveGeocoder>,
    offline: bool,
}

impl GeocodeResolver {
    pub fn new(opencage_key: &str) -> Self {
        Self {
            primary: Box::new(Nominatim),
            secondary: Box::new(OpenCage::new(opencage_key)),
            offline: false,
        }
    }

    /// Create a resolver with specific live tiers (for testing).
    pub fn with_providers(
        primary: Box<dyn LiveGeocoder>,
        secondary: Box<dyn LiveGeocoder>,
    ) -> Self {
        Self {
            primary,
            secondary,
            offline: false,
        }
    }

    /// Skip the live tiers entirely — built-in table only.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Resolve a free-text location through the full fallback chain.
    ///
    /// Blank input returns `None` immediately, without any network call.
    pub fn resolve(&self, location: &str) -> Option<Coordinate> {
        let query = location.trim();
        if query.is_empty() {
            return None;
        }

        if !self.offline {
            for tier in [&self.primary, &self.secondary] {
                match tier.lookup(query) {
                    Ok(coord) => {
                        log::debug!(
                            "{} resolved '{}' to {:.4}, {:.4}",
                            tier.name(),
                            query,
                            coord.lat,
                            coord.lon
                        );
                        return Some(coord);
                    }
                    Err(e) => log::debug!("{} failed for '{}': {}", tier.name(), query, e),
                }
            }
        }

        table::approximate_coordinates(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::types::GeocodeError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct StubGeocoder {
        name: &'static str,
        result: Option<Coordinate>,
        calls: Arc<AtomicUsize>,
    }

    impl LiveGeocoder for StubGeocoder {
        fn name(&self) -> &'static str {
            self.name
        }

        fn lookup(&self, query: &str) -> Result<Coordinate, GeocodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
                .ok_or_else(|| GeocodeError::NoMatch(query.to_string()))
        }
    }

    fn stub(name: &'static str, result: Option<Coordinate>) -> (Box<StubGeocoder>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let geocoder = Box::new(StubGeocoder {
            name,
            result,
            calls: Arc::clone(&calls),
        });
        (geocoder, calls)
    }

    #[test]
    fn test_blank_input_makes_no_calls() {
        let (primary, primary_calls) = stub("primary", Some(Coordinate::new(1.0, 2.0)));
        let (secondary, secondary_calls) = stub("secondary", Some(Coordinate::new(3.0, 4.0)));
        let resolver = GeocodeResolver::with_providers(primary, secondary);

        assert!(resolver.resolve("").is_none());
        assert!(resolver.resolve("   \t ").is_none());
        assert_eq!(primary_calls.load(Ordering::SeqCst), 0);
        assert_eq!(secondary_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_primary_success_short_circuits() {
        let (primary, _) = stub("primary", Some(Coordinate::new(52.52, 13.405)));
        let (secondary, secondary_calls) = stub("secondary", Some(Coordinate::new(0.0, 0.0)));
        let resolver = GeocodeResolver::with_providers(primary, secondary);

        let coord = resolver.resolve("Berlin").unwrap();
        assert!((coord.lat - 52.52).abs() < 1e-9);
        assert_eq!(secondary_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_secondary_after_primary_failure() {
        let (primary, primary_calls) = stub("primary", None);
        let (secondary, secondary_calls) = stub("secondary", Some(Coordinate::new(35.6762, 139.6503)));
        let resolver = GeocodeResolver::with_providers(primary, secondary);

        let coord = resolver.resolve("Tokyo").unwrap();
        assert!((coord.lon - 139.6503).abs() < 1e-9);
        assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
        assert_eq!(secondary_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_table_after_both_tiers_fail() {
        let (primary, _) = stub("primary", None);
        let (secondary, _) = stub("secondary", None);
        let resolver = GeocodeResolver::with_providers(primary, secondary);

        let coord = resolver.resolve("New York, USA").unwrap();
        assert!((coord.lat - 40.7128).abs() < 0.01);
        assert!((coord.lon + 74.0060).abs() < 0.01);
    }

    #[test]
    fn test_exhausted_chain_is_unresolved() {
        let (primary, primary_calls) = stub("primary", None);
        let (secondary, secondary_calls) = stub("secondary", None);
        let resolver = GeocodeResolver::with_providers(primary, secondary);

        assert!(resolver.resolve("Nowhereland, Atlantis").is_none());
        assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
        assert_eq!(secondary_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_offline_skips_live_tiers() {
        let (primary, primary_calls) = stub("primary", Some(Coordinate::new(0.0, 0.0)));
        let (secondary, secondary_calls) = stub("secondary", Some(Coordinate::new(0.0, 0.0)));
        let mut resolver = GeocodeResolver::with_providers(primary, secondary);
        resolver.set_offline(true);

        let coord = resolver.resolve("London").unwrap();
        assert!((coord.lat - 51.5074).abs() < 0.01);
        assert_eq!(primary_calls.load(Ordering::SeqCst), 0);
        assert_eq!(secondary_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_offline_unknown_is_unresolved() {
        let (primary, _) = stub("primary", Some(Coordinate::new(0.0, 0.0)));
        let (secondary, _) = stub("secondary", None);
        let mut resolver = GeocodeResolver::with_providers(primary, secondary);
        resolver.set_offline(true);

        assert!(resolver.resolve("xyznonexistentcity123").is_none());
    }
}
