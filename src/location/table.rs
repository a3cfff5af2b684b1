//! Built-in approximate coordinates for common cities and countries.
//!
//! The table is an ordered sequence, not a map: lookup scans in
//! declaration order and the first key that appears as a substring of
//! the lowercased input wins. City keys come before country keys so
//! that "Paris, France" lands on the city, not the country centroid.

use super::types::Coordinate;

const APPROXIMATE_COORDS: &[(&str, Coordinate)] = &[
    // Major cities
    ("new york", Coordinate::new(40.7128, -74.0060)),
    ("london", Coordinate::new(51.5074, -0.1278)),
    ("paris", Coordinate::new(48.8566, 2.3522)),
    ("tokyo", Coordinate::new(35.6762, 139.6503)),
    ("beijing", Coordinate::new(39.9042, 116.4074)),
    ("moscow", Coordinate::new(55.7558, 37.6176)),
    ("sydney", Coordinate::new(-33.8688, 151.2093)),
    ("mumbai", Coordinate::new(19.0760, 72.8777)),
    ("cairo", Coordinate::new(30.0444, 31.2357)),
    ("lagos", Coordinate::new(6.5244, 3.3792)),
    ("mexico city", Coordinate::new(19.4326, -99.1332)),
    ("são paulo", Coordinate::new(-23.5505, -46.6333)),
    ("berlin", Coordinate::new(52.5200, 13.4050)),
    ("madrid", Coordinate::new(40.4168, -3.7038)),
    ("rome", Coordinate::new(41.9028, 12.4964)),
    // Countries (approximate center)
    ("usa", Coordinate::new(39.8283, -98.5795)),
    ("united states", Coordinate::new(39.8283, -98.5795)),
    ("uk", Coordinate::new(55.3781, -3.4360)),
    ("united kingdom", Coordinate::new(55.3781, -3.4360)),
    ("canada", Coordinate::new(56.1304, -106.3468)),
    ("australia", Coordinate::new(-25.2744, 133.7751)),
    ("india", Coordinate::new(20.5937, 78.9629)),
    ("china", Coordinate::new(35.8617, 104.1954)),
    ("russia", Coordinate::new(61.5240, 105.3188)),
    ("brazil", Coordinate::new(-14.2350, -51.9253)),
    ("germany", Coordinate::new(51.1657, 10.4515)),
    ("france", Coordinate::new(46.6034, 1.8883)),
    ("spain", Coordinate::new(40.4637, -3.7492)),
    ("italy", Coordinate::new(41.8719, 12.5674)),
    ("japan", Coordinate::new(36.2048, 138.2529)),
];

/// Scan the table for the first key contained in the lowercased input.
pub fn approximate_coordinates(location: &str) -> Option<Coordinate> {
    let normalized = location.to_lowercase();
    APPROXIMATE_COORDS
        .iter()
        .find(|(key, _)| normalized.contains(key))
        .map(|(_, coord)| *coord)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_city_exact() {
        let coord = approximate_coordinates("new york").unwrap();
        assert_relative_eq!(coord.lat, 40.7128);
        assert_relative_eq!(coord.lon, -74.0060);
    }

    #[test]
    fn test_case_insensitive_substring() {
        let coord = approximate_coordinates("New York, USA").unwrap();
        assert_relative_eq!(coord.lat, 40.7128);
    }

    #[test]
    fn test_city_wins_over_country() {
        // "paris" is declared before "france", so the city coordinates win.
        let coord = approximate_coordinates("Paris, France").unwrap();
        assert_relative_eq!(coord.lat, 48.8566);
        assert_relative_eq!(coord.lon, 2.3522);
    }

    #[test]
    fn test_country_only() {
        let coord = approximate_coordinates("somewhere in Canada").unwrap();
        assert_relative_eq!(coord.lat, 56.1304);
    }

    #[test]
    fn test_no_match() {
        assert!(approximate_coordinates("Nowhereland, Atlantis").is_none());
        assert!(approximate_coordinates("").is_none());
    }

    #[test]
    fn test_all_entries_in_bounds() {
        for (key, coord) in APPROXIMATE_COORDS {
            assert!(coord.in_bounds(), "entry '{}' out of bounds", key);
        }
    }
}
