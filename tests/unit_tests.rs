// Unit tests for Detailing Nearby

use detailing_nearby::core::{
    distance::{calculate_bounding_box, haversine_miles, is_within_bounding_box},
    filters::matches_filters,
    find_nearby,
};
use detailing_nearby::models::{SearchFilters, ServiceLocation};
use detailing_nearby::services::{InMemoryCatalog, PostalCodeLookup, PostalError, StaticPostalCodes};
use detailing_nearby::NearbyLocator;
use std::sync::Arc;

const SARATOGA: (f64, f64) = (40.3469, -111.9047);
const LEHI: (f64, f64) = (40.3916, -111.8508);

fn create_location(id: &str, lat: f64, lon: f64) -> ServiceLocation {
    ServiceLocation {
        id: id.to_string(),
        title: format!("Detail {}", id),
        category: "full".to_string(),
        address: format!("{} Main St", id),
        latitude: lat,
        longitude: lon,
        provider_name: None,
        price_from: None,
    }
}

fn utah_county() -> Vec<ServiceLocation> {
    vec![
        create_location("orem", 40.2969, -111.6946),
        create_location("saratoga", SARATOGA.0, SARATOGA.1),
        create_location("slc", 40.7608, -111.8910),
        create_location("lehi", LEHI.0, LEHI.1),
        create_location("eagle-mountain", 40.3141, -112.0069),
        create_location("american-fork", 40.3769, -111.7958),
    ]
}

#[test]
fn test_haversine_distance_zero() {
    let distance = haversine_miles(SARATOGA.0, SARATOGA.1, SARATOGA.0, SARATOGA.1);
    assert_eq!(distance, 0.0);
}

#[test]
fn test_haversine_saratoga_to_lehi() {
    let distance = haversine_miles(SARATOGA.0, SARATOGA.1, LEHI.0, LEHI.1);
    assert!((distance - 4.19).abs() < 0.05, "Expected ~4.19mi, got {}", distance);
}

#[test]
fn test_haversine_new_york_to_los_angeles() {
    let distance = haversine_miles(40.7128, -74.0060, 34.0522, -118.2437);
    assert!((distance - 2445.7).abs() < 5.0, "Expected ~2446mi, got {}", distance);
}

#[test]
fn test_haversine_symmetry() {
    let points = [
        SARATOGA,
        LEHI,
        (51.5074, -0.1278),
        (-33.8688, 151.2093),
        (0.0, 179.999),
        (89.9, -45.0),
    ];

    for a in points {
        for b in points {
            let ab = haversine_miles(a.0, a.1, b.0, b.1);
            let ba = haversine_miles(b.0, b.1, a.0, a.1);
            assert!((ab - ba).abs() < 1e-9, "{:?} <-> {:?}: {} vs {}", a, b, ab, ba);
            assert!(ab >= 0.0);
        }
    }
}

#[test]
fn test_out_of_range_coordinates_do_not_fail() {
    let distance = haversine_miles(120.0, 400.0, -95.0, -200.0);
    assert!(distance.is_finite());
    assert!(distance >= 0.0);
}

#[test]
fn test_saratoga_springs_scenario() {
    let catalog = vec![
        create_location("here", SARATOGA.0, SARATOGA.1),
        create_location("lehi", LEHI.0, LEHI.1),
    ];

    // Lehi lies beyond a 4 mile radius
    let results = find_nearby(&catalog, SARATOGA.0, SARATOGA.1, 4.0);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].location.id, "here");
    assert_eq!(results[0].distance_miles, 0.0);

    // ...and inside a 5 mile one
    let results = find_nearby(&catalog, SARATOGA.0, SARATOGA.1, 5.0);
    assert_eq!(results.len(), 2);
    assert_eq!(results[1].location.id, "lehi");
}

#[test]
fn test_monotonic_radius_inclusion() {
    let catalog = utah_county();
    let radii = [0.0, 1.0, 4.0, 5.0, 10.0, 15.0, 30.0, 100.0];

    for window in radii.windows(2) {
        let smaller = find_nearby(&catalog, SARATOGA.0, SARATOGA.1, window[0]);
        let larger = find_nearby(&catalog, SARATOGA.0, SARATOGA.1, window[1]);

        for result in &smaller {
            assert!(
                larger.iter().any(|r| r.location.id == result.location.id),
                "{} found at {}mi but not at {}mi",
                result.location.id,
                window[0],
                window[1]
            );
        }
    }
}

#[test]
fn test_results_sorted_ascending() {
    let results = find_nearby(&utah_county(), SARATOGA.0, SARATOGA.1, 100.0);
    assert_eq!(results.len(), 6);

    for pair in results.windows(2) {
        assert!(pair[0].distance_miles <= pair[1].distance_miles);
    }
}

#[test]
fn test_boundary_inclusion() {
    let catalog = utah_county();

    for location in &catalog {
        let exact = haversine_miles(SARATOGA.0, SARATOGA.1, location.latitude, location.longitude);
        let results = find_nearby(&catalog, SARATOGA.0, SARATOGA.1, exact);
        assert!(
            results.iter().any(|r| r.location.id == location.id),
            "{} should be included at exactly {}mi",
            location.id,
            exact
        );
    }
}

#[test]
fn test_empty_catalog_returns_empty() {
    assert!(find_nearby(&[], SARATOGA.0, SARATOGA.1, 50.0).is_empty());
}

#[test]
fn test_negative_radius_returns_empty() {
    assert!(find_nearby(&utah_county(), SARATOGA.0, SARATOGA.1, -10.0).is_empty());
}

#[test]
fn test_distance_not_stored_on_catalog() {
    let catalog = utah_county();
    let before = catalog.clone();
    let _ = find_nearby(&catalog, SARATOGA.0, SARATOGA.1, 100.0);
    assert_eq!(catalog, before);
}

#[test]
fn test_bounding_box_never_drops_radius_matches() {
    let catalog = utah_county();
    for radius in [1.0, 4.2, 6.0, 12.0, 29.0] {
        let bbox = calculate_bounding_box(SARATOGA.0, SARATOGA.1, radius);
        for result in find_nearby(&catalog, SARATOGA.0, SARATOGA.1, radius) {
            assert!(is_within_bounding_box(
                result.location.latitude,
                result.location.longitude,
                &bbox
            ));
        }
    }
}

#[test]
fn test_locator_search_with_filters() {
    let mut catalog = utah_county();
    catalog[3].category = "coating".to_string();
    catalog[5].category = "coating".to_string();

    let locator = NearbyLocator::new(Arc::new(InMemoryCatalog::new(catalog).unwrap()));
    let filters = SearchFilters {
        category: Some("Coating".to_string()),
        keyword: None,
    };

    let outcome = locator.search(SARATOGA.0, SARATOGA.1, 25.0, &filters, None);
    let ids: Vec<_> = outcome.results.iter().map(|r| r.location.id.as_str()).collect();
    assert_eq!(ids, vec!["lehi", "american-fork"]);
}

#[test]
fn test_keyword_filter() {
    let location = create_location("lehi", LEHI.0, LEHI.1);
    let filters = SearchFilters {
        category: None,
        keyword: Some("DETAIL".to_string()),
    };
    assert!(matches_filters(&location, &filters));
}

#[test]
fn test_postal_lookup_feeds_locator() {
    let lookup = StaticPostalCodes::builtin();
    let origin = lookup.resolve("84045").unwrap();

    let results = find_nearby(&utah_county(), origin.latitude, origin.longitude, 4.0);
    assert_eq!(results[0].location.id, "saratoga");
}

#[test]
fn test_unknown_postal_code() {
    let lookup = StaticPostalCodes::builtin();
    assert!(matches!(lookup.resolve("00000"), Err(PostalError::NotFound(_))));
}
