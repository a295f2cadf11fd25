use crate::core::{
    distance::{calculate_bounding_box, haversine_miles, is_within_bounding_box},
    filters::matches_filters,
};
use crate::models::{RankedResult, SearchFilters, ServiceLocation};
use crate::services::ServiceCatalog;
use std::cmp::Ordering;
use std::sync::Arc;

/// Rank every location within `radius_miles` of the origin, nearest first
///
/// The radius check is inclusive. Ties keep their catalog order because the
/// sort is stable. The radius is not validated: zero keeps only coincident
/// points and a negative radius keeps nothing.
pub fn find_nearby(
    locations: &[ServiceLocation],
    origin_lat: f64,
    origin_lon: f64,
    radius_miles: f64,
) -> Vec<RankedResult> {
    let mut results: Vec<RankedResult> = locations
        .iter()
        .filter_map(|location| rank_within(location, origin_lat, origin_lon, radius_miles))
        .collect();

    sort_nearest_first(&mut results);
    results
}

#[inline]
fn rank_within(
    location: &ServiceLocation,
    origin_lat: f64,
    origin_lon: f64,
    radius_miles: f64,
) -> Option<RankedResult> {
    let distance_miles = haversine_miles(origin_lat, origin_lon, location.latitude, location.longitude);

    if distance_miles <= radius_miles {
        Some(RankedResult {
            location: location.clone(),
            distance_miles,
        })
    } else {
        None
    }
}

fn is_valid_origin(lat: f64, lon: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
}

fn sort_nearest_first(results: &mut [RankedResult]) {
    // `sort_by` is stable, so equal distances stay in catalog order
    results.sort_by(|a, b| {
        a.distance_miles
            .partial_cmp(&b.distance_miles)
            .unwrap_or(Ordering::Equal)
    });
}

/// Result of a filtered nearby search
#[derive(Debug)]
pub struct SearchOutcome {
    pub results: Vec<RankedResult>,
    /// Matches before the limit was applied
    pub total_matches: usize,
}

/// Nearby search over an injected service catalog
///
/// # Pipeline Stages
/// 1. Bounding box pre-filter
/// 2. Category / keyword filters
/// 3. Haversine radius check
/// 4. Stable nearest-first sort and limit
#[derive(Clone)]
pub struct NearbyLocator {
    catalog: Arc<dyn ServiceCatalog>,
}

impl NearbyLocator {
    pub fn new(catalog: Arc<dyn ServiceCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &dyn ServiceCatalog {
        self.catalog.as_ref()
    }

    /// Every catalog location within the radius, nearest first
    pub fn find_nearby(&self, origin_lat: f64, origin_lon: f64, radius_miles: f64) -> Vec<RankedResult> {
        find_nearby(self.catalog.locations(), origin_lat, origin_lon, radius_miles)
    }

    /// Filtered and optionally limited nearby search
    ///
    /// With empty filters and no limit this yields exactly what
    /// [`NearbyLocator::find_nearby`] does.
    pub fn search(
        &self,
        origin_lat: f64,
        origin_lon: f64,
        radius_miles: f64,
        filters: &SearchFilters,
        limit: Option<usize>,
    ) -> SearchOutcome {
        // The box assumes a valid origin; anything else goes straight to Haversine
        let bbox = is_valid_origin(origin_lat, origin_lon)
            .then(|| calculate_bounding_box(origin_lat, origin_lon, radius_miles));

        let mut results: Vec<RankedResult> = self
            .catalog
            .locations()
            .iter()
            // Stage 1: cheap geospatial pre-filter
            .filter(|location| {
                bbox.as_ref()
                    .map(|bbox| is_within_bounding_box(location.latitude, location.longitude, bbox))
                    .unwrap_or(true)
            })
            // Stage 2: attribute filters
            .filter(|location| matches_filters(location, filters))
            // Stage 3: exact radius check
            .filter_map(|location| rank_within(location, origin_lat, origin_lon, radius_miles))
            .collect();

        // Stage 4
        sort_nearest_first(&mut results);

        let total_matches = results.len();
        if let Some(limit) = limit {
            results.truncate(limit);
        }

        tracing::debug!(
            "Nearby search at ({}, {}) within {}mi matched {} of {} locations",
            origin_lat,
            origin_lon,
            radius_miles,
            total_matches,
            self.catalog.len()
        );

        SearchOutcome {
            results,
            total_matches,
        }
    }
}
