use serde::{Deserialize, Serialize};

/// A point on the globe in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Catalog entry for a bookable detailing service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceLocation {
    pub id: String,
    pub title: String,
    pub category: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "providerName", default)]
    pub provider_name: Option<String>,
    #[serde(rename = "priceFrom", default)]
    pub price_from: Option<f64>,
}

impl ServiceLocation {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// A service location annotated with its distance from a search origin
///
/// Produced only by a nearby search. The distance depends on the origin, so it
/// lives here rather than on [`ServiceLocation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    #[serde(flatten)]
    pub location: ServiceLocation,
    #[serde(rename = "distanceMiles")]
    pub distance_miles: f64,
}

/// Optional attribute filters applied on top of the radius check
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub keyword: Option<String>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.keyword.is_none()
    }
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}
