use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::SearchFilters;

/// Request to find detailing services near an origin
///
/// The origin is either an explicit coordinate or a postal code; explicit
/// coordinates win when both are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NearbySearchRequest {
    #[serde(default, alias = "postal_code", alias = "zip", rename = "postalCode")]
    pub postal_code: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    #[serde(default)]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    #[serde(default)]
    pub longitude: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(default, alias = "radius_miles", alias = "radius", rename = "radiusMiles")]
    pub radius_miles: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub keyword: Option<String>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<usize>,
}

impl NearbySearchRequest {
    pub fn filters(&self) -> SearchFilters {
        SearchFilters {
            category: self.category.clone(),
            keyword: self.keyword.clone(),
        }
    }

    /// First numeric field holding NaN or an infinity
    ///
    /// Range validation cannot catch NaN since every comparison with it is
    /// false, and query strings happily parse `NaN` and `inf`.
    pub fn non_finite_field(&self) -> Option<&'static str> {
        [
            ("latitude", self.latitude),
            ("longitude", self.longitude),
            ("radiusMiles", self.radius_miles),
        ]
        .into_iter()
        .find(|(_, value)| value.map_or(false, |v| !v.is_finite()))
        .map(|(name, _)| name)
    }
}
