use serde::{Deserialize, Serialize};
use crate::models::domain::{Coordinate, RankedResult};

/// Response for the nearby search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbySearchResponse {
    #[serde(rename = "searchId")]
    pub search_id: String,
    pub origin: Coordinate,
    #[serde(rename = "radiusMiles")]
    pub radius_miles: f64,
    pub results: Vec<RankedResult>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

/// Resolved postal code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostalCodeResponse {
    #[serde(rename = "postalCode")]
    pub postal_code: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(rename = "catalogSize")]
    pub catalog_size: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(error: &str, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            status_code,
        }
    }
}
