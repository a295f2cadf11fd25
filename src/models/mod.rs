// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{BoundingBox, Coordinate, RankedResult, SearchFilters, ServiceLocation};
pub use requests::NearbySearchRequest;
pub use responses::{ErrorResponse, HealthResponse, NearbySearchResponse, PostalCodeResponse};
