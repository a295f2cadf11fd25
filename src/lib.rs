//! Detailing Nearby - geo matching for the vehicle detailing marketplace
//!
//! Resolves a search origin (coordinates or a postal code), then ranks the
//! service catalog by great-circle distance within a radius, nearest first.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{find_nearby, haversine_miles, NearbyLocator, SearchOutcome};
pub use models::{Coordinate, RankedResult, SearchFilters, ServiceLocation};
pub use services::{InMemoryCatalog, PostalCodeLookup, PostalError, ServiceCatalog, StaticPostalCodes};
