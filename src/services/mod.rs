// Service exports
pub mod cache;
pub mod catalog;
pub mod postal;
pub mod postgres;

pub use cache::{CacheKey, CachedSearch, SearchCache};
pub use catalog::{CatalogError, InMemoryCatalog, ServiceCatalog};
pub use postal::{normalize_postal_code, PostalCodeLookup, PostalError, StaticPostalCodes};
pub use postgres::{PostgresCatalogStore, StoreError};
