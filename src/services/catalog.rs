use crate::models::ServiceLocation;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while building a service catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid catalog JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Duplicate service id: {0}")]
    DuplicateId(String),

    #[error("Catalog store error: {0}")]
    StoreError(#[from] crate::services::postgres::StoreError),
}

/// Read access to the set of known service locations
///
/// Implementations must return locations in a stable order; nearby search
/// relies on it to break distance ties.
pub trait ServiceCatalog: Send + Sync {
    fn locations(&self) -> &[ServiceLocation];

    fn get(&self, id: &str) -> Option<&ServiceLocation>;

    fn len(&self) -> usize {
        self.locations().len()
    }

    fn is_empty(&self) -> bool {
        self.locations().is_empty()
    }
}

/// Immutable catalog held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    locations: Vec<ServiceLocation>,
    index: HashMap<String, usize>,
}

impl InMemoryCatalog {
    /// Build a catalog, keeping the given order
    pub fn new(locations: Vec<ServiceLocation>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(locations.len());
        for (position, location) in locations.iter().enumerate() {
            if index.insert(location.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(location.id.clone()));
            }
        }

        Ok(Self { locations, index })
    }

    /// Load a JSON array of service locations
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_json_str(&raw)?;
        tracing::info!(
            "Loaded {} service locations from {}",
            catalog.locations.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let locations: Vec<ServiceLocation> = serde_json::from_str(raw)?;
        Self::new(locations)
    }

    /// Built-in listings used until a real backing store is configured
    pub fn seeded() -> Self {
        let locations = seed_locations();
        let index = locations
            .iter()
            .enumerate()
            .map(|(position, location)| (location.id.clone(), position))
            .collect();

        Self { locations, index }
    }
}

impl ServiceCatalog for InMemoryCatalog {
    fn locations(&self) -> &[ServiceLocation] {
        &self.locations
    }

    fn get(&self, id: &str) -> Option<&ServiceLocation> {
        self.index.get(id).map(|&position| &self.locations[position])
    }
}

#[allow(clippy::too_many_arguments)]
fn seed(
    id: &str,
    title: &str,
    category: &str,
    address: &str,
    provider_name: &str,
    price_from: f64,
    latitude: f64,
    longitude: f64,
) -> ServiceLocation {
    ServiceLocation {
        id: id.to_string(),
        title: title.to_string(),
        category: category.to_string(),
        address: address.to_string(),
        latitude,
        longitude,
        provider_name: Some(provider_name.to_string()),
        price_from: Some(price_from),
    }
}

fn seed_locations() -> Vec<ServiceLocation> {
    vec![
        seed(
            "svc-001",
            "Premium Full Detail",
            "full",
            "1307 N Commerce Dr, Saratoga Springs, UT 84045",
            "Lakeside Auto Spa",
            199.0,
            40.3469,
            -111.9047,
        ),
        seed(
            "svc-002",
            "Ceramic Coating Package",
            "coating",
            "3600 N Digital Dr, Lehi, UT 84043",
            "Silicon Slopes Shine",
            899.0,
            40.3916,
            -111.8508,
        ),
        seed(
            "svc-003",
            "Interior Deep Clean",
            "interior",
            "12 E Main St, American Fork, UT 84003",
            "Timp Detail Works",
            129.0,
            40.3769,
            -111.7958,
        ),
        seed(
            "svc-004",
            "Express Exterior Wash & Wax",
            "exterior",
            "1800 E Pony Express Pkwy, Eagle Mountain, UT 84005",
            "Pony Express Detailing",
            59.0,
            40.3141,
            -112.0069,
        ),
        seed(
            "svc-005",
            "Paint Correction",
            "paint",
            "575 E University Pkwy, Orem, UT 84057",
            "Utah Valley Paintworks",
            449.0,
            40.2969,
            -111.6946,
        ),
        seed(
            "svc-006",
            "Mobile Detail (We Come To You)",
            "mobile",
            "Serving Provo, UT 84601",
            "Cougar Mobile Detail",
            149.0,
            40.2338,
            -111.6585,
        ),
        seed(
            "svc-007",
            "Headlight Restoration",
            "exterior",
            "12300 S Minuteman Dr, Draper, UT 84020",
            "Point of the Mountain Auto Care",
            79.0,
            40.5247,
            -111.8638,
        ),
        seed(
            "svc-008",
            "Showroom Full Detail",
            "full",
            "255 S State St, Salt Lake City, UT 84111",
            "Capitol City Detailing",
            249.0,
            40.7608,
            -111.8910,
        ),
    ]
}
