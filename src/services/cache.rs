use crate::models::{RankedResult, SearchFilters};
use std::sync::Arc;
use std::time::Duration;

/// Cached outcome of a nearby search
#[derive(Debug, Clone, PartialEq)]
pub struct CachedSearch {
    pub results: Arc<Vec<RankedResult>>,
    pub total_matches: usize,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Key for a nearby search
    ///
    /// Origin and radius are keyed by their exact bit patterns. Cached
    /// distances belong to one origin, so nearby-but-different origins must
    /// never share an entry.
    pub fn nearby(
        origin_lat: f64,
        origin_lon: f64,
        radius_miles: f64,
        filters: &SearchFilters,
        limit: Option<usize>,
    ) -> String {
        format!(
            "nearby:{:016x}:{:016x}:{:016x}:{}:{}:{}",
            origin_lat.to_bits(),
            origin_lon.to_bits(),
            radius_miles.to_bits(),
            normalize(filters.category.as_deref()),
            normalize(filters.keyword.as_deref()),
            limit.map(|l| l.to_string()).unwrap_or_else(|| "all".to_string()),
        )
    }
}

fn normalize(value: Option<&str>) -> String {
    value.map(|v| v.trim().to_lowercase()).unwrap_or_default()
}

/// In-process cache of nearby search results
///
/// The catalog does not change while the process runs, so entries only
/// expire by TTL or capacity.
#[derive(Clone)]
pub struct SearchCache {
    inner: moka::future::Cache<String, CachedSearch>,
}

impl SearchCache {
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let inner = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner }
    }

    pub async fn get(&self, key: &str) -> Option<CachedSearch> {
        let hit = self.inner.get(key).await;
        if hit.is_some() {
            tracing::trace!("Search cache hit: {}", key);
        } else {
            tracing::trace!("Search cache miss: {}", key);
        }
        hit
    }

    pub async fn insert(&self, key: String, value: CachedSearch) {
        self.inner.insert(key, value).await;
    }
}
