use crate::models::ServiceLocation;
use crate::services::catalog::{CatalogError, InMemoryCatalog};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

/// PostgreSQL store for service listings
///
/// The relational database is the sync target for listings published in the
/// marketplace. Nearby search never queries it directly: the full table is
/// loaded into an [`InMemoryCatalog`] at startup.
pub struct PostgresCatalogStore {
    pool: PgPool,
}

impl PostgresCatalogStore {
    /// Create a new store from a connection string and run migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL catalog store");

        Self::new(
            url,
            max_connections.unwrap_or(5),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Fetch every listing in a stable order
    pub async fn fetch_all(&self) -> Result<Vec<ServiceLocation>, StoreError> {
        let query = r#"
            SELECT id, title, category, address, latitude, longitude, provider_name, price_from
            FROM service_locations
            ORDER BY created_at ASC, id ASC
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let locations = rows
            .iter()
            .map(|row| ServiceLocation {
                id: row.get("id"),
                title: row.get("title"),
                category: row.get("category"),
                address: row.get("address"),
                latitude: row.get("latitude"),
                longitude: row.get("longitude"),
                provider_name: row.get("provider_name"),
                price_from: row.get("price_from"),
            })
            .collect::<Vec<_>>();

        tracing::debug!("Fetched {} service locations from PostgreSQL", locations.len());

        Ok(locations)
    }

    /// Load the whole table as an immutable catalog
    pub async fn load_catalog(&self) -> Result<InMemoryCatalog, CatalogError> {
        let locations = self.fetch_all().await?;
        InMemoryCatalog::new(locations)
    }

    /// Insert or update a listing
    pub async fn upsert(&self, location: &ServiceLocation) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO service_locations
                (id, title, category, address, latitude, longitude, provider_name, price_from, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
            ON CONFLICT (id)
            DO UPDATE SET
                title = EXCLUDED.title,
                category = EXCLUDED.category,
                address = EXCLUDED.address,
                latitude = EXCLUDED.latitude,
                longitude = EXCLUDED.longitude,
                provider_name = EXCLUDED.provider_name,
                price_from = EXCLUDED.price_from,
                updated_at = EXCLUDED.updated_at
        "#;

        sqlx::query(query)
            .bind(&location.id)
            .bind(&location.title)
            .bind(&location.category)
            .bind(&location.address)
            .bind(location.latitude)
            .bind(location.longitude)
            .bind(&location.provider_name)
            .bind(location.price_from)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Upserted service location {}", location.id);

        Ok(())
    }

    /// Mirror a batch of listings into the table, returning how many were written
    pub async fn sync(&self, locations: &[ServiceLocation]) -> Result<usize, StoreError> {
        for location in locations {
            self.upsert(location).await?;
        }

        tracing::info!("Synced {} service locations into PostgreSQL", locations.len());

        Ok(locations.len())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
