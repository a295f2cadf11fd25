use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use detailing_nearby::config::{CatalogSource, Settings};
use detailing_nearby::core::NearbyLocator;
use detailing_nearby::models::Coordinate;
use detailing_nearby::routes::{self, AppState};
use detailing_nearby::services::{
    CatalogError, InMemoryCatalog, PostgresCatalogStore, SearchCache, ServiceCatalog, StaticPostalCodes,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str, format: &str) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

async fn load_catalog(
    settings: &Settings,
) -> Result<(InMemoryCatalog, Option<Arc<PostgresCatalogStore>>), CatalogError> {
    let catalog = &settings.catalog;

    match catalog.source {
        CatalogSource::Seed => {
            info!("Using built-in seed catalog");
            Ok((InMemoryCatalog::seeded(), None))
        }
        CatalogSource::File => {
            let path = catalog.path.as_deref().unwrap_or("config/catalog.json");
            Ok((InMemoryCatalog::from_json_file(path)?, None))
        }
        CatalogSource::Postgres => {
            let url = catalog.database_url.as_deref().unwrap_or("postgres://localhost:5432/detailing");
            let store = PostgresCatalogStore::from_settings(
                url,
                catalog.max_connections,
                catalog.min_connections,
                catalog.acquire_timeout_secs,
                catalog.idle_timeout_secs,
            )
            .await?;

            if let Some(path) = catalog.sync_path.as_deref() {
                let listings = InMemoryCatalog::from_json_file(path)?;
                store.sync(listings.locations()).await?;
            }

            let loaded = store.load_catalog().await?;
            Ok((loaded, Some(Arc::new(store))))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting detailing nearby-search service...");

    let (catalog, store) = load_catalog(&settings).await.map_err(|e| {
        error!("Failed to load service catalog: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    info!("Service catalog ready ({} locations)", catalog.len());

    let extra_codes = settings
        .postal
        .extra
        .iter()
        .map(|(code, entry)| (code.clone(), Coordinate::new(entry.latitude, entry.longitude)));

    let postal = StaticPostalCodes::builtin().with_overrides(extra_codes).map_err(|e| {
        error!("Invalid postal code in configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!("Postal code table ready ({} codes)", postal.len());

    let cache = if settings.cache.enabled {
        info!(
            "Search cache enabled ({} entries, TTL: {}s)",
            settings.cache.max_entries, settings.cache.ttl_secs
        );
        Some(SearchCache::new(settings.cache.max_entries, settings.cache.ttl_secs))
    } else {
        info!("Search cache disabled");
        None
    };

    let app_state = AppState {
        locator: NearbyLocator::new(Arc::new(catalog)),
        postal: Arc::new(postal),
        cache,
        search: settings.search.clone(),
        store,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .configure(routes::configure_payload_errors)
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
