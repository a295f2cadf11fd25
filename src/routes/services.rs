use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::config::SearchSettings;
use crate::core::NearbyLocator;
use crate::models::{
    Coordinate, ErrorResponse, HealthResponse, NearbySearchRequest, NearbySearchResponse,
    PostalCodeResponse,
};
use crate::services::{
    normalize_postal_code, CacheKey, CachedSearch, PostalCodeLookup, PostalError, PostgresCatalogStore,
    SearchCache,
};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub locator: NearbyLocator,
    pub postal: Arc<dyn PostalCodeLookup>,
    pub cache: Option<SearchCache>,
    pub search: SearchSettings,
    /// Backing store, present when the catalog was loaded from PostgreSQL
    pub store: Option<Arc<PostgresCatalogStore>>,
}

/// Configure all service-search routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/services/nearby", web::get().to(nearby_from_query))
        .route("/services/nearby", web::post().to(nearby_from_body))
        .route("/services/{id}", web::get().to(get_service))
        .route("/postal-codes/{code}", web::get().to(resolve_postal_code));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let catalog_size = state.locator.catalog().len();
    let store_ok = match &state.store {
        Some(store) => match store.health_check().await {
            Ok(ok) => ok,
            Err(e) => {
                tracing::warn!("Catalog store health check failed: {}", e);
                false
            }
        },
        None => true,
    };
    let status = if catalog_size > 0 && store_ok { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog_size,
        timestamp: chrono::Utc::now(),
    })
}

/// GET /api/v1/services/nearby?postalCode=84045&radiusMiles=5
async fn nearby_from_query(
    state: web::Data<AppState>,
    query: web::Query<NearbySearchRequest>,
) -> impl Responder {
    nearby(&state, query.into_inner()).await
}

/// Find services near an origin
///
/// POST /api/v1/services/nearby
///
/// Request body:
/// ```json
/// {
///   "postalCode": "84045",
///   "radiusMiles": 5,
///   "category": "interior",
///   "keyword": "ceramic",
///   "limit": 20
/// }
/// ```
/// `latitude`/`longitude` may be sent instead of `postalCode`.
async fn nearby_from_body(
    state: web::Data<AppState>,
    req: web::Json<NearbySearchRequest>,
) -> impl Responder {
    nearby(&state, req.into_inner()).await
}

async fn nearby(state: &AppState, req: NearbySearchRequest) -> HttpResponse {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for nearby search: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "validation_failed",
            errors.to_string(),
            400,
        ));
    }

    if let Some(field) = req.non_finite_field() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "validation_failed",
            format!("{} must be a finite number", field),
            400,
        ));
    }

    let radius_miles = req.radius_miles.unwrap_or(state.search.default_radius_miles);
    if radius_miles > state.search.max_radius_miles {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "validation_failed",
            format!("radiusMiles must be at most {}", state.search.max_radius_miles),
            400,
        ));
    }

    let limit = req.limit.unwrap_or(state.search.default_limit);
    if limit > state.search.max_limit {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "validation_failed",
            format!("limit must be at most {}", state.search.max_limit),
            400,
        ));
    }

    // Unresolved origins short-circuit before the locator runs
    let origin = match resolve_origin(state, &req) {
        Ok(origin) => origin,
        Err(response) => return response,
    };

    let filters = req.filters();
    let key = CacheKey::nearby(origin.latitude, origin.longitude, radius_miles, &filters, Some(limit));

    let cached = match &state.cache {
        Some(cache) => cache.get(&key).await,
        None => None,
    };

    let search = match cached {
        Some(hit) => hit,
        None => {
            let outcome = state.locator.search(
                origin.latitude,
                origin.longitude,
                radius_miles,
                &filters,
                Some(limit),
            );
            let fresh = CachedSearch {
                results: Arc::new(outcome.results),
                total_matches: outcome.total_matches,
            };
            if let Some(cache) = &state.cache {
                cache.insert(key, fresh.clone()).await;
            }
            fresh
        }
    };

    let response = NearbySearchResponse {
        search_id: uuid::Uuid::new_v4().to_string(),
        origin,
        radius_miles,
        results: search.results.as_ref().clone(),
        total_results: search.total_matches,
    };

    tracing::info!(
        "Returning {} services within {}mi of ({}, {}) ({} total matches)",
        response.results.len(),
        radius_miles,
        origin.latitude,
        origin.longitude,
        response.total_results
    );

    HttpResponse::Ok().json(response)
}

fn resolve_origin(state: &AppState, req: &NearbySearchRequest) -> Result<Coordinate, HttpResponse> {
    match (req.latitude, req.longitude, req.postal_code.as_deref()) {
        (Some(latitude), Some(longitude), _) => Ok(Coordinate::new(latitude, longitude)),
        (None, None, Some(code)) => state.postal.resolve(code).map_err(postal_error_response),
        (Some(_), None, _) | (None, Some(_), _) => Err(HttpResponse::BadRequest().json(ErrorResponse::new(
            "missing_origin",
            "latitude and longitude must be provided together",
            400,
        ))),
        (None, None, None) => Err(HttpResponse::BadRequest().json(ErrorResponse::new(
            "missing_origin",
            "Provide either postalCode or latitude and longitude",
            400,
        ))),
    }
}

fn postal_error_response(err: PostalError) -> HttpResponse {
    match err {
        PostalError::Invalid(_) => {
            HttpResponse::BadRequest().json(ErrorResponse::new("invalid_postal_code", err.to_string(), 400))
        }
        PostalError::NotFound(_) => {
            tracing::debug!("{}", err);
            HttpResponse::NotFound().json(ErrorResponse::new("postal_code_not_found", err.to_string(), 404))
        }
    }
}

/// GET /api/v1/postal-codes/{code}
async fn resolve_postal_code(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let code = path.into_inner();

    match state.postal.resolve(&code) {
        Ok(coordinate) => HttpResponse::Ok().json(PostalCodeResponse {
            postal_code: normalize_postal_code(&code).unwrap_or(code),
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        }),
        Err(e) => postal_error_response(e),
    }
}

/// GET /api/v1/services/{id}
async fn get_service(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match state.locator.catalog().get(&id) {
        Some(location) => HttpResponse::Ok().json(location),
        None => HttpResponse::NotFound().json(ErrorResponse::new(
            "service_not_found",
            format!("No service with id {}", id),
            404,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{InMemoryCatalog, StaticPostalCodes};

    fn create_state() -> AppState {
        AppState {
            locator: NearbyLocator::new(Arc::new(InMemoryCatalog::seeded())),
            postal: Arc::new(StaticPostalCodes::builtin()),
            cache: None,
            search: SearchSettings::default(),
            store: None,
        }
    }

    #[test]
    fn test_explicit_coordinates_win_over_postal_code() {
        let state = create_state();
        let req = NearbySearchRequest {
            postal_code: Some("84043".to_string()),
            latitude: Some(1.0),
            longitude: Some(2.0),
            ..Default::default()
        };

        let origin = resolve_origin(&state, &req).unwrap();
        assert_eq!(origin, Coordinate::new(1.0, 2.0));
    }

    #[test]
    fn test_postal_code_origin() {
        let state = create_state();
        let req = NearbySearchRequest {
            postal_code: Some("84045".to_string()),
            ..Default::default()
        };

        let origin = resolve_origin(&state, &req).unwrap();
        assert_eq!(origin, Coordinate::new(40.3469, -111.9047));
    }

    #[test]
    fn test_half_coordinate_is_rejected() {
        let state = create_state();
        let req = NearbySearchRequest {
            latitude: Some(40.0),
            ..Default::default()
        };

        let response = resolve_origin(&state, &req).unwrap_err();
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
