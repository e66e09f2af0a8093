//! HTTP route layer.

mod enrichment;
mod error;
mod geocode;
mod health;
mod places;
mod state;

use axum::{
    Router,
    routing::{get, post},
};

pub use self::error::ApiError;
pub use self::geocode::{BatchGeocodeRequest, BatchGeocodeResponse};
pub use self::state::AppState;

/// Build the complete API router.
///
/// # Route Structure
///
/// - `GET /` - Service info
/// - `GET /health` - Health check
/// - `GET /api/v1/health` - Health check
/// - `POST|GET /api/v1/geocode` - Address to coordinates
/// - `GET /api/v1/reverse-geocode` - Coordinates to address
/// - `POST /api/v1/batch-geocode` - Many addresses, one result or error each
/// - `POST /api/v1/places/search` - Places of a category near a point
/// - `GET /api/v1/places/categories` - Known place categories
/// - `POST /api/v1/demographics` - Demographic variables for a study area
/// - `POST /api/v1/route` - Route through two or more stops
pub fn router(state: AppState) -> Router {
    let api_v1 = Router::new()
        .route("/health", get(health::health_check))
        .route("/geocode", post(geocode::geocode).get(geocode::geocode_query))
        .route("/reverse-geocode", get(geocode::reverse_geocode))
        .route("/batch-geocode", post(geocode::batch))
        .route("/places/search", post(places::search))
        .route("/places/categories", get(places::categories))
        .route("/demographics", post(enrichment::demographics))
        .route("/route", post(enrichment::route));

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .nest("/api/v1", api_v1)
        .with_state(state)
}
