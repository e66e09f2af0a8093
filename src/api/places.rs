//! Place search endpoints.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use super::error::ApiError;
use super::state::AppState;
use crate::models::{Place, PlaceCategory, PlaceSearchRequest};

/// `POST /places/search`
pub async fn search(
    State(state): State<AppState>,
    payload: Result<Json<PlaceSearchRequest>, JsonRejection>,
) -> Result<Json<Vec<Place>>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let places = state.places.search_places(&request).await?;
    Ok(Json(places))
}

/// `GET /places/categories`
pub async fn categories() -> Json<Vec<&'static str>> {
    Json(PlaceCategory::names())
}
