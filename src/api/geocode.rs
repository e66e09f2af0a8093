//! Geocoding endpoints.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::state::AppState;
use crate::LocationError;
use crate::models::{
    BatchGeocodeItem, Coordinates, GeocodeRequest, GeocodeResult, ReverseGeocodeResult,
};
use crate::services::batch_geocode;

/// `POST /geocode`
pub async fn geocode(
    State(state): State<AppState>,
    payload: Result<Json<GeocodeRequest>, JsonRejection>,
) -> Result<Json<GeocodeResult>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let result = state.geocoder.geocode(&request).await?;
    Ok(Json(result))
}

/// `GET /geocode?address=..&country=..`
pub async fn geocode_query(
    State(state): State<AppState>,
    query: Result<Query<GeocodeRequest>, QueryRejection>,
) -> Result<Json<GeocodeResult>, ApiError> {
    let Query(request) = query?;
    request.validate()?;

    let result = state.geocoder.geocode(&request).await?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct ReverseGeocodeQuery {
    lat: f64,
    lon: f64,
}

/// `GET /reverse-geocode?lat=..&lon=..`
pub async fn reverse_geocode(
    State(state): State<AppState>,
    query: Result<Query<ReverseGeocodeQuery>, QueryRejection>,
) -> Result<Json<ReverseGeocodeResult>, ApiError> {
    let Query(query) = query?;
    let location = Coordinates::new(query.lat, query.lon);
    location.validate()?;

    let result = state.geocoder.reverse_geocode(location).await?;
    Ok(Json(result))
}

/// Batch body: `{"addresses": [...]}` or a bare list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum BatchGeocodeRequest {
    Wrapped { addresses: Vec<String> },
    Bare(Vec<String>),
}

impl BatchGeocodeRequest {
    fn into_addresses(self) -> Vec<String> {
        match self {
            BatchGeocodeRequest::Wrapped { addresses } | BatchGeocodeRequest::Bare(addresses) => {
                addresses
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BatchGeocodeResponse {
    pub results: Vec<BatchGeocodeItem>,
    pub total_processed: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// `POST /batch-geocode`
pub async fn batch(
    State(state): State<AppState>,
    payload: Result<Json<BatchGeocodeRequest>, JsonRejection>,
) -> Result<Json<BatchGeocodeResponse>, ApiError> {
    let Json(request) = payload?;
    let addresses = request.into_addresses();

    if addresses.is_empty() {
        return Err(LocationError::validation("Address list cannot be empty").into());
    }
    if addresses.len() > state.batch.max_addresses {
        return Err(LocationError::validation(format!(
            "A batch cannot contain more than {} addresses, got: {}",
            state.batch.max_addresses,
            addresses.len()
        ))
        .into());
    }

    let results = batch_geocode(state.geocoder.as_ref(), addresses, state.batch.concurrency).await;
    let succeeded = results.iter().filter(|item| item.is_success()).count();

    Ok(Json(BatchGeocodeResponse {
        total_processed: results.len(),
        succeeded,
        failed: results.len() - succeeded,
        results,
    }))
}
