//! Demographics and routing endpoints.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use super::error::ApiError;
use super::state::AppState;
use crate::models::{DemographicsRequest, DemographicsResult, RouteRequest, RouteResult};

/// `POST /demographics`
pub async fn demographics(
    State(state): State<AppState>,
    payload: Result<Json<DemographicsRequest>, JsonRejection>,
) -> Result<Json<DemographicsResult>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let result = state.demographics.demographics(&request).await?;
    Ok(Json(result))
}

/// `POST /route`
pub async fn route(
    State(state): State<AppState>,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> Result<Json<RouteResult>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let result = state.routing.route(&request).await?;
    Ok(Json(result))
}
