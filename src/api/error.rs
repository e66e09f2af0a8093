//! API error type and response formatting.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::LocationError;

/// Service failure on its way to becoming an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub LocationError);

/// JSON error response body.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
    status_code: u16,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            LocationError::Validation { .. } => StatusCode::BAD_REQUEST,
            LocationError::NotFound { .. } => StatusCode::NOT_FOUND,
            LocationError::Authentication { .. }
            | LocationError::Upstream { .. }
            | LocationError::Mapping { .. } => StatusCode::BAD_GATEWAY,
            LocationError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            LocationError::Config { .. } | LocationError::Io { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<LocationError> for ApiError {
    fn from(err: LocationError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(LocationError::validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(LocationError::validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if self.0.is_upstream() {
            tracing::error!(error = %self.0, code = self.0.code(), "location provider call failed");
        } else if status.is_server_error() {
            tracing::error!(error = %self.0, code = self.0.code(), "request failed");
        } else {
            tracing::debug!(error = %self.0, "request rejected");
        }

        let body = ErrorResponse {
            error: self.0.code(),
            message: self.0.user_message(),
            status_code: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}
