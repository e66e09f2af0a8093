//! Health and service info endpoints.

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

const SERVICE_NAME: &str = "location-intelligence-api";

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    timestamp: DateTime<Utc>,
}

/// Health check endpoint.
///
/// Never calls the provider, so it stays green while Esri is unreachable.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
        version: crate::VERSION,
        timestamp: Utc::now(),
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    message: &'static str,
    version: &'static str,
    health: &'static str,
    dashboard: &'static str,
}

pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Location Intelligence API",
        version: crate::VERSION,
        health: "/api/v1/health",
        dashboard: "/index.html",
    })
}
