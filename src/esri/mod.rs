//! Esri ArcGIS REST client
//!
//! This module provides the HTTP plumbing shared by every provider call:
//! token handling, a single timed attempt per call, HTTP status and Esri
//! error-envelope mapping, and JSON decoding into the wire types.
//! The per-service request building lives in the submodules.

mod demographics;
mod geocoding;
mod places;
mod routing;
pub mod wire;

use std::time::{Duration, Instant};

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::EsriConfig;
use crate::{LocationError, Result};

/// Provider calls slower than this are logged as warnings
const SLOW_RESPONSE: Duration = Duration::from_secs(5);

/// Esri error codes that mean the token is missing, invalid or expired
const AUTH_ERROR_CODES: [i64; 4] = [401, 403, 498, 499];

/// ArcGIS REST client implementing every service trait
#[derive(Clone)]
pub struct EsriClient {
    /// HTTP client
    client: Client,
    /// ArcGIS API key
    api_key: Option<String>,
    geocoding_url: String,
    places_url: String,
    demographics_url: String,
    routing_url: String,
}

impl EsriClient {
    /// Create a new client from the provider configuration
    pub fn new(config: &EsriConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("location-intelligence/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LocationError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            geocoding_url: trim_base(&config.geocoding_url),
            places_url: trim_base(&config.places_url),
            demographics_url: trim_base(&config.demographics_url),
            routing_url: trim_base(&config.routing_url),
        })
    }

    fn token(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            LocationError::authentication("No ArcGIS API key configured for provider calls")
        })
    }

    /// Perform one GET against the provider and decode the body.
    ///
    /// `f=json` and the token are appended to `params`. The call is attempted
    /// exactly once.
    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let token = self.token()?;
        let request_start = Instant::now();

        debug!("Esri {} request to {}", operation, url);

        let response = self
            .client
            .get(url)
            .query(params)
            .query(&[("f", "json"), ("token", token)])
            .send()
            .await
            .map_err(|e| {
                let err = LocationError::from(e);
                warn!(
                    "Esri {} request failed after {:.3}s: {}",
                    operation,
                    request_start.elapsed().as_secs_f64(),
                    err
                );
                err
            })?;

        let status = response.status();
        let body = response.text().await?;
        let elapsed = request_start.elapsed();

        debug!(
            "Esri {} response: {} in {:.3}s",
            operation,
            status,
            elapsed.as_secs_f64()
        );

        if elapsed > SLOW_RESPONSE {
            warn!(
                "Slow Esri {} response: {:.3}s",
                operation,
                elapsed.as_secs_f64()
            );
        }

        check_status(operation, status)?;

        let value: Value = serde_json::from_str(&body).map_err(|e| {
            error!("Esri {} returned invalid JSON: {}", operation, e);
            LocationError::mapping(format!("Invalid JSON from Esri {operation}: {e}"))
        })?;

        check_error_envelope(operation, &value)?;

        let decoded = serde_json::from_value(value).map_err(|e| {
            error!("Unexpected Esri {} response shape: {}", operation, e);
            LocationError::mapping(format!("Unexpected Esri {operation} response: {e}"))
        })?;

        info!(
            "Esri {} request succeeded in {:.3}s",
            operation,
            elapsed.as_secs_f64()
        );

        Ok(decoded)
    }
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Map transport-level HTTP statuses
fn check_status(operation: &str, status: StatusCode) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }

    match status.as_u16() {
        401 | 403 => {
            error!("Esri {} authentication failed (HTTP {})", operation, status);
            Err(LocationError::authentication(format!(
                "Esri rejected the API key (HTTP {})",
                status.as_u16()
            )))
        }
        429 => {
            warn!("Esri {} rate limit exceeded (HTTP 429)", operation);
            Err(LocationError::upstream("Esri rate limit exceeded"))
        }
        _ => {
            warn!("Esri {} HTTP error: {}", operation, status);
            Err(LocationError::upstream(format!(
                "Esri {operation} failed with status: {} - {}",
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            )))
        }
    }
}

/// Esri reports most failures as HTTP 200 with an `error` object
fn check_error_envelope(operation: &str, value: &Value) -> Result<()> {
    let Some(error_value) = value.get("error") else {
        return Ok(());
    };

    let envelope: wire::EsriError = serde_json::from_value(error_value.clone())
        .map_err(|e| LocationError::mapping(format!("Malformed Esri error object: {e}")))?;

    warn!(
        "Esri {} reported error {}: {}",
        operation, envelope.code, envelope.message
    );

    Err(map_esri_error(&envelope))
}

/// Translate a provider error code into the service taxonomy
pub(crate) fn map_esri_error(err: &wire::EsriError) -> LocationError {
    let detail = err.describe();

    if AUTH_ERROR_CODES.contains(&err.code) {
        return LocationError::authentication(detail);
    }

    match err.code {
        404 => LocationError::not_found(detail),
        400 if err.reports_no_match() => LocationError::not_found(detail),
        400 => LocationError::validation(detail),
        _ => LocationError::upstream(detail),
    }
}
