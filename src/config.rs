//! Configuration management for the location intelligence service
//!
//! Handles loading configuration from files and environment variables,
//! and validates every setting before the server starts.

use crate::LocationError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Legacy environment variable for the ArcGIS credential
pub const ARCGIS_API_KEY_ENV: &str = "ARCGIS_API_KEY";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Esri ArcGIS provider settings
    #[serde(default)]
    pub esri: EsriConfig,
    /// Batch geocoding settings
    #[serde(default)]
    pub batch: BatchConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the API listens on
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Directory holding the static dashboard
    #[serde(default = "default_dashboard_dir")]
    pub dashboard_dir: String,
    /// Maximum accepted request body size
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Esri ArcGIS provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EsriConfig {
    /// ArcGIS API key, sent as `token` on every provider call
    pub api_key: Option<String>,
    /// World geocoding service
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    /// Service used for category (POI) search
    #[serde(default = "default_geocoding_url")]
    pub places_url: String,
    /// GeoEnrichment service
    #[serde(default = "default_demographics_url")]
    pub demographics_url: String,
    /// World route service
    #[serde(default = "default_routing_url")]
    pub routing_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Batch geocoding settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Largest accepted batch
    #[serde(default = "default_batch_max_addresses")]
    pub max_addresses: usize,
    /// Number of provider calls in flight at once; 1 is strictly sequential
    #[serde(default = "default_batch_concurrency")]
    pub concurrency: usize,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Log output destination (console, file, both)
    #[serde(default = "default_log_output")]
    pub output: String,
    /// Log file path
    #[serde(default = "default_log_file_path")]
    pub file_path: String,
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_dashboard_dir() -> String {
    "dashboard".to_string()
}

fn default_max_body_bytes() -> usize {
    256 * 1024
}

fn default_geocoding_url() -> String {
    "https://geocode.arcgis.com/arcgis/rest/services/World/GeocodeServer".to_string()
}

fn default_demographics_url() -> String {
    "https://geoenrich.arcgis.com/arcgis/rest/services/World/GeoenrichmentServer".to_string()
}

fn default_routing_url() -> String {
    "https://route-api.arcgis.com/arcgis/rest/services/World/Route/NAServer/Route_World"
        .to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_batch_max_addresses() -> usize {
    100
}

fn default_batch_concurrency() -> usize {
    4
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_log_output() -> String {
    "console".to_string()
}

fn default_log_file_path() -> String {
    "location_api.log".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            dashboard_dir: default_dashboard_dir(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for EsriConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            geocoding_url: default_geocoding_url(),
            places_url: default_geocoding_url(),
            demographics_url: default_demographics_url(),
            routing_url: default_routing_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_addresses: default_batch_max_addresses(),
            concurrency: default_batch_concurrency(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            output: default_log_output(),
            file_path: default_log_file_path(),
        }
    }
}

impl LocationConfig {
    /// Load configuration from the default file location and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // LOCINTEL_ESRI__API_KEY, LOCINTEL_SERVER__BIND_ADDR, ...
        builder = builder.add_source(
            Environment::with_prefix("LOCINTEL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: LocationConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        if config.esri.api_key.is_none() {
            config.esri.api_key = std::env::var(ARCGIS_API_KEY_ENV).ok();
        }

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("location-intelligence").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self
            .esri
            .api_key
            .as_deref()
            .is_some_and(|key| key.trim().is_empty())
        {
            self.esri.api_key = None;
        }
        if self.server.bind_addr.is_empty() {
            self.server.bind_addr = default_bind_addr();
        }
        if self.esri.geocoding_url.is_empty() {
            self.esri.geocoding_url = default_geocoding_url();
        }
        if self.esri.places_url.is_empty() {
            self.esri.places_url = self.esri.geocoding_url.clone();
        }
        if self.esri.demographics_url.is_empty() {
            self.esri.demographics_url = default_demographics_url();
        }
        if self.esri.routing_url.is_empty() {
            self.esri.routing_url = default_routing_url();
        }
        if self.esri.timeout_seconds == 0 {
            self.esri.timeout_seconds = default_timeout();
        }
        if self.batch.max_addresses == 0 {
            self.batch.max_addresses = default_batch_max_addresses();
        }
        if self.batch.concurrency == 0 {
            self.batch.concurrency = default_batch_concurrency();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.logging.output.is_empty() {
            self.logging.output = default_log_output();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_urls()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.esri.timeout_seconds > 300 {
            return Err(
                LocationError::config("Esri request timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.batch.max_addresses > 1000 {
            return Err(LocationError::config("Batch size cannot exceed 1000 addresses").into());
        }

        if self.batch.concurrency > 32 {
            return Err(LocationError::config("Batch concurrency cannot exceed 32").into());
        }

        if self.server.max_body_bytes < 1024 {
            return Err(
                LocationError::config("Request body limit must be at least 1024 bytes").into(),
            );
        }

        Ok(())
    }

    /// Provider URLs must be absolute HTTP(S) URLs
    fn validate_urls(&self) -> Result<()> {
        let urls = [
            ("geocoding_url", &self.esri.geocoding_url),
            ("places_url", &self.esri.places_url),
            ("demographics_url", &self.esri.demographics_url),
            ("routing_url", &self.esri.routing_url),
        ];

        for (name, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(LocationError::config(format!(
                    "Esri {name} must be a valid HTTP or HTTPS URL, got '{url}'"
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(LocationError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(LocationError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let valid_log_outputs = ["console", "file", "both"];
        if !valid_log_outputs.contains(&self.logging.output.as_str()) {
            return Err(LocationError::config(format!(
                "Invalid log output '{}'. Must be one of: {}",
                self.logging.output,
                valid_log_outputs.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
