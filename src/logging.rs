//! Tracing subscriber setup driven by [`LoggingConfig`]

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::LoggingConfig;

/// Install the global subscriber. `RUST_LOG` takes precedence over the configured level.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if matches!(config.output.as_str(), "console" | "both") {
        let console = if config.format == "json" {
            fmt::layer().json().boxed()
        } else {
            fmt::layer().with_target(true).boxed()
        };
        layers.push(console);
    }

    if matches!(config.output.as_str(), "file" | "both") {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.file_path)
            .with_context(|| format!("Failed to open log file {}", config.file_path))?;
        let file_layer = fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file));
        let file_layer = if config.format == "json" {
            file_layer.json().boxed()
        } else {
            file_layer.boxed()
        };
        layers.push(file_layer);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
