//! Location Intelligence API server.

use std::path::PathBuf;

use clap::Parser;

use location_intelligence::{LocationConfig, logging, web};

/// Location intelligence API on top of Esri ArcGIS services.
#[derive(Parser, Debug)]
#[command(name = "location-intelligence")]
#[command(about = "Geocoding, places, demographics and routing API backed by Esri ArcGIS")]
#[command(long_about = None)]
struct Args {
    /// Path to a TOML config file.
    #[arg(short, long, env = "LOCINTEL_CONFIG")]
    config: Option<PathBuf>,

    /// Override the bind address (e.g. 127.0.0.1:8000).
    #[arg(long)]
    bind: Option<String>,

    /// Path to .env file (optional).
    #[arg(long, env = "DOTENV_PATH", default_value = ".env")]
    dotenv: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.dotenv.exists() {
        dotenvy::from_path(&args.dotenv)?;
        eprintln!("Loaded environment from {}", args.dotenv.display());
    }

    let mut config = LocationConfig::load_from_path(args.config)?;
    if let Some(bind) = args.bind {
        config.server.bind_addr = bind;
    }

    logging::init(&config.logging)?;
    tracing::info!(
        bind_addr = %config.server.bind_addr,
        geocoding_url = %config.esri.geocoding_url,
        api_key_configured = config.esri.api_key.is_some(),
        "configuration loaded"
    );
    if config.esri.api_key.is_none() {
        tracing::warn!(
            "No ArcGIS API key configured; every provider call will fail with an authentication error"
        );
    }

    web::run(config).await
}
