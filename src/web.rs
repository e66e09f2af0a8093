use anyhow::{Context, Result};
use axum::Router;
use axum::http::Request;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Level;

use crate::api::{self, AppState};
use crate::config::LocationConfig;
use crate::esri::EsriClient;

/// Wire the API router, dashboard and middleware together
pub fn app(state: AppState, config: &LocationConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api::router(state)
        .fallback_service(ServeDir::new(&config.server.dashboard_dir))
        .layer(RequestBodyLimitLayer::new(config.server.max_body_bytes))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::span!(
                    Level::INFO,
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
        .layer(cors)
}

pub async fn run(config: LocationConfig) -> Result<()> {
    let client = EsriClient::new(&config.esri)?;
    let state = AppState::with_provider(client, config.batch.clone());
    let app = app(state, &config);

    let addr = &config.server.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(addr = %addr, "Location Intelligence API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
