//! Location Intelligence API
//!
//! A thin aggregator over Esri ArcGIS REST services. It forwards geocoding,
//! place search, demographics and routing requests to the provider and
//! reshapes the responses into a simpler schema served over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod esri;
pub mod logging;
pub mod models;
pub mod services;
pub mod web;

// Re-export core types for public API
pub use api::{AppState, router};
pub use config::LocationConfig;
pub use error::LocationError;
pub use esri::EsriClient;
pub use models::{
    Coordinates, DemographicsRequest, DemographicsResult, GeocodeRequest, GeocodeResult, Place,
    PlaceSearchRequest, RouteRequest, RouteResult,
};
pub use services::{
    DemographicsService, GeocodingService, PlacesService, RoutingService, batch_geocode,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, LocationError>;
