//! Shared state handed to every request handler.

use std::sync::Arc;

use crate::config::BatchConfig;
use crate::esri::EsriClient;
use crate::services::{
    DynDemographicsService, DynGeocodingService, DynPlacesService, DynRoutingService,
};

/// Service handles plus the read-only settings the handlers need.
#[derive(Clone)]
pub struct AppState {
    pub geocoder: DynGeocodingService,
    pub places: DynPlacesService,
    pub demographics: DynDemographicsService,
    pub routing: DynRoutingService,
    pub batch: Arc<BatchConfig>,
}

impl AppState {
    /// Back every service with the same Esri client.
    pub fn with_provider(client: EsriClient, batch: BatchConfig) -> Self {
        let client = Arc::new(client);
        Self {
            geocoder: client.clone(),
            places: client.clone(),
            demographics: client.clone(),
            routing: client,
            batch: Arc::new(batch),
        }
    }
}
