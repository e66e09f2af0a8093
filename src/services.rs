//! Service interfaces consumed by the API layer
//!
//! Each provider capability sits behind its own trait so the route layer can
//! be exercised with substitutable implementations. [`crate::esri::EsriClient`]
//! implements all of them.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use tracing::{debug, info};

use crate::Result;
use crate::models::{
    BatchGeocodeItem, Coordinates, DemographicsRequest, DemographicsResult, GeocodeRequest,
    GeocodeResult, Place, PlaceSearchRequest, ReverseGeocodeResult, RouteRequest, RouteResult,
};

#[async_trait]
pub trait GeocodingService: Send + Sync {
    async fn geocode(&self, request: &GeocodeRequest) -> Result<GeocodeResult>;

    async fn reverse_geocode(&self, location: Coordinates) -> Result<ReverseGeocodeResult>;
}

#[async_trait]
pub trait PlacesService: Send + Sync {
    /// Places within `request.radius` of the centre, closest first
    async fn search_places(&self, request: &PlaceSearchRequest) -> Result<Vec<Place>>;
}

#[async_trait]
pub trait DemographicsService: Send + Sync {
    async fn demographics(&self, request: &DemographicsRequest) -> Result<DemographicsResult>;
}

#[async_trait]
pub trait RoutingService: Send + Sync {
    async fn route(&self, request: &RouteRequest) -> Result<RouteResult>;
}

pub type DynGeocodingService = Arc<dyn GeocodingService>;
pub type DynPlacesService = Arc<dyn PlacesService>;
pub type DynDemographicsService = Arc<dyn DemographicsService>;
pub type DynRoutingService = Arc<dyn RoutingService>;

/// Geocode every address independently.
///
/// Invalid addresses fail locally without a provider call; provider failures
/// are recorded on their own item. At most `concurrency` calls are in flight
/// and the output has one entry per input, in input order.
pub async fn batch_geocode(
    service: &dyn GeocodingService,
    addresses: Vec<String>,
    concurrency: usize,
) -> Vec<BatchGeocodeItem> {
    let total = addresses.len();
    info!("Batch geocoding {} addresses (concurrency {})", total, concurrency);

    let items: Vec<BatchGeocodeItem> = stream::iter(addresses)
        .map(|address| async move {
            let request = GeocodeRequest::new(address.clone());
            let outcome = match request.validate() {
                Ok(()) => service.geocode(&request).await,
                Err(err) => Err(err),
            };

            match outcome {
                Ok(result) => BatchGeocodeItem::success(address, result),
                Err(err) => {
                    debug!("Batch item '{}' failed: {}", address, err);
                    BatchGeocodeItem::failure(address, &err)
                }
            }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let succeeded = items.iter().filter(|item| item.is_success()).count();
    info!(
        "Batch geocoding finished: {} succeeded, {} failed",
        succeeded,
        total - succeeded
    );

    items
}
