use async_trait::async_trait;
use tracing::{info, instrument};

use super::EsriClient;
use super::wire::{Candidate, CandidatesResponse};
use crate::Result;
use crate::models::places::{MAX_LIMIT, within_radius};
use crate::models::{Place, PlaceCategory, PlaceSearchRequest};
use crate::services::PlacesService;

const PLACE_OUT_FIELDS: &str = "PlaceName,Place_addr,Type,Match_addr,Addr_type";

#[async_trait]
impl PlacesService for EsriClient {
    #[instrument(
        skip(self, request),
        fields(category = %request.category, radius = request.radius)
    )]
    async fn search_places(&self, request: &PlaceSearchRequest) -> Result<Vec<Place>> {
        request.validate()?;

        let center = request.center();
        let esri_category = PlaceCategory::resolve(&request.category);

        info!(
            "Searching for {} within {:.1} km of ({})",
            esri_category,
            request.radius,
            center.format_coordinates()
        );

        // over-fetch: candidates outside the circle are dropped below
        let params = [
            ("category", esri_category.clone()),
            ("location", center.to_esri_point()),
            ("searchExtent", center.search_extent(request.radius)),
            ("outFields", PLACE_OUT_FIELDS.to_string()),
            ("maxLocations", MAX_LIMIT.to_string()),
        ];

        let url = format!("{}/findAddressCandidates", self.places_url);
        let response: CandidatesResponse = self.get_json("place search", &url, &params).await?;

        let candidates = response
            .candidates
            .into_iter()
            .map(|candidate| to_place(candidate, &esri_category))
            .collect();

        let mut places = within_radius(candidates, &center, request.radius);
        places.truncate(request.limit as usize);

        info!("Found {} {} locations", places.len(), esri_category);
        Ok(places)
    }
}

fn to_place(candidate: Candidate, category: &str) -> Place {
    let attributes = candidate.attributes;
    let address = attributes
        .place_addr
        .clone()
        .or_else(|| attributes.match_addr.clone())
        .or(candidate.address)
        .unwrap_or_default();
    let name = attributes
        .place_name
        .filter(|name| !name.is_empty())
        .or(attributes.match_addr)
        .unwrap_or_else(|| "Unknown".to_string());

    Place {
        name,
        address,
        category: attributes
            .place_type
            .filter(|kind| !kind.is_empty())
            .unwrap_or_else(|| category.to_string()),
        latitude: candidate.location.y,
        longitude: candidate.location.x,
        distance: 0.0,
        score: candidate.score,
    }
}
