use async_trait::async_trait;
use tracing::{info, instrument, warn};

use super::EsriClient;
use super::wire::{CandidatesResponse, ReverseGeocodeResponse};
use crate::models::{Coordinates, GeocodeRequest, GeocodeResult, ReverseGeocodeResult};
use crate::services::GeocodingService;
use crate::{LocationError, Result};

const GEOCODE_OUT_FIELDS: &str = "Addr_type,Score,Match_addr";
const REVERSE_OUT_FIELDS: &str = "Addr_type,Match_addr,LongLabel,City,Region,Postal";

#[async_trait]
impl GeocodingService for EsriClient {
    #[instrument(skip(self, request), fields(address = %request.address()))]
    async fn geocode(&self, request: &GeocodeRequest) -> Result<GeocodeResult> {
        request.validate()?;

        let address = request.address();
        info!("Geocoding address: '{}'", address);

        let mut params = vec![
            ("singleLine", address.to_string()),
            ("outFields", GEOCODE_OUT_FIELDS.to_string()),
            ("maxLocations", "1".to_string()),
        ];
        if let Some(country) = request.country() {
            params.push(("countryCode", country.to_string()));
        }

        let url = format!("{}/findAddressCandidates", self.geocoding_url);
        let response: CandidatesResponse = self.get_json("geocode", &url, &params).await?;

        let result = best_candidate(response, address)?;
        info!(
            "Geocoded '{}' -> lat: {:.4}, lon: {:.4} (score {}, {})",
            address, result.latitude, result.longitude, result.confidence, result.match_type
        );
        Ok(result)
    }

    #[instrument(skip(self), fields(location = %location.format_coordinates()))]
    async fn reverse_geocode(&self, location: Coordinates) -> Result<ReverseGeocodeResult> {
        location.validate()?;

        let params = [
            ("location", location.to_esri_point()),
            ("outFields", REVERSE_OUT_FIELDS.to_string()),
        ];

        let url = format!("{}/reverseGeocode", self.geocoding_url);
        let response: ReverseGeocodeResponse =
            self.get_json("reverse geocode", &url, &params).await?;

        reverse_result(response, location)
    }
}

/// Map the first candidate; an empty list is a "no match"
fn best_candidate(response: CandidatesResponse, address: &str) -> Result<GeocodeResult> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        warn!("No geocoding results found for address: {}", address);
        return Err(LocationError::not_found(format!(
            "No geocoding results found for address: {address}"
        )));
    };

    let matched_address = candidate
        .attributes
        .match_addr
        .or(candidate.address)
        .unwrap_or_else(|| address.to_string());

    Ok(GeocodeResult {
        latitude: candidate.location.y,
        longitude: candidate.location.x,
        matched_address,
        confidence: candidate.score,
        match_type: candidate
            .attributes
            .addr_type
            .unwrap_or_else(|| "Unknown".to_string()),
    })
}

fn reverse_result(
    response: ReverseGeocodeResponse,
    requested: Coordinates,
) -> Result<ReverseGeocodeResult> {
    let address = response.address;
    let label = address
        .long_label
        .or(address.match_addr)
        .filter(|label| !label.is_empty())
        .ok_or_else(|| {
            LocationError::not_found(format!(
                "No address found for coordinates: {}",
                requested.format_coordinates()
            ))
        })?;

    let location = response.location.map_or(requested, |point| {
        Coordinates::new(point.y, point.x)
    });

    Ok(ReverseGeocodeResult {
        latitude: location.latitude,
        longitude: location.longitude,
        address: label,
        city: address.city.filter(|v| !v.is_empty()),
        region: address.region.filter(|v| !v.is_empty()),
        postal: address.postal.filter(|v| !v.is_empty()),
        match_type: address.addr_type.filter(|v| !v.is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_candidate_mapping() {
        let response: CandidatesResponse = serde_json::from_value(serde_json::json!({
            "spatialReference": {"wkid": 4326},
            "candidates": [{
                "address": "1600 Amphitheatre Pkwy, Mountain View, California, 94043",
                "location": {"x": -122.08395, "y": 37.42199},
                "score": 100,
                "attributes": {
                    "Match_addr": "1600 Amphitheatre Pkwy, Mountain View, California, 94043",
                    "Addr_type": "PointAddress",
                    "Score": 100
                }
            }]
        }))
        .unwrap();

        let result =
            best_candidate(response, "1600 Amphitheatre Parkway, Mountain View, CA").unwrap();
        assert!((result.latitude - 37.42).abs() < 0.01);
        assert!((result.longitude + 122.08).abs() < 0.01);
        assert_eq!(result.match_type, "PointAddress");
        assert_eq!(result.confidence, 100.0);
        assert!(result.matched_address.starts_with("1600 Amphitheatre"));
    }

    #[test]
    fn test_candidate_without_attributes() {
        let response: CandidatesResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{"location": {"x": 1.5, "y": 2.5}}]
        }))
        .unwrap();

        let result = best_candidate(response, "somewhere").unwrap();
        assert_eq!(result.matched_address, "somewhere");
        assert_eq!(result.match_type, "Unknown");
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_no_candidates_is_not_found() {
        let response = CandidatesResponse { candidates: vec![] };
        assert!(matches!(
            best_candidate(response, "nowhere").unwrap_err(),
            LocationError::NotFound { .. }
        ));
    }

    #[test]
    fn test_missing_candidates_field_fails_to_decode() {
        let decoded =
            serde_json::from_value::<CandidatesResponse>(serde_json::json!({"results": []}));
        assert!(decoded.is_err());
    }

    #[test]
    fn test_reverse_result_mapping() {
        let response: ReverseGeocodeResponse = serde_json::from_value(serde_json::json!({
            "address": {
                "Match_addr": "1 Main St",
                "LongLabel": "1 Main St, Rochester, NY, 14604, USA",
                "City": "Rochester",
                "Region": "New York",
                "Postal": "14604",
                "Addr_type": "PointAddress"
            },
            "location": {"x": -77.6101, "y": 43.1560}
        }))
        .unwrap();

        let result = reverse_result(response, Coordinates::new(43.156, -77.61)).unwrap();
        assert_eq!(result.address, "1 Main St, Rochester, NY, 14604, USA");
        assert_eq!(result.city.as_deref(), Some("Rochester"));
        assert_eq!(result.postal.as_deref(), Some("14604"));
        assert!((result.longitude + 77.6101).abs() < 1e-9);
    }

    #[test]
    fn test_reverse_result_without_label_is_not_found() {
        let response: ReverseGeocodeResponse = serde_json::from_value(serde_json::json!({
            "address": {"Match_addr": ""}
        }))
        .unwrap();

        assert!(matches!(
            reverse_result(response, Coordinates::new(0.0, 0.0)).unwrap_err(),
            LocationError::NotFound { .. }
        ));
    }
}
