//! ArcGIS REST response structures
//!
//! Only the fields the service maps are declared; everything else in the
//! provider payloads is ignored.

use serde::Deserialize;
use serde_json::{Map, Value};

/// `error` object returned (usually with HTTP 200) when a request fails
#[derive(Debug, Deserialize)]
pub struct EsriError {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Vec<String>,
}

impl EsriError {
    /// Message plus details, for logs and error bodies
    #[must_use]
    pub fn describe(&self) -> String {
        if self.details.is_empty() {
            format!("Esri error {}: {}", self.code, self.message)
        } else {
            format!(
                "Esri error {}: {} ({})",
                self.code,
                self.message,
                self.details.join("; ")
            )
        }
    }

    /// Whether a 400 means "nothing matched" rather than "bad parameters"
    #[must_use]
    pub fn reports_no_match(&self) -> bool {
        let text = format!("{} {}", self.message, self.details.join(" ")).to_lowercase();
        ["unable to find", "not found", "no match", "no results"]
            .iter()
            .any(|needle| text.contains(needle))
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// `findAddressCandidates` response
#[derive(Debug, Deserialize)]
pub struct CandidatesResponse {
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub address: Option<String>,
    pub location: Point,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub attributes: CandidateAttributes,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidateAttributes {
    #[serde(rename = "Match_addr")]
    pub match_addr: Option<String>,
    #[serde(rename = "Addr_type")]
    pub addr_type: Option<String>,
    #[serde(rename = "PlaceName")]
    pub place_name: Option<String>,
    #[serde(rename = "Place_addr")]
    pub place_addr: Option<String>,
    #[serde(rename = "Type")]
    pub place_type: Option<String>,
}

/// `reverseGeocode` response
#[derive(Debug, Deserialize)]
pub struct ReverseGeocodeResponse {
    pub address: ReverseAddress,
    pub location: Option<Point>,
}

#[derive(Debug, Deserialize)]
pub struct ReverseAddress {
    #[serde(rename = "Match_addr")]
    pub match_addr: Option<String>,
    #[serde(rename = "LongLabel")]
    pub long_label: Option<String>,
    #[serde(rename = "City")]
    pub city: Option<String>,
    #[serde(rename = "Region")]
    pub region: Option<String>,
    #[serde(rename = "Postal")]
    pub postal: Option<String>,
    #[serde(rename = "Addr_type")]
    pub addr_type: Option<String>,
}

/// GeoEnrichment `enrich` response
#[derive(Debug, Deserialize)]
pub struct EnrichResponse {
    pub results: Vec<EnrichResult>,
}

#[derive(Debug, Deserialize)]
pub struct EnrichResult {
    pub value: EnrichValue,
}

#[derive(Debug, Deserialize)]
pub struct EnrichValue {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(rename = "FeatureSet")]
    pub feature_set: Vec<FeatureSet>,
}

#[derive(Debug, Deserialize)]
pub struct FeatureSet {
    pub features: Vec<AttributeFeature>,
}

#[derive(Debug, Deserialize)]
pub struct AttributeFeature {
    pub attributes: Map<String, Value>,
}

/// Route `solve` response
#[derive(Debug, Deserialize)]
pub struct SolveResponse {
    pub routes: RouteFeatureSet,
    #[serde(default)]
    pub directions: Vec<Directions>,
}

#[derive(Debug, Deserialize)]
pub struct RouteFeatureSet {
    pub features: Vec<RouteFeature>,
}

#[derive(Debug, Deserialize)]
pub struct RouteFeature {
    pub attributes: RouteAttributes,
}

#[derive(Debug, Deserialize)]
pub struct RouteAttributes {
    #[serde(rename = "Total_Kilometers")]
    pub total_kilometers: Option<f64>,
    #[serde(rename = "Total_Miles")]
    pub total_miles: Option<f64>,
    /// Driving time; null when a walking or trucking travel mode is solved
    #[serde(rename = "Total_TravelTime")]
    pub total_travel_time: Option<f64>,
    #[serde(rename = "Total_WalkTime")]
    pub total_walk_time: Option<f64>,
    #[serde(rename = "Total_TruckTravelTime")]
    pub total_truck_travel_time: Option<f64>,
    #[serde(rename = "Total_Minutes")]
    pub total_minutes: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct Directions {
    #[serde(default)]
    pub summary: Option<DirectionsSummary>,
    #[serde(default)]
    pub features: Vec<DirectionFeature>,
}

/// Totals of one directions set, in `directionsLengthUnits` and minutes
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DirectionsSummary {
    #[serde(rename = "totalLength")]
    pub total_length: Option<f64>,
    #[serde(rename = "totalTime")]
    pub total_time: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct DirectionFeature {
    pub attributes: DirectionAttributes,
}

#[derive(Debug, Deserialize)]
pub struct DirectionAttributes {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub length: f64,
    #[serde(default)]
    pub time: f64,
}
