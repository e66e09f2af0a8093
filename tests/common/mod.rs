//! In-process stand-in for the ArcGIS REST endpoints.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use location_intelligence::EsriClient;
use location_intelligence::config::EsriConfig;

pub const VALID_TOKEN: &str = "test-token";

type Params = HashMap<String, String>;

#[derive(Clone, Default)]
pub struct Recorder {
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<Params>>>,
}

impl Recorder {
    fn record(&self, params: &Params) {
        self.hits.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(params.clone());
        }
    }
}

pub struct FakeEsri {
    pub base_url: String,
    recorder: Recorder,
}

impl FakeEsri {
    pub async fn start() -> Self {
        let recorder = Recorder::default();
        let app = Router::new()
            .route("/geocode/findAddressCandidates", get(find_candidates))
            .route("/geocode/reverseGeocode", get(reverse_geocode))
            .route("/enrich/GeoEnrichment/enrich", get(enrich))
            .route("/route/solve", get(solve))
            .route("/slow/findAddressCandidates", get(slow_candidates))
            .route("/down/findAddressCandidates", get(unavailable))
            .with_state(recorder.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake provider");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake provider");
        });

        Self {
            base_url: format!("http://{addr}"),
            recorder,
        }
    }

    pub fn config(&self) -> EsriConfig {
        EsriConfig {
            api_key: Some(VALID_TOKEN.to_string()),
            geocoding_url: format!("{}/geocode", self.base_url),
            places_url: format!("{}/geocode", self.base_url),
            demographics_url: format!("{}/enrich", self.base_url),
            routing_url: format!("{}/route", self.base_url),
            timeout_seconds: 1,
        }
    }

    pub fn client(&self) -> EsriClient {
        EsriClient::new(&self.config()).expect("client")
    }

    pub fn hits(&self) -> usize {
        self.recorder.hits.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Params {
        self.recorder
            .requests
            .lock()
            .expect("requests lock")
            .last()
            .cloned()
            .unwrap_or_default()
    }
}

fn invalid_token() -> Response {
    Json(json!({
        "error": {"code": 498, "message": "Invalid token.", "details": []}
    }))
    .into_response()
}

fn authorized(params: &Params) -> bool {
    params.get("token").map(String::as_str) == Some(VALID_TOKEN)
}

fn parse_point(raw: &str) -> (f64, f64) {
    let mut parts = raw.split(',').filter_map(|part| part.trim().parse::<f64>().ok());
    let x = parts.next().unwrap_or_default();
    let y = parts.next().unwrap_or_default();
    (x, y)
}

async fn find_candidates(
    State(recorder): State<Recorder>,
    Query(params): Query<Params>,
) -> Response {
    recorder.record(&params);
    if !authorized(&params) {
        return invalid_token();
    }

    if let Some(category) = params.get("category") {
        let (x, y) = parse_point(params.get("location").map_or("0,0", String::as_str));
        // Roughly 1.1 km, 3.3 km and 22 km north of the centre
        let candidates: Vec<Value> = [(0.2, "Far"), (0.01, "Near"), (0.03, "Middle")]
            .iter()
            .map(|(offset, label)| {
                json!({
                    "address": format!("{label} {category}"),
                    "location": {"x": x, "y": y + offset},
                    "score": 100,
                    "attributes": {
                        "PlaceName": format!("{label} {category}"),
                        "Place_addr": format!("{label} Street"),
                        "Type": category
                    }
                })
            })
            .collect();
        return Json(json!({"spatialReference": {"wkid": 4326}, "candidates": candidates}))
            .into_response();
    }

    let address = params.get("singleLine").cloned().unwrap_or_default();
    if address.contains("Nowhere") {
        return Json(json!({"spatialReference": {"wkid": 4326}, "candidates": []})).into_response();
    }
    if address.contains("Garbled") {
        return Json(json!({"unexpected": true})).into_response();
    }

    Json(json!({
        "spatialReference": {"wkid": 4326},
        "candidates": [{
            "address": "1600 Amphitheatre Pkwy, Mountain View, California, 94043",
            "location": {"x": -122.08427, "y": 37.42199},
            "score": 100,
            "attributes": {
                "Match_addr": "1600 Amphitheatre Pkwy, Mountain View, California, 94043",
                "Addr_type": "PointAddress"
            }
        }]
    }))
    .into_response()
}

async fn reverse_geocode(
    State(recorder): State<Recorder>,
    Query(params): Query<Params>,
) -> Response {
    recorder.record(&params);
    if !authorized(&params) {
        return invalid_token();
    }

    let (x, y) = parse_point(params.get("location").map_or("0,0", String::as_str));
    if x == 0.0 && y == 0.0 {
        return Json(json!({
            "error": {
                "code": 400,
                "message": "Cannot perform query. Invalid query parameters.",
                "details": ["Unable to find address for the specified location."]
            }
        }))
        .into_response();
    }

    Json(json!({
        "address": {
            "Match_addr": "Eiffel Tower",
            "LongLabel": "Eiffel Tower, 5 Avenue Anatole France, 75007, 7e Arrondissement, Paris, Île-de-France, FRA",
            "City": "Paris",
            "Region": "Île-de-France",
            "Postal": "75007",
            "Addr_type": "POI"
        },
        "location": {"x": x, "y": y}
    }))
    .into_response()
}

async fn enrich(State(recorder): State<Recorder>, Query(params): Query<Params>) -> Response {
    recorder.record(&params);
    if !authorized(&params) {
        return invalid_token();
    }

    let study_areas: Value = params
        .get("studyAreas")
        .and_then(|raw| serde_json::from_str(raw).ok())
        .unwrap_or(Value::Null);
    if !study_areas.is_array() {
        return Json(json!({
            "error": {"code": 400, "message": "Invalid studyAreas.", "details": []}
        }))
        .into_response();
    }

    Json(json!({
        "results": [{
            "paramName": "GeoEnrichmentResult",
            "dataType": "GeoEnrichmentResult",
            "value": {
                "version": "2025",
                "FeatureSet": [{
                    "features": [{
                        "attributes": {
                            "ID": "0",
                            "OBJECTID": 1,
                            "sourceCountry": "US",
                            "areaType": "RingBuffer",
                            "bufferUnits": "esriKilometers",
                            "bufferRadii": 1.6,
                            "TOTPOP": 12845,
                            "TOTHH": 5621,
                            "AVGHHSZ": 2.24,
                            "MEDHINC": 71250
                        }
                    }]
                }]
            }
        }],
        "messages": []
    }))
    .into_response()
}

async fn solve(State(recorder): State<Recorder>, Query(params): Query<Params>) -> Response {
    recorder.record(&params);
    if !authorized(&params) {
        return invalid_token();
    }

    // Only the time field of the solved travel mode is populated
    let mut attributes = json!({
        "Name": "Location 1 - Location 2",
        "Total_Kilometers": 119.4,
        "Total_TravelTime": null,
        "Total_WalkTime": null,
        "Total_TruckTravelTime": null
    });
    let (time_field, minutes) = match params.get("travelMode").map(String::as_str) {
        Some("Walking Time") => ("Total_WalkTime", 1432.8),
        Some("Trucking Time") => ("Total_TruckTravelTime", 74.0),
        _ => ("Total_TravelTime", 62.5),
    };
    attributes[time_field] = json!(minutes);

    Json(json!({
        "messages": [],
        "routes": {"features": [{"attributes": attributes}]},
        "directions": [{
            "summary": {"totalLength": 119.4, "totalTime": minutes},
            "features": [
                {"attributes": {"text": "Start at Location 1", "length": 0, "time": 0}},
                {"attributes": {"text": "Go north on Main St", "length": 119.4, "time": minutes}},
                {"attributes": {"text": "Finish at Location 2", "length": 0, "time": 0}}
            ]
        }]
    }))
    .into_response()
}

async fn slow_candidates(
    State(recorder): State<Recorder>,
    Query(params): Query<Params>,
) -> Response {
    recorder.record(&params);
    tokio::time::sleep(Duration::from_secs(3)).await;
    Json(json!({"candidates": []})).into_response()
}

async fn unavailable(State(recorder): State<Recorder>, Query(params): Query<Params>) -> Response {
    recorder.record(&params);
    (StatusCode::SERVICE_UNAVAILABLE, "maintenance").into_response()
}
