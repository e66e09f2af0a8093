use async_trait::async_trait;
use tracing::{info, instrument};

use super::EsriClient;
use super::wire::SolveResponse;
use crate::models::{RouteRequest, RouteResult, RouteSegment, TravelMode};
use crate::services::RoutingService;
use crate::{LocationError, Result};

const KM_PER_MILE: f64 = 1.609_344;

#[async_trait]
impl RoutingService for EsriClient {
    #[instrument(skip(self, request), fields(stops = request.stops.len()))]
    async fn route(&self, request: &RouteRequest) -> Result<RouteResult> {
        request.validate()?;

        info!(
            "Solving {:?} route through {} stops",
            request.travel_mode,
            request.stops.len()
        );

        let mut params = vec![
            ("stops", request.esri_stops()),
            ("returnDirections", "true".to_string()),
            ("returnRoutes", "true".to_string()),
            ("directionsLengthUnits", "esriNAUKilometers".to_string()),
            ("outputLines", "esriNAOutputLineNone".to_string()),
        ];
        if let Some(mode) = request.travel_mode.esri_name() {
            params.push(("travelMode", mode.to_string()));
        }

        let url = format!("{}/solve", self.routing_url);
        let response: SolveResponse = self.get_json("route", &url, &params).await?;

        let result = map_solve(response, request.travel_mode)?;
        info!(
            "Route solved: {:.2} km, {:.1} min, {} segments",
            result.total_distance,
            result.total_duration,
            result.segments.len()
        );
        Ok(result)
    }
}

fn map_solve(response: SolveResponse, travel_mode: TravelMode) -> Result<RouteResult> {
    let route = response
        .routes
        .features
        .into_iter()
        .next()
        .ok_or_else(|| LocationError::not_found("No route found between the given stops"))?
        .attributes;

    let summary = response
        .directions
        .iter()
        .find_map(|directions| directions.summary);

    let total_distance = route
        .total_kilometers
        .or_else(|| route.total_miles.map(|miles| miles * KM_PER_MILE))
        .or_else(|| summary.and_then(|summary| summary.total_length))
        .ok_or_else(|| LocationError::mapping("Route is missing its total length"))?;

    let mode_time = match travel_mode {
        TravelMode::Driving => route.total_travel_time,
        TravelMode::Walking => route.total_walk_time,
        TravelMode::Trucking => route.total_truck_travel_time,
    };
    let total_duration = mode_time
        .or(route.total_minutes)
        .or_else(|| summary.and_then(|summary| summary.total_time))
        .ok_or_else(|| LocationError::mapping("Route is missing its total travel time"))?;

    let segments = response
        .directions
        .into_iter()
        .flat_map(|directions| directions.features)
        .map(|feature| RouteSegment {
            instruction: feature.attributes.text,
            distance: feature.attributes.length,
            duration: feature.attributes.time,
        })
        .collect();

    Ok(RouteResult {
        total_distance,
        total_duration,
        travel_mode,
        segments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_solve() {
        let response: SolveResponse = serde_json::from_value(json!({
            "messages": [],
            "routes": {
                "fieldAliases": {},
                "features": [{
                    "attributes": {
                        "ObjectID": 1,
                        "Name": "Location 1 - Location 2",
                        "Total_TravelTime": 62.5,
                        "Total_Kilometers": 119.4,
                        "Total_Miles": 74.19
                    }
                }]
            },
            "directions": [{
                "routeId": 1,
                "routeName": "Location 1 - Location 2",
                "summary": {"totalLength": 119.4, "totalTime": 62.5},
                "features": [
                    {"attributes": {
                        "length": 0.0, "time": 0.0,
                        "text": "Start at Location 1", "maneuverType": "esriDMTDepart"
                    }},
                    {"attributes": {
                        "length": 119.4, "time": 62.5,
                        "text": "Go west on I-490", "maneuverType": "esriDMTStraight"
                    }},
                    {"attributes": {
                        "length": 0.0, "time": 0.0,
                        "text": "Finish at Location 2", "maneuverType": "esriDMTStop"
                    }}
                ]
            }]
        }))
        .unwrap();

        let result = map_solve(response, TravelMode::Driving).unwrap();
        assert_eq!(result.total_distance, 119.4);
        assert_eq!(result.total_duration, 62.5);
        assert_eq!(result.segments.len(), 3);
        assert_eq!(result.segments[1].instruction, "Go west on I-490");
        assert_eq!(result.segments[2].instruction, "Finish at Location 2");
    }

    #[test]
    fn test_map_solve_converts_miles() {
        let response: SolveResponse = serde_json::from_value(json!({
            "routes": {"features": [{"attributes": {"Total_Miles": 10.0, "Total_Minutes": 15.0}}]}
        }))
        .unwrap();

        let result = map_solve(response, TravelMode::Walking).unwrap();
        assert!((result.total_distance - 16.09344).abs() < 1e-9);
        assert_eq!(result.total_duration, 15.0);
        assert!(result.segments.is_empty());
        assert_eq!(result.travel_mode, TravelMode::Walking);
    }

    #[test]
    fn test_map_solve_walking_time() {
        let response: SolveResponse = serde_json::from_value(json!({
            "routes": {"features": [{"attributes": {
                "Total_Kilometers": 2.5,
                "Total_WalkTime": 31.0,
                "Total_TravelTime": null,
                "Total_Minutes": null
            }}]}
        }))
        .unwrap();

        let result = map_solve(response, TravelMode::Walking).unwrap();
        assert_eq!(result.total_distance, 2.5);
        assert_eq!(result.total_duration, 31.0);
    }

    #[test]
    fn test_map_solve_trucking_time() {
        let response: SolveResponse = serde_json::from_value(json!({
            "routes": {"features": [{"attributes": {
                "Total_Kilometers": 119.4,
                "Total_TruckTravelTime": 74.0,
                "Total_TravelTime": null
            }}]}
        }))
        .unwrap();

        let result = map_solve(response, TravelMode::Trucking).unwrap();
        assert_eq!(result.total_duration, 74.0);
        assert_eq!(result.travel_mode, TravelMode::Trucking);
    }

    #[test]
    fn test_map_solve_prefers_time_of_requested_mode() {
        let response: SolveResponse = serde_json::from_value(json!({
            "routes": {"features": [{"attributes": {
                "Total_Kilometers": 2.5,
                "Total_TravelTime": 4.0,
                "Total_WalkTime": 31.0
            }}]}
        }))
        .unwrap();

        let result = map_solve(response, TravelMode::Walking).unwrap();
        assert_eq!(result.total_duration, 31.0);
    }

    #[test]
    fn test_map_solve_falls_back_to_directions_summary() {
        let response: SolveResponse = serde_json::from_value(json!({
            "routes": {"features": [{"attributes": {
                "Total_Kilometers": null,
                "Total_WalkTime": null
            }}]},
            "directions": [{
                "summary": {"totalLength": 3.2, "totalTime": 40.0},
                "features": []
            }]
        }))
        .unwrap();

        let result = map_solve(response, TravelMode::Walking).unwrap();
        assert_eq!(result.total_distance, 3.2);
        assert_eq!(result.total_duration, 40.0);
    }

    #[test]
    fn test_map_solve_errors() {
        let empty: SolveResponse =
            serde_json::from_value(json!({"routes": {"features": []}})).unwrap();
        assert!(matches!(
            map_solve(empty, TravelMode::Driving).unwrap_err(),
            LocationError::NotFound { .. }
        ));

        let no_totals: SolveResponse =
            serde_json::from_value(json!({"routes": {"features": [{"attributes": {}}]}}))
                .unwrap();
        assert!(matches!(
            map_solve(no_totals, TravelMode::Driving).unwrap_err(),
            LocationError::Mapping { .. }
        ));
    }
}
