//! Routing request and response records

use serde::{Deserialize, Serialize};

use super::Coordinates;
use crate::{LocationError, Result};

/// Stops accepted by one route request
pub const MAX_STOPS: usize = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Trucking,
}

impl TravelMode {
    /// Travel mode name on the route service; `None` uses the service default (driving time)
    #[must_use]
    pub fn esri_name(self) -> Option<&'static str> {
        match self {
            TravelMode::Driving => None,
            TravelMode::Walking => Some("Walking Time"),
            TravelMode::Trucking => Some("Trucking Time"),
        }
    }
}

/// Route through an ordered list of stops
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteRequest {
    pub stops: Vec<Coordinates>,
    #[serde(default)]
    pub travel_mode: TravelMode,
}

impl RouteRequest {
    #[must_use]
    pub fn new(stops: Vec<Coordinates>) -> Self {
        Self {
            stops,
            travel_mode: TravelMode::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.stops.len() < 2 {
            return Err(LocationError::validation(format!(
                "A route needs at least 2 stops, got: {}",
                self.stops.len()
            )));
        }

        if self.stops.len() > MAX_STOPS {
            return Err(LocationError::validation(format!(
                "A route cannot have more than {MAX_STOPS} stops, got: {}",
                self.stops.len()
            )));
        }

        for (index, stop) in self.stops.iter().enumerate() {
            stop.validate().map_err(|err| match err {
                LocationError::Validation { message } => {
                    LocationError::validation(format!("Stop {index}: {message}"))
                }
                other => other,
            })?;
        }

        Ok(())
    }

    /// Stops in the route service's `x,y;x,y` notation
    #[must_use]
    pub fn esri_stops(&self) -> String {
        self.stops
            .iter()
            .map(Coordinates::to_esri_point)
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// One maneuver of a route
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteSegment {
    pub instruction: String,
    /// Kilometres
    pub distance: f64,
    /// Minutes
    pub duration: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteResult {
    /// Kilometres
    pub total_distance: f64,
    /// Minutes
    pub total_duration: f64,
    pub travel_mode: TravelMode,
    pub segments: Vec<RouteSegment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fewer_than_two_stops_is_rejected() {
        assert!(RouteRequest::new(vec![]).validate().is_err());
        let err = RouteRequest::new(vec![Coordinates::new(1.0, 1.0)])
            .validate()
            .unwrap_err();
        assert!(matches!(err, LocationError::Validation { .. }));
        assert!(err.to_string().contains("at least 2 stops"));
    }

    #[test]
    fn test_invalid_stop_is_reported_with_index() {
        let request = RouteRequest::new(vec![
            Coordinates::new(1.0, 1.0),
            Coordinates::new(100.0, 1.0),
        ]);
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("Stop 1"));
    }

    #[test]
    fn test_too_many_stops() {
        let stops = vec![Coordinates::new(1.0, 1.0); MAX_STOPS + 1];
        assert!(RouteRequest::new(stops).validate().is_err());
    }

    #[test]
    fn test_esri_stops_format() {
        let request = RouteRequest::new(vec![
            Coordinates::new(43.16, -77.61),
            Coordinates::new(42.89, -78.88),
        ]);
        assert!(request.validate().is_ok());
        assert_eq!(request.esri_stops(), "-77.61,43.16;-78.88,42.89");
    }

    #[test]
    fn test_travel_mode_defaults_to_driving() {
        let request: RouteRequest = serde_json::from_str(
            r#"{"stops":[{"latitude":1.0,"longitude":2.0},{"latitude":3.0,"longitude":4.0}]}"#,
        )
        .unwrap();
        assert_eq!(request.travel_mode, TravelMode::Driving);
        assert_eq!(TravelMode::Driving.esri_name(), None);
        assert_eq!(TravelMode::Walking.esri_name(), Some("Walking Time"));
    }
}
