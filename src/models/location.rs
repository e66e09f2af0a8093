//! Coordinates and geographic helpers

use serde::{Deserialize, Serialize};

use crate::{LocationError, Result};

/// A WGS84 point in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinates {
    /// Create new coordinates without validating them
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check that both components are finite and within range
    pub fn validate(&self) -> Result<()> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(LocationError::validation(format!(
                "Latitude must be between -90 and 90, got: {}",
                self.latitude
            )));
        }

        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(LocationError::validation(format!(
                "Longitude must be between -180 and 180, got: {}",
                self.longitude
            )));
        }

        Ok(())
    }

    /// Great-circle distance in kilometres
    #[must_use]
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        haversine::distance(
            haversine::Location {
                latitude: self.latitude,
                longitude: self.longitude,
            },
            haversine::Location {
                latitude: other.latitude,
                longitude: other.longitude,
            },
            haversine::Units::Kilometers,
        )
    }

    /// Esri point notation: `x,y` (longitude first)
    #[must_use]
    pub fn to_esri_point(&self) -> String {
        format!("{},{}", self.longitude, self.latitude)
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Bounding box `xmin,ymin,xmax,ymax` that contains a circle of `radius_km`
    #[must_use]
    pub fn search_extent(&self, radius_km: f64) -> String {
        const KM_PER_DEGREE: f64 = 111.32;

        let lat_delta = radius_km / KM_PER_DEGREE;
        let cos_lat = self.latitude.to_radians().cos().abs().max(0.01);
        let lon_delta = (radius_km / (KM_PER_DEGREE * cos_lat)).min(180.0);

        format!(
            "{},{},{},{}",
            (self.longitude - lon_delta).max(-180.0),
            (self.latitude - lat_delta).max(-90.0),
            (self.longitude + lon_delta).min(180.0),
            (self.latitude + lat_delta).min(90.0)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(90.0, 180.0)]
    #[case(-90.0, -180.0)]
    #[case(37.4224, -122.0842)]
    fn test_valid_coordinates(#[case] lat: f64, #[case] lon: f64) {
        assert!(Coordinates::new(lat, lon).validate().is_ok());
    }

    #[rstest]
    #[case(91.0, 8.0)]
    #[case(-91.0, 8.0)]
    #[case(46.0, 181.0)]
    #[case(46.0, -181.0)]
    #[case(f64::NAN, 0.0)]
    #[case(0.0, f64::INFINITY)]
    fn test_invalid_coordinates(#[case] lat: f64, #[case] lon: f64) {
        let err = Coordinates::new(lat, lon).validate().unwrap_err();
        assert!(matches!(err, LocationError::Validation { .. }));
    }

    #[test]
    fn test_distance_km() {
        let zurich = Coordinates::new(47.3769, 8.5417);
        let bern = Coordinates::new(46.9480, 7.4474);
        let distance = zurich.distance_km(&bern);
        assert!((distance - 95.0).abs() < 3.0, "got {distance}");
        assert_eq!(zurich.distance_km(&zurich), 0.0);
    }

    #[test]
    fn test_esri_point_is_longitude_first() {
        let point = Coordinates::new(37.5, -122.25);
        assert_eq!(point.to_esri_point(), "-122.25,37.5");
    }

    #[test]
    fn test_search_extent_contains_center() {
        let center = Coordinates::new(43.1566, -77.6088);
        let extent: Vec<f64> = center
            .search_extent(10.0)
            .split(',')
            .map(|v| v.parse().unwrap())
            .collect();
        assert_eq!(extent.len(), 4);
        assert!(extent[0] < center.longitude && center.longitude < extent[2]);
        assert!(extent[1] < center.latitude && center.latitude < extent[3]);
        assert!((extent[3] - extent[1] - 2.0 * 10.0 / 111.32).abs() < 1e-9);
    }
}
