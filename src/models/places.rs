//! Place search records and the category catalog

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Coordinates;
use crate::{LocationError, Result};

/// Largest search radius in kilometres
pub const MAX_RADIUS_KM: f64 = 50.0;
/// Largest number of places returned by one search
pub const MAX_LIMIT: u32 = 50;

fn default_limit() -> u32 {
    10
}

/// Categories with a known provider mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceCategory {
    Bank,
    FireStation,
    GasStation,
    Hospital,
    Pharmacy,
    Police,
    Restaurant,
    School,
}

impl PlaceCategory {
    pub const ALL: [PlaceCategory; 8] = [
        PlaceCategory::Bank,
        PlaceCategory::FireStation,
        PlaceCategory::GasStation,
        PlaceCategory::Hospital,
        PlaceCategory::Pharmacy,
        PlaceCategory::Police,
        PlaceCategory::Restaurant,
        PlaceCategory::School,
    ];

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            PlaceCategory::Bank => "bank",
            PlaceCategory::FireStation => "fire_station",
            PlaceCategory::GasStation => "gas_station",
            PlaceCategory::Hospital => "hospital",
            PlaceCategory::Pharmacy => "pharmacy",
            PlaceCategory::Police => "police",
            PlaceCategory::Restaurant => "restaurant",
            PlaceCategory::School => "school",
        }
    }

    /// Category name understood by the geocoding service
    #[must_use]
    pub fn esri_name(self) -> &'static str {
        match self {
            PlaceCategory::Bank => "Bank",
            PlaceCategory::FireStation => "Fire Station",
            PlaceCategory::GasStation => "Gas Station",
            PlaceCategory::Hospital => "Hospital",
            PlaceCategory::Pharmacy => "Pharmacy",
            PlaceCategory::Police => "Police Station",
            PlaceCategory::Restaurant => "Food",
            PlaceCategory::School => "School",
        }
    }

    /// Names exposed by the categories endpoint, sorted
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|category| category.slug()).collect()
    }

    /// Provider category for a request: known slugs are mapped, anything else passes through
    #[must_use]
    pub fn resolve(input: &str) -> String {
        let input = input.trim();
        input
            .parse::<PlaceCategory>()
            .map(|category| category.esri_name().to_string())
            .unwrap_or_else(|_| input.to_string())
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for PlaceCategory {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        PlaceCategory::ALL
            .into_iter()
            .find(|category| category.slug() == normalized)
            .ok_or_else(|| LocationError::validation(format!("Unknown place category: {s}")))
    }
}

/// Nearby place search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaceSearchRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub category: String,
    /// Search radius in kilometres
    pub radius: f64,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl PlaceSearchRequest {
    #[must_use]
    pub fn center(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    pub fn validate(&self) -> Result<()> {
        self.center().validate()?;

        if self.category.trim().is_empty() {
            return Err(LocationError::validation("Category cannot be empty"));
        }

        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(LocationError::validation(format!(
                "Radius must be a positive number of kilometres, got: {}",
                self.radius
            )));
        }

        if self.radius > MAX_RADIUS_KM {
            return Err(LocationError::validation(format!(
                "Radius cannot exceed {MAX_RADIUS_KM} km, got: {}",
                self.radius
            )));
        }

        if self.limit == 0 || self.limit > MAX_LIMIT {
            return Err(LocationError::validation(format!(
                "Limit must be between 1 and {MAX_LIMIT}, got: {}",
                self.limit
            )));
        }

        Ok(())
    }
}

/// A place returned by a search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Place {
    pub name: String,
    pub address: String,
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Distance from the search centre in kilometres
    pub distance: f64,
    /// Provider match score
    pub score: f64,
}

impl Place {
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Recompute distances, drop places outside the radius and sort closest first
#[must_use]
pub fn within_radius(places: Vec<Place>, center: &Coordinates, radius_km: f64) -> Vec<Place> {
    let mut results: Vec<Place> = places
        .into_iter()
        .map(|mut place| {
            place.distance = center.distance_km(&place.coordinates());
            place
        })
        .filter(|place| place.distance <= radius_km)
        .collect();

    results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    results
}
