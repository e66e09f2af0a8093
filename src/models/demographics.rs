//! Demographics request and response records

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Coordinates;
use crate::{LocationError, Result};

/// Largest ring buffer radius in kilometres
pub const MAX_RING_RADIUS_KM: f64 = 50.0;

/// Variables requested when the caller does not name any
pub const DEFAULT_VARIABLES: [&str; 5] = [
    "KeyGlobalFacts.TOTPOP",
    "KeyGlobalFacts.TOTHH",
    "KeyGlobalFacts.AVGHHSZ",
    "KeyGlobalFacts.TOTMALES",
    "KeyGlobalFacts.TOTFEMALES",
];

fn default_radius_km() -> f64 {
    1.6
}

/// Standard geography (county, tract, postal code, ...) addressed by id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Boundary {
    /// Standard geography layer, e.g. `US.Counties`
    pub layer: String,
    /// Feature id within the layer, e.g. a county FIPS code
    pub id: String,
    #[serde(default)]
    pub source_country: Option<String>,
}

/// Demographics lookup, either around a point or for a boundary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DemographicsRequest {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Ring buffer radius around the point
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,
    #[serde(default)]
    pub boundary: Option<Boundary>,
    /// GeoEnrichment analysis variables; defaults to [`DEFAULT_VARIABLES`]
    #[serde(default)]
    pub variables: Vec<String>,
}

/// Area a demographics query covers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StudyArea {
    Ring { center: Coordinates, radius_km: f64 },
    Boundary(Boundary),
}

impl DemographicsRequest {
    #[must_use]
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            radius_km: default_radius_km(),
            boundary: None,
            variables: Vec::new(),
        }
    }

    #[must_use]
    pub fn for_boundary(boundary: Boundary) -> Self {
        Self {
            latitude: None,
            longitude: None,
            radius_km: default_radius_km(),
            boundary: Some(boundary),
            variables: Vec::new(),
        }
    }

    /// Validate the request and resolve the area it describes
    pub fn study_area(&self) -> Result<StudyArea> {
        match (self.latitude, self.longitude, &self.boundary) {
            (Some(_), _, Some(_)) | (_, Some(_), Some(_)) => Err(LocationError::validation(
                "Provide either latitude/longitude or a boundary, not both",
            )),
            (Some(latitude), Some(longitude), None) => {
                let center = Coordinates::new(latitude, longitude);
                center.validate()?;

                if !self.radius_km.is_finite()
                    || self.radius_km <= 0.0
                    || self.radius_km > MAX_RING_RADIUS_KM
                {
                    return Err(LocationError::validation(format!(
                        "Radius must be greater than 0 and at most {MAX_RING_RADIUS_KM} km, got: {}",
                        self.radius_km
                    )));
                }

                Ok(StudyArea::Ring {
                    center,
                    radius_km: self.radius_km,
                })
            }
            (None, None, Some(boundary)) => {
                if boundary.layer.trim().is_empty() || boundary.id.trim().is_empty() {
                    return Err(LocationError::validation(
                        "Boundary layer and id cannot be empty",
                    ));
                }
                Ok(StudyArea::Boundary(boundary.clone()))
            }
            (Some(_), None, None) | (None, Some(_), None) => Err(LocationError::validation(
                "Both latitude and longitude are required",
            )),
            (None, None, None) => Err(LocationError::validation(
                "A location (latitude/longitude) or a boundary is required",
            )),
        }
    }

    /// Requested variables, falling back to the defaults
    pub fn analysis_variables(&self) -> Result<Vec<String>> {
        if self.variables.is_empty() {
            return Ok(DEFAULT_VARIABLES.iter().map(|v| (*v).to_string()).collect());
        }

        self.variables
            .iter()
            .map(|variable| {
                let variable = variable.trim();
                if variable.is_empty() {
                    Err(LocationError::validation("Variable names cannot be empty"))
                } else {
                    Ok(variable.to_string())
                }
            })
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        self.study_area()?;
        self.analysis_variables()?;
        Ok(())
    }
}

/// Demographic values for a study area
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DemographicsResult {
    pub study_area: StudyArea,
    /// Variable name → value
    pub variables: BTreeMap<String, f64>,
    pub data_vintage: Option<String>,
}
