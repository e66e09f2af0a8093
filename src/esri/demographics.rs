use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{info, instrument};

use super::EsriClient;
use super::wire::EnrichResponse;
use crate::models::{DemographicsRequest, DemographicsResult, StudyArea};
use crate::services::DemographicsService;
use crate::{LocationError, Result};

/// Attributes GeoEnrichment adds to every feature that are not demographic values
const BOOKKEEPING_FIELDS: [&str; 16] = [
    "ID",
    "OBJECTID",
    "sourceCountry",
    "areaType",
    "bufferUnits",
    "bufferUnitsAlias",
    "bufferRadii",
    "aggregationMethod",
    "populationToPolygonSizeRating",
    "apportionmentConfidence",
    "HasData",
    "StdGeographyLevel",
    "StdGeographyName",
    "StdGeographyID",
    "Shape_Length",
    "Shape_Area",
];

#[async_trait]
impl DemographicsService for EsriClient {
    #[instrument(skip(self, request))]
    async fn demographics(&self, request: &DemographicsRequest) -> Result<DemographicsResult> {
        let study_area = request.study_area()?;
        let variables = request.analysis_variables()?;

        info!("Enriching {:?} with {} variables", study_area, variables.len());

        let mut params = vec![
            ("studyAreas", study_areas_param(&study_area).to_string()),
            ("analysisVariables", json!(variables).to_string()),
            ("returnGeometry", "false".to_string()),
        ];
        if let StudyArea::Ring { radius_km, .. } = &study_area {
            params.push((
                "studyAreasOptions",
                json!({
                    "areaType": "RingBuffer",
                    "bufferUnits": "esriKilometers",
                    "bufferRadii": [radius_km]
                })
                .to_string(),
            ));
        }

        let url = format!("{}/GeoEnrichment/enrich", self.demographics_url);
        let response: EnrichResponse = self.get_json("demographics", &url, &params).await?;

        map_enrichment(response, study_area)
    }
}

fn study_areas_param(study_area: &StudyArea) -> Value {
    match study_area {
        StudyArea::Ring { center, .. } => json!([{
            "geometry": {"x": center.longitude, "y": center.latitude}
        }]),
        StudyArea::Boundary(boundary) => {
            let mut area = json!({"layer": boundary.layer, "ids": [boundary.id]});
            if let Some(country) = &boundary.source_country {
                area["sourceCountry"] = json!(country);
            }
            json!([area])
        }
    }
}

/// Keep the numeric attributes of the first enriched feature
fn map_enrichment(response: EnrichResponse, study_area: StudyArea) -> Result<DemographicsResult> {
    let value = response
        .results
        .into_iter()
        .next()
        .ok_or_else(|| LocationError::mapping("GeoEnrichment returned no results"))?
        .value;

    let feature = value
        .feature_set
        .into_iter()
        .flat_map(|set| set.features)
        .next()
        .ok_or_else(|| {
            LocationError::not_found("No demographic data available for this study area")
        })?;

    let variables: BTreeMap<String, f64> = feature
        .attributes
        .into_iter()
        .filter(|(name, _)| !BOOKKEEPING_FIELDS.contains(&name.as_str()))
        .filter_map(|(name, value)| value.as_f64().map(|number| (name, number)))
        .collect();

    Ok(DemographicsResult {
        study_area,
        variables,
        data_vintage: value.version,
    })
}
