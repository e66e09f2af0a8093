//! Geocoding request and response records

use serde::{Deserialize, Serialize};

use crate::{LocationError, Result};

/// Longest address accepted by the provider's `singleLine` parameter
const MAX_ADDRESS_LEN: usize = 200;

/// Forward geocoding request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeocodeRequest {
    /// Free-text address
    pub address: String,
    /// ISO country code(s) restricting the search, comma separated
    #[serde(default)]
    pub country: Option<String>,
}

impl GeocodeRequest {
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            country: None,
        }
    }

    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Address with surrounding whitespace removed
    #[must_use]
    pub fn address(&self) -> &str {
        self.address.trim()
    }

    /// Country filter, `None` when absent or blank
    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.country
            .as_deref()
            .map(str::trim)
            .filter(|country| !country.is_empty())
    }

    pub fn validate(&self) -> Result<()> {
        let address = self.address();
        if address.is_empty() {
            return Err(LocationError::validation("Address cannot be empty"));
        }
        if address.chars().count() > MAX_ADDRESS_LEN {
            return Err(LocationError::validation(format!(
                "Address cannot be longer than {MAX_ADDRESS_LEN} characters"
            )));
        }

        if let Some(country) = self.country() {
            let well_formed = country
                .chars()
                .all(|c| c.is_ascii_alphabetic() || c == ',' || c == ' ');
            if !well_formed {
                return Err(LocationError::validation(format!(
                    "Country must be a comma separated list of ISO country codes, got: {country}"
                )));
            }
        }

        Ok(())
    }
}

/// Best provider match for an address
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    pub matched_address: String,
    /// Provider score, 0-100
    pub confidence: f64,
    /// Kind of match (PointAddress, StreetName, Locality, ...)
    pub match_type: String,
}

/// Address found at a coordinate pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReverseGeocodeResult {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal: Option<String>,
    pub match_type: Option<String>,
}

/// Per-item failure inside a batch response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchItemError {
    pub error: String,
    pub message: String,
}

impl From<&LocationError> for BatchItemError {
    fn from(err: &LocationError) -> Self {
        Self {
            error: err.code().to_string(),
            message: err.user_message(),
        }
    }
}

/// One entry of a batch geocode response; exactly one of `result`/`error` is set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchGeocodeItem {
    pub input: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<GeocodeResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<BatchItemError>,
}

impl BatchGeocodeItem {
    #[must_use]
    pub fn success(input: String, result: GeocodeResult) -> Self {
        Self {
            input,
            result: Some(result),
            error: None,
        }
    }

    #[must_use]
    pub fn failure(input: String, err: &LocationError) -> Self {
        Self {
            input,
            result: None,
            error: Some(err.into()),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result.is_some()
    }
}
