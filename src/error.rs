//! Error types and handling for the location intelligence service

use thiserror::Error;

/// Main error type shared by the provider client, the services and the API
#[derive(Error, Debug)]
pub enum LocationError {
    /// Client input failed a field-level check
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The provider found no match for the request
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// The provider credential is missing or was rejected
    #[error("Authentication error: {message}")]
    Authentication { message: String },

    /// The provider did not answer within the configured deadline
    #[error("Upstream timeout: {message}")]
    Timeout { message: String },

    /// Network failure or provider-side HTTP error
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    /// The provider answered with a shape we cannot map
    #[error("Unexpected provider response: {message}")]
    Mapping { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl LocationError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new authentication error
    pub fn authentication<S: Into<String>>(message: S) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new mapping error
    pub fn mapping<S: Into<String>>(message: S) -> Self {
        Self::Mapping {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Stable machine-readable code, used in API error bodies
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            LocationError::Validation { .. } => "validation_error",
            LocationError::NotFound { .. } => "not_found",
            LocationError::Authentication { .. } => "upstream_authentication_error",
            LocationError::Timeout { .. } => "upstream_timeout",
            LocationError::Upstream { .. } => "upstream_error",
            LocationError::Mapping { .. } => "upstream_mapping_error",
            LocationError::Config { .. } => "configuration_error",
            LocationError::Io { .. } => "io_error",
        }
    }

    /// Whether the failure originated at the provider rather than in the request
    #[must_use]
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            LocationError::Authentication { .. }
                | LocationError::Timeout { .. }
                | LocationError::Upstream { .. }
                | LocationError::Mapping { .. }
        )
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            LocationError::Validation { message } => format!("Invalid input: {message}"),
            LocationError::NotFound { message } => message.clone(),
            LocationError::Authentication { .. } => {
                "The location provider rejected our credentials. Please check the ArcGIS API key."
                    .to_string()
            }
            LocationError::Timeout { .. } => {
                "The location provider did not respond in time.".to_string()
            }
            LocationError::Upstream { .. } => {
                "Unable to reach the location provider.".to_string()
            }
            LocationError::Mapping { .. } => {
                "The location provider returned an unexpected response.".to_string()
            }
            LocationError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            LocationError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for LocationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LocationError::timeout(err.to_string())
        } else if err.is_decode() {
            LocationError::mapping(err.to_string())
        } else {
            LocationError::upstream(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LocationError {
    fn from(err: serde_json::Error) -> Self {
        LocationError::mapping(err.to_string())
    }
}
