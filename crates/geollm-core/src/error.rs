//! Error types for GeoLLM

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeollmError {
    // Input errors
    #[error("Invalid value for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    // Projection errors
    #[error("Projection from {from} to {to} failed: {reason}")]
    Projection {
        from: String,
        to: String,
        reason: String,
    },

    // Geocoding errors
    #[error("Malformed geocode query: {reason}")]
    InvalidQuery { reason: String },

    #[error("Geocoder unreachable: {reason}")]
    GeocoderTransport { reason: String },

    #[error("Unexpected geocoder response: {reason}")]
    GeocoderResponse { reason: String },

    #[error("Geocoder rate limit exceeded")]
    GeocoderRateLimited,

    // Text generation errors
    #[error("Text generation backend unreachable: {reason}")]
    GenerationTransport { reason: String },

    #[error("Unexpected text generation response: {reason}")]
    GenerationResponse { reason: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GeollmError {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput { field: field.into(), reason: reason.into() }
    }

    /// Whether this failure invalidates the query itself rather than a single backend call.
    ///
    /// The location resolver stops its fallback chain on these.
    pub fn is_query_error(&self) -> bool {
        matches!(self, Self::InvalidQuery { .. })
    }
}

impl From<serde_json::Error> for GeollmError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GeollmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_classification() {
        assert!(GeollmError::InvalidQuery { reason: "empty".into() }.is_query_error());
        assert!(!GeollmError::GeocoderTransport { reason: "timeout".into() }.is_query_error());
        assert!(!GeollmError::GeocoderRateLimited.is_query_error());
    }

    #[test]
    fn test_error_messages() {
        let err = GeollmError::Projection {
            from: "EPSG:4326".into(),
            to: "EPSG:32643".into(),
            reason: "boom".into(),
        };
        assert_eq!(err.to_string(), "Projection from EPSG:4326 to EPSG:32643 failed: boom");

        let err = GeollmError::invalid_input("distance_km", "must be finite");
        assert_eq!(err.to_string(), "Invalid value for distance_km: must be finite");
    }
}
