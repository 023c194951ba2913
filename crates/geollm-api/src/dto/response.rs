use geollm_core::models::GeoPoint;
use serde::Serialize;
use serde_json::Value;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "ok".to_string(), service: "geollm-api".to_string() }
    }
}

/// Chat response
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Geocode response
#[derive(Debug, Serialize)]
pub struct GeocodeResponse {
    /// The searched name, with the India bias applied
    pub location: String,
    pub coordinates: GeoPoint,
}

/// Tool invocation response. `result` is `null` when the operation failed.
#[derive(Debug, Serialize)]
pub struct ToolResponse {
    pub tool: String,
    pub result: Value,
}
