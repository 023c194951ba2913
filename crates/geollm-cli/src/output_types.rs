use geollm_core::models::GeoPoint;
use serde::Serialize;

/// Output for geocode command
#[derive(Debug, Serialize)]
pub struct GeocodeOutput {
    pub query: String,
    pub location: String,
    pub found: bool,
    pub coordinates: Option<GeoPoint>,
    pub near_india: Option<bool>,
}

/// Output for area command
#[derive(Debug, Serialize)]
pub struct AreaOutput {
    pub path: String,
    pub units: String,
    pub total: f64,
    pub items: Vec<AreaItem>,
}

#[derive(Debug, Serialize)]
pub struct AreaItem {
    pub index: usize,
    pub geometry_type: String,
    /// `None` when the geometry could not be measured
    pub area: Option<f64>,
}

/// Output for ask command
#[derive(Debug, Serialize)]
pub struct AskOutput {
    pub question: String,
    pub model: String,
    pub answer: String,
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub values: Vec<ConfigEntry>,
}

#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
    pub source: String,
}
