use geollm_core::models::{AreaUnit, GeoPoint, Geometry};
use geollm_geo::DEFAULT_NEAREST_K;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;

/// Buffer radius used when a request leaves `distance_km` out
pub const DEFAULT_BUFFER_KM: f64 = 5.0;

fn default_buffer_km() -> f64 {
    DEFAULT_BUFFER_KM
}

fn default_nearest_k() -> usize {
    DEFAULT_NEAREST_K
}

/// Chat request body
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    pub query: Option<String>,
}

/// Geocode request body
#[derive(Debug, Default, Deserialize)]
pub struct GeocodeRequest {
    pub location: Option<String>,
}

/// Buffer request body
#[derive(Debug, Default, Deserialize)]
pub struct BufferRequest {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub distance_km: Option<f64>,
}

impl BufferRequest {
    pub fn distance_km(&self) -> f64 {
        self.distance_km.unwrap_or(DEFAULT_BUFFER_KM)
    }
}

/// Tool invocation body; `params` is checked against the named tool later
#[derive(Debug, Default, Deserialize)]
pub struct ToolRequest {
    pub tool: Option<String>,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeocodeParams {
    pub location_name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BufferParams {
    pub lat: f64,
    pub lon: f64,
    #[serde(default = "default_buffer_km")]
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AreaParams {
    pub geometry: Geometry,
    #[serde(default)]
    pub units: AreaUnit,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IntersectionParams {
    pub left: Vec<Geometry>,
    pub right: Vec<Geometry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NearestParams {
    pub points: Vec<GeoPoint>,
    pub polygons: Vec<Geometry>,
    #[serde(default = "default_nearest_k")]
    pub k: usize,
}

/// The operations reachable through `/api/tools`
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    Geocode(GeocodeParams),
    Buffer(BufferParams),
    CalculateArea(AreaParams),
    SpatialIntersection(IntersectionParams),
    FindNearestFeatures(NearestParams),
}

impl ToolCall {
    /// Resolve a tool name and its raw parameters into a typed call
    pub fn from_request(name: &str, params: Value) -> Result<Self, ApiError> {
        let params = match params {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };

        match name {
            "geocode" => parse_params(name, params).map(ToolCall::Geocode),
            "buffer" => parse_params(name, params).map(ToolCall::Buffer),
            "calculate_area" => parse_params(name, params).map(ToolCall::CalculateArea),
            "spatial_intersection" => {
                parse_params(name, params).map(ToolCall::SpatialIntersection)
            }
            "find_nearest_features" => {
                parse_params(name, params).map(ToolCall::FindNearestFeatures)
            }
            _ => Err(ApiError::bad_request(format!("Unknown tool: {}", name))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::Geocode(_) => "geocode",
            ToolCall::Buffer(_) => "buffer",
            ToolCall::CalculateArea(_) => "calculate_area",
            ToolCall::SpatialIntersection(_) => "spatial_intersection",
            ToolCall::FindNearestFeatures(_) => "find_nearest_features",
        }
    }
}

fn parse_params<T: serde::de::DeserializeOwned>(tool: &str, params: Value) -> Result<T, ApiError> {
    serde_json::from_value(params).map_err(|e| {
        ApiError::bad_request(format!("Invalid parameters for tool: {}", tool))
            .with_details(e.to_string())
    })
}
