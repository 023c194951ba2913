use geollm_core::models::GeoPoint;
use geollm_geo::{area, buffer, buffer_feature, intersection, nearest_features};
use serde_json::{json, Value};

use crate::dto::ToolCall;
use crate::state::AppState;

pub struct ToolService;

impl ToolService {
    /// Run a tool call. Failures are logged by the operation and reported as `null`.
    pub async fn run(state: &AppState, call: &ToolCall) -> Value {
        match call {
            ToolCall::Geocode(params) => state
                .resolver
                .resolve(&params.location_name)
                .await
                .map(|point| json!([point.lat, point.lon]))
                .unwrap_or(Value::Null),

            ToolCall::Buffer(params) => {
                let center = GeoPoint { lat: params.lat, lon: params.lon };
                buffer(center, params.distance_km)
                    .ok()
                    .and_then(|polygon| {
                        serde_json::to_value(buffer_feature(&polygon, params.distance_km)).ok()
                    })
                    .unwrap_or(Value::Null)
            }

            ToolCall::CalculateArea(params) => {
                area(&params.geometry, params.units).map(|value| json!(value)).unwrap_or(Value::Null)
            }

            ToolCall::SpatialIntersection(params) => intersection(&params.left, &params.right)
                .map(|overlaps| {
                    overlaps
                        .into_iter()
                        .map(|overlap| {
                            json!({
                                "left": overlap.left,
                                "right": overlap.right,
                                "geometry": overlap.geometry,
                            })
                        })
                        .collect::<Vec<_>>()
                })
                .map(Value::from)
                .unwrap_or(Value::Null),

            ToolCall::FindNearestFeatures(params) => {
                nearest_features(&params.points, &params.polygons, params.k)
                    .map(|nearest| json!(nearest))
                    .unwrap_or(Value::Null)
            }
        }
    }
}
