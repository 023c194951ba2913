use axum::Json;
use geojson::Feature;
use geollm_core::models::GeoPoint;
use geollm_geo::{buffer, buffer_feature};

use crate::dto::BufferRequest;
use crate::error::ApiError;
use crate::extract::LenientJson;

pub async fn handle_buffer(
    LenientJson(request): LenientJson<BufferRequest>,
) -> Result<Json<Feature>, ApiError> {
    let distance_km = request.distance_km();
    let (Some(lat), Some(lon)) = (request.lat, request.lon) else {
        return Err(ApiError::bad_request("Latitude and longitude are required"));
    };

    let polygon = buffer(GeoPoint { lat, lon }, distance_km)
        .map_err(|e| ApiError::internal("Could not create buffer").with_details(e.to_string()))?;

    Ok(Json(buffer_feature(&polygon, distance_km)))
}
