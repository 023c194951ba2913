use std::sync::Arc;

use axum::{extract::State, Json};
use geollm_core::models::{country_bias, INDIA_BBOX};
use geollm_geo::is_in_region;

use crate::dto::{GeocodeRequest, GeocodeResponse};
use crate::error::ApiError;
use crate::extract::LenientJson;
use crate::state::AppState;

pub async fn handle_geocode(
    State(state): State<Arc<AppState>>,
    LenientJson(request): LenientJson<GeocodeRequest>,
) -> Result<Json<GeocodeResponse>, ApiError> {
    let name = request
        .location
        .filter(|location| !location.is_empty())
        .ok_or_else(|| ApiError::bad_request("No location provided"))?;

    let location = country_bias(&name);

    let point = state.resolver.resolve(&name).await.ok_or_else(|| {
        let message = format!("Could not geocode location: {}", location);
        tracing::warn!("{}", message);
        ApiError::not_found(message)
    })?;

    if !is_in_region(&point, &INDIA_BBOX, state.region_margin) {
        tracing::warn!(lat = point.lat, lon = point.lon, location = %location, "Geocoded point outside India");
        return Err(ApiError::bad_request(format!(
            "Coordinates ({}, {}) are outside India's geographic region",
            point.lat, point.lon
        )));
    }

    Ok(Json(GeocodeResponse { location, coordinates: point }))
}
