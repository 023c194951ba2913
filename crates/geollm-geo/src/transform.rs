//! CRS transformation and UTM zone selection

use crate::models::{Crs, GeoPoint};
use geo::MapCoords;
use geollm_core::error::{GeollmError, Result};
use proj::Proj;

/// Check if two CRS are the same
pub fn crs_match(crs1: &Crs, crs2: &Crs) -> bool {
    crs1.definition == crs2.definition
}

fn projection_error(from: &Crs, to: &Crs, reason: impl Into<String>) -> GeollmError {
    GeollmError::Projection {
        from: from.definition.clone(),
        to: to.definition.clone(),
        reason: reason.into(),
    }
}

/// Build a PROJ pipeline between two CRS.
///
/// `new_known_crs` normalises axis order, so geographic coordinates go in and
/// come out as (lon, lat).
pub fn build_projection(from: &Crs, to: &Crs) -> Result<Proj> {
    Proj::new_known_crs(&from.definition, &to.definition, None)
        .map_err(|e| projection_error(from, to, format!("Failed to create projection: {}", e)))
}

fn convert(proj: &Proj, from: &Crs, to: &Crs, x: f64, y: f64) -> Result<(f64, f64)> {
    let (px, py) = proj
        .convert((x, y))
        .map_err(|e| projection_error(from, to, format!("Projection failed: {}", e)))?;
    if !px.is_finite() || !py.is_finite() {
        return Err(projection_error(
            from,
            to,
            format!("({}, {}) has no finite image in the target CRS", x, y),
        ));
    }
    Ok((px, py))
}

/// Reproject a single coordinate pair
pub fn reproject_coord(x: f64, y: f64, from: &Crs, to: &Crs) -> Result<(f64, f64)> {
    if crs_match(from, to) {
        return Ok((x, y));
    }
    let proj = build_projection(from, to)?;
    convert(&proj, from, to, x, y)
}

/// Reproject any geo geometry from one CRS to another
pub fn reproject<G>(geometry: &G, from: &Crs, to: &Crs) -> Result<G>
where
    G: MapCoords<f64, f64, Output = G> + Clone,
{
    // If CRS are the same, no transformation needed
    if crs_match(from, to) {
        return Ok(geometry.clone());
    }

    let proj = build_projection(from, to)?;
    geometry.try_map_coords(|coord| {
        convert(&proj, from, to, coord.x, coord.y).map(|(x, y)| geo::Coord { x, y })
    })
}

/// UTM zone number covering a longitude: `floor((lon + 180) / 6) + 1`.
///
/// Longitude 180 belongs to zone 60 rather than a non-existent zone 61.
pub fn utm_zone(lon: f64) -> u8 {
    let zone = ((lon + 180.0) / 6.0).floor() as i64 + 1;
    zone.clamp(1, 60) as u8
}

/// WGS 84 / UTM CRS for a point: EPSG:326xx north of the equator, 327xx south
pub fn utm_crs_for(point: &GeoPoint) -> Crs {
    Crs::utm(utm_zone(point.lon), point.lat >= 0.0)
}
