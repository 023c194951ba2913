//! Equal-area measurement.
//!
//! Geometries are projected to an Albers equal-area conic tuned for India
//! before the planar area is taken. Areas far from the subcontinent are
//! still computed, with growing distortion.

use crate::models::{AreaUnit, Crs, Geometry, GeometryExt};
use crate::transform::reproject;
use crate::validation::ensure_measurable;
use geo::Area;
use geollm_core::error::Result;

/// Area of a WGS 84 geometry in `unit`.
///
/// Points and lines measure zero; collections sum their members.
pub fn area(geometry: &Geometry, unit: AreaUnit) -> Result<f64> {
    let measured = ensure_measurable(geometry).and_then(|_| {
        let projected = reproject(&geometry.to_geo(), &Crs::wgs84(), &Crs::india_albers())?;
        Ok(unit.from_square_meters(projected.unsigned_area()))
    });

    match &measured {
        Ok(value) => tracing::info!(
            geometry_type = ?geometry.geometry_type(),
            area = value,
            unit = unit.symbol(),
            "Calculated area"
        ),
        Err(e) => tracing::error!(
            geometry_type = ?geometry.geometry_type(),
            error = %e,
            "Error calculating area"
        ),
    }
    measured
}
