//! Region membership checks.

use geollm_core::models::{BoundingBox, GeoPoint};

/// True when `point` lies inside `bbox` grown by `margin_degrees` on every side.
///
/// Bounds are inclusive. The check is plain arithmetic: no wrap-around at the
/// antimeridian and no clamping at the poles.
pub fn is_in_region(point: &GeoPoint, bbox: &BoundingBox, margin_degrees: f64) -> bool {
    let region = bbox.expanded(margin_degrees);
    (region.min_lat..=region.max_lat).contains(&point.lat)
        && (region.min_lon..=region.max_lon).contains(&point.lon)
}
