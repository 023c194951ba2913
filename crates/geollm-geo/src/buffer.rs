//! Metric buffers around geographic points.
//!
//! A circle of fixed ground radius is only circular in a locally conformal
//! projection, so the circle is built in the point's UTM zone and the ring is
//! projected back to WGS 84.

use crate::models::{Crs, GeoPoint};
use crate::transform::{reproject, reproject_coord, utm_crs_for};
use geo::{Coord, LineString, Polygon};
use geojson::{Feature, JsonObject};
use geollm_core::error::{GeollmError, Result};
use std::f64::consts::PI;

/// Vertices used to approximate the circle (16 per quarter turn)
pub const BUFFER_SEGMENTS: usize = 64;

/// Buffer `point` by `distance_km` kilometres, returning a closed WGS 84 polygon
/// with (lon, lat) coordinates.
///
/// A distance of zero yields an empty polygon.
pub fn buffer(point: GeoPoint, distance_km: f64) -> Result<Polygon<f64>> {
    match build_buffer(point, distance_km) {
        Ok(polygon) => {
            tracing::info!(
                lat = point.lat,
                lon = point.lon,
                distance_km,
                vertices = polygon.exterior().0.len(),
                "Created buffer"
            );
            Ok(polygon)
        }
        Err(e) => {
            tracing::error!(
                lat = point.lat,
                lon = point.lon,
                distance_km,
                error = %e,
                "Error creating buffer"
            );
            Err(e)
        }
    }
}

fn build_buffer(point: GeoPoint, distance_km: f64) -> Result<Polygon<f64>> {
    if !point.is_valid() {
        return Err(GeollmError::invalid_input(
            "point",
            format!("({}, {}) is not a valid latitude/longitude pair", point.lat, point.lon),
        ));
    }
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(GeollmError::invalid_input(
            "distance_km",
            format!("{} is not a finite, non-negative distance", distance_km),
        ));
    }
    if distance_km == 0.0 {
        return Ok(Polygon::new(LineString::new(vec![]), vec![]));
    }

    let wgs84 = Crs::wgs84();
    let utm = utm_crs_for(&point);

    let (x, y) = reproject_coord(point.lon, point.lat, &wgs84, &utm)?;
    let circle = circle(x, y, distance_km * 1000.0);

    reproject(&circle, &utm, &wgs84)
}

/// Counter-clockwise closed ring of [`BUFFER_SEGMENTS`] vertices, starting due east
fn circle(cx: f64, cy: f64, radius: f64) -> Polygon<f64> {
    let mut ring: Vec<Coord<f64>> = (0..BUFFER_SEGMENTS)
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / BUFFER_SEGMENTS as f64;
            Coord { x: cx + radius * angle.cos(), y: cy + radius * angle.sin() }
        })
        .collect();
    ring.push(ring[0]);
    Polygon::new(LineString::new(ring), vec![])
}

/// GeoJSON Feature for a buffer polygon, with `distance_km` as its only property.
///
/// The exterior ring keeps its closing vertex.
pub fn buffer_feature(polygon: &Polygon<f64>, distance_km: f64) -> Feature {
    let ring: Vec<Vec<f64>> = polygon.exterior().coords().map(|c| vec![c.x, c.y]).collect();

    let mut properties = JsonObject::new();
    properties.insert("distance_km".to_string(), serde_json::json!(distance_km));

    Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(geojson::Value::Polygon(vec![ring]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELHI: GeoPoint = GeoPoint { lat: 28.6139, lon: 77.209 };

    #[test]
    fn test_buffer_ring_is_closed() {
        let polygon = buffer(DELHI, 5.0).unwrap();
        let ring = &polygon.exterior().0;
        assert_eq!(ring.len(), BUFFER_SEGMENTS + 1);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn test_buffer_surrounds_center() {
        use geo::Contains;
        let polygon = buffer(DELHI, 2.0).unwrap();
        assert!(polygon.contains(&geo::Point::new(DELHI.lon, DELHI.lat)));
    }

    #[test]
    fn test_buffer_radius_in_degrees() {
        // 10 km is ~0.09° of latitude anywhere
        let polygon = buffer(DELHI, 10.0).unwrap();
        let max_lat = polygon.exterior().coords().map(|c| c.y).fold(f64::MIN, f64::max);
        let north_offset = max_lat - DELHI.lat;
        assert!((north_offset - 0.0902).abs() < 0.002, "north offset {}", north_offset);
    }

    #[test]
    fn test_zero_distance_is_empty() {
        let first = buffer(DELHI, 0.0).unwrap();
        let second = buffer(DELHI, 0.0).unwrap();
        assert!(first.exterior().0.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_distance() {
        assert!(matches!(buffer(DELHI, -1.0), Err(GeollmError::InvalidInput { .. })));
        assert!(buffer(DELHI, f64::NAN).is_err());
        assert!(buffer(DELHI, f64::INFINITY).is_err());
    }

    #[test]
    fn test_invalid_point() {
        let bad = GeoPoint { lat: 95.0, lon: 77.0 };
        assert!(matches!(buffer(bad, 1.0), Err(GeollmError::InvalidInput { .. })));
    }

    #[test]
    fn test_southern_hemisphere_buffer() {
        let point = GeoPoint { lat: -12.4634, lon: 130.8456 };
        let polygon = buffer(point, 3.0).unwrap();
        assert!(polygon.exterior().coords().all(|c| c.y < 0.0));
    }

    #[test]
    fn test_buffer_feature_shape() {
        let polygon = buffer(DELHI, 1.0).unwrap();
        let feature = buffer_feature(&polygon, 1.0);
        let json = serde_json::to_value(&feature).unwrap();

        assert_eq!(json["type"], "Feature");
        assert_eq!(json["properties"]["distance_km"], 1.0);
        assert_eq!(json["geometry"]["type"], "Polygon");

        let ring = json["geometry"]["coordinates"][0].as_array().unwrap();
        assert_eq!(ring.len(), BUFFER_SEGMENTS + 1);
        assert_eq!(ring.first(), ring.last());
        // lon first
        assert!((ring[0][0].as_f64().unwrap() - 77.3).abs() < 0.1);
    }

    #[test]
    fn test_empty_buffer_feature() {
        let polygon = buffer(DELHI, 0.0).unwrap();
        let json = serde_json::to_value(buffer_feature(&polygon, 0.0)).unwrap();
        assert_eq!(json["geometry"]["coordinates"], serde_json::json!([[]]));
    }
}
