//! Overlay and proximity queries between sets of geometries.
//!
//! Canonical geometries are always WGS 84 (lon, lat), so both sides of a
//! query already share a CRS. Distances used for ranking are planar, in
//! degrees.

use crate::models::{from_geo_geometry, GeoPoint, Geometry, GeometryExt};
use crate::validation::ensure_measurable;
use geo::{BooleanOps, BoundingRect, Distance, Euclidean, Geometry as GeoGeometry, MultiPolygon, Point};
use geollm_core::error::{GeollmError, Result};
use rstar::{PointDistance, RTree, RTreeObject, AABB};

/// Neighbours returned per point when a caller does not say
pub const DEFAULT_NEAREST_K: usize = 5;

/// A non-empty overlap between one left and one right input
#[derive(Debug, Clone, PartialEq)]
pub struct Overlap {
    /// Position of the left input
    pub left: usize,
    /// Position of the right input
    pub right: usize,
    pub geometry: Geometry,
}

/// Polygonal input held in the R-tree with its original position
struct IndexedShape {
    index: usize,
    shape: MultiPolygon<f64>,
    envelope: AABB<[f64; 2]>,
}

impl IndexedShape {
    fn new(index: usize, shape: MultiPolygon<f64>) -> Option<Self> {
        let envelope = envelope_of(&shape)?;
        Some(Self { index, shape, envelope })
    }
}

impl RTreeObject for IndexedShape {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl PointDistance for IndexedShape {
    // Zero inside the shape, so containing polygons rank first
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let point = Point::new(point[0], point[1]);
        let distance = self
            .shape
            .iter()
            .map(|polygon| Euclidean.distance(&point, polygon))
            .fold(f64::INFINITY, f64::min);
        distance * distance
    }
}

fn envelope_of(shape: &MultiPolygon<f64>) -> Option<AABB<[f64; 2]>> {
    let rect = shape.bounding_rect()?;
    Some(AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]))
}

fn polygonal(geometry: &Geometry, field: &str) -> Result<MultiPolygon<f64>> {
    ensure_measurable(geometry)?;
    match geometry.to_geo() {
        GeoGeometry::Polygon(polygon) => Ok(MultiPolygon::new(vec![polygon])),
        GeoGeometry::MultiPolygon(multi) => Ok(multi),
        _ => Err(GeollmError::invalid_input(
            field,
            format!("expected Polygon or MultiPolygon, got {:?}", geometry.geometry_type()),
        )),
    }
}

fn shape_index(geometries: &[Geometry], field: &str) -> Result<RTree<IndexedShape>> {
    let mut entries = Vec::with_capacity(geometries.len());
    for (index, geometry) in geometries.iter().enumerate() {
        if let Some(entry) = IndexedShape::new(index, polygonal(geometry, field)?) {
            entries.push(entry);
        }
    }
    Ok(RTree::bulk_load(entries))
}

/// Pairwise intersection of two polygon sets.
///
/// Every left/right pair with a non-empty overlap produces one [`Overlap`],
/// ordered by left position, then right position. Non-polygonal inputs are
/// rejected.
pub fn intersection(left: &[Geometry], right: &[Geometry]) -> Result<Vec<Overlap>> {
    match overlay(left, right) {
        Ok(overlaps) => {
            tracing::info!(
                left = left.len(),
                right = right.len(),
                features = overlaps.len(),
                "Performed spatial intersection"
            );
            Ok(overlaps)
        }
        Err(e) => {
            tracing::error!(error = %e, "Error performing spatial intersection");
            Err(e)
        }
    }
}

fn overlay(left: &[Geometry], right: &[Geometry]) -> Result<Vec<Overlap>> {
    let left_shapes =
        left.iter().map(|geometry| polygonal(geometry, "left")).collect::<Result<Vec<_>>>()?;
    let index = shape_index(right, "right")?;

    let mut overlaps = Vec::new();
    for (position, shape) in left_shapes.iter().enumerate() {
        let Some(envelope) = envelope_of(shape) else {
            continue;
        };

        let mut candidates: Vec<&IndexedShape> =
            index.locate_in_envelope_intersecting(&envelope).collect();
        candidates.sort_by_key(|candidate| candidate.index);

        for candidate in candidates {
            let shared = shape.intersection(&candidate.shape);
            if shared.0.is_empty() {
                continue;
            }
            overlaps.push(Overlap {
                left: position,
                right: candidate.index,
                geometry: from_geo_geometry(&GeoGeometry::MultiPolygon(shared)),
            });
        }
    }

    Ok(overlaps)
}

/// Positions of the `k` polygons nearest to each point, closest first.
///
/// The result has one entry per input point. A point inside a polygon is at
/// distance zero from it.
pub fn nearest_features(
    points: &[GeoPoint],
    polygons: &[Geometry],
    k: usize,
) -> Result<Vec<Vec<usize>>> {
    match find_nearest(points, polygons, k) {
        Ok(nearest) => {
            tracing::info!(points = points.len(), polygons = polygons.len(), k, "Found nearest features");
            Ok(nearest)
        }
        Err(e) => {
            tracing::error!(error = %e, "Error finding nearest features");
            Err(e)
        }
    }
}

fn find_nearest(points: &[GeoPoint], polygons: &[Geometry], k: usize) -> Result<Vec<Vec<usize>>> {
    let index = shape_index(polygons, "polygons")?;

    points
        .iter()
        .map(|point| {
            if !point.is_valid() {
                return Err(GeollmError::invalid_input(
                    "points",
                    format!("({}, {}) is not a valid latitude/longitude pair", point.lat, point.lon),
                ));
            }
            Ok(index
                .nearest_neighbor_iter(&[point.lon, point.lat])
                .take(k)
                .map(|shape| shape.index)
                .collect())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Area;

    fn square(min_x: f64, min_y: f64, size: f64) -> Geometry {
        Geometry::polygon(vec![vec![
            [min_x, min_y],
            [min_x + size, min_y],
            [min_x + size, min_y + size],
            [min_x, min_y + size],
            [min_x, min_y],
        ]])
    }

    fn at(lon: f64, lat: f64) -> GeoPoint {
        GeoPoint { lat, lon }
    }

    #[test]
    fn test_overlapping_squares() {
        let left = vec![square(0.0, 0.0, 2.0)];
        let right = vec![square(10.0, 10.0, 1.0), square(1.0, 1.0, 2.0)];

        let overlaps = intersection(&left, &right).unwrap();

        assert_eq!(overlaps.len(), 1);
        assert_eq!(overlaps[0].left, 0);
        assert_eq!(overlaps[0].right, 1);
        let shared = overlaps[0].geometry.to_geo().unsigned_area();
        assert!((shared - 1.0).abs() < 1e-9, "shared area {}", shared);
    }

    #[test]
    fn test_intersection_orders_pairs() {
        let left = vec![square(0.0, 0.0, 4.0), square(20.0, 20.0, 1.0), square(2.0, 2.0, 4.0)];
        let right = vec![square(3.0, 3.0, 1.0), square(0.5, 0.5, 1.0)];

        let pairs: Vec<(usize, usize)> = intersection(&left, &right)
            .unwrap()
            .iter()
            .map(|overlap| (overlap.left, overlap.right))
            .collect();

        assert_eq!(pairs, vec![(0, 0), (0, 1), (2, 0)]);
    }

    #[test]
    fn test_disjoint_sets_have_no_overlap() {
        let overlaps = intersection(&[square(0.0, 0.0, 1.0)], &[square(5.0, 5.0, 1.0)]).unwrap();
        assert!(overlaps.is_empty());
        assert!(intersection(&[], &[square(0.0, 0.0, 1.0)]).unwrap().is_empty());
    }

    #[test]
    fn test_intersection_rejects_points() {
        let err = intersection(&[Geometry::point(77.2, 28.6)], &[square(77.0, 28.0, 1.0)])
            .unwrap_err();
        assert!(matches!(err, GeollmError::InvalidInput { ref field, .. } if field == "left"));
    }

    #[test]
    fn test_intersection_rejects_open_ring() {
        let open = Geometry::polygon(vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]]);
        let err = intersection(&[square(0.0, 0.0, 1.0)], &[open]).unwrap_err();
        assert!(matches!(err, GeollmError::InvalidGeometry { .. }));
    }

    #[test]
    fn test_nearest_ranks_by_distance() {
        let polygons = vec![square(5.0, 5.0, 1.0), square(0.0, 0.0, 1.0), square(2.0, 2.0, 1.0)];

        let nearest = nearest_features(&[at(0.5, 0.5), at(6.0, 7.0)], &polygons, 2).unwrap();

        assert_eq!(nearest, vec![vec![1, 2], vec![0, 2]]);
    }

    #[test]
    fn test_nearest_uses_shape_not_envelope() {
        // (9, 9) lies in the triangle's bounding box but about 5.7 from its edge
        let triangle =
            Geometry::polygon(vec![vec![[0.0, 0.0], [10.0, 0.0], [0.0, 10.0], [0.0, 0.0]]]);
        let polygons = vec![triangle, square(9.5, 11.0, 1.0)];

        let nearest = nearest_features(&[at(9.0, 9.0)], &polygons, 1).unwrap();

        assert_eq!(nearest, vec![vec![1]]);
    }

    #[test]
    fn test_nearest_k_bounds() {
        let polygons = vec![square(0.0, 0.0, 1.0), square(3.0, 0.0, 1.0)];

        let all = nearest_features(&[at(10.0, 0.5)], &polygons, DEFAULT_NEAREST_K).unwrap();
        assert_eq!(all, vec![vec![1, 0]]);

        let none = nearest_features(&[at(10.0, 0.5)], &polygons, 0).unwrap();
        assert_eq!(none, vec![Vec::<usize>::new()]);

        assert!(nearest_features(&[], &polygons, 3).unwrap().is_empty());
    }

    #[test]
    fn test_nearest_rejects_invalid_point() {
        let err = nearest_features(&[at(0.0, 95.0)], &[square(0.0, 0.0, 1.0)], 1).unwrap_err();
        assert!(matches!(err, GeollmError::InvalidInput { ref field, .. } if field == "points"));
    }
}
