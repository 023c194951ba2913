use crate::models::Geometry;
use geollm_core::error::{GeollmError, Result};

/// Validation result with details
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

/// Validation error with location details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub location: String,
    pub reason: String,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self { is_valid: true, errors: Vec::new() }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, location: String, reason: String) {
        self.is_valid = false;
        self.errors.push(ValidationError { location, reason });
    }

    fn merge(&mut self, prefix: &str, other: ValidationResult) {
        for error in other.errors {
            self.add_error(format!("{}.{}", prefix, error.location), error.reason);
        }
    }
}

fn check_position(result: &mut ValidationResult, location: String, c: &[f64; 2]) {
    if !c[0].is_finite() || !c[1].is_finite() {
        result.add_error(location, "Coordinates must be finite".to_string());
    } else if !(-180.0..=180.0).contains(&c[0]) || !(-90.0..=90.0).contains(&c[1]) {
        result.add_error(
            location,
            format!("({}, {}) is outside the longitude/latitude range", c[0], c[1]),
        );
    }
}

/// Validate a geographic (EPSG:4326, lon/lat) geometry
pub fn validate_geometry(geometry: &Geometry) -> ValidationResult {
    match geometry {
        Geometry::Point { coordinates } => {
            let mut result = ValidationResult::valid();
            check_position(&mut result, "Point".to_string(), coordinates);
            result
        }
        Geometry::LineString { coordinates } => validate_linestring(coordinates),
        Geometry::Polygon { coordinates } => validate_polygon(coordinates),
        Geometry::MultiPoint { coordinates } => {
            let mut result = ValidationResult::valid();
            for (i, c) in coordinates.iter().enumerate() {
                check_position(&mut result, format!("MultiPoint[{}]", i), c);
            }
            result
        }
        Geometry::MultiLineString { coordinates } => {
            let mut result = ValidationResult::valid();
            for (i, line) in coordinates.iter().enumerate() {
                result.merge(&format!("MultiLineString[{}]", i), validate_linestring(line));
            }
            result
        }
        Geometry::MultiPolygon { coordinates } => {
            let mut result = ValidationResult::valid();
            for (i, polygon) in coordinates.iter().enumerate() {
                result.merge(&format!("MultiPolygon[{}]", i), validate_polygon(polygon));
            }
            result
        }
        Geometry::GeometryCollection { geometries } => {
            let mut result = ValidationResult::valid();
            for (i, member) in geometries.iter().enumerate() {
                result.merge(&format!("GeometryCollection[{}]", i), validate_geometry(member));
            }
            result
        }
    }
}

fn validate_linestring(coordinates: &[[f64; 2]]) -> ValidationResult {
    let mut result = ValidationResult::valid();

    // LineString must have at least 2 points
    if coordinates.len() < 2 {
        result.add_error(
            "LineString".to_string(),
            format!("LineString must have at least 2 points, found {}", coordinates.len()),
        );
        return result;
    }

    for (i, c) in coordinates.iter().enumerate() {
        check_position(&mut result, format!("LineString[{}]", i), c);
    }

    result
}

fn validate_ring(result: &mut ValidationResult, location: String, ring: &[[f64; 2]]) {
    if ring.len() < 4 {
        result.add_error(
            location,
            format!("Ring must have at least 4 points, found {}", ring.len()),
        );
        return;
    }

    if ring.first() != ring.last() {
        result.add_error(
            location.clone(),
            "Ring must be closed (first point == last point)".to_string(),
        );
    }

    for (i, c) in ring.iter().enumerate() {
        check_position(result, format!("{}[{}]", location, i), c);
    }
}

fn validate_polygon(rings: &[Vec<[f64; 2]>]) -> ValidationResult {
    let mut result = ValidationResult::valid();

    let Some((exterior, interiors)) = rings.split_first() else {
        result.add_error("Polygon".to_string(), "Polygon has no rings".to_string());
        return result;
    };

    validate_ring(&mut result, "Polygon exterior".to_string(), exterior);
    for (i, interior) in interiors.iter().enumerate() {
        validate_ring(&mut result, format!("Polygon interior[{}]", i), interior);
    }

    result
}

/// Reject empty or malformed geometries before they reach a projection
pub fn ensure_measurable(geometry: &Geometry) -> Result<()> {
    if geometry.is_empty() {
        return Err(GeollmError::InvalidGeometry { reason: "geometry is empty".to_string() });
    }

    let validation = validate_geometry(geometry);
    if validation.is_valid {
        return Ok(());
    }

    Err(GeollmError::InvalidGeometry {
        reason: validation
            .errors
            .first()
            .map(|e| format!("{}: {}", e.location, e.reason))
            .unwrap_or_else(|| "Invalid geometry".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<[f64; 2]> {
        vec![[77.0, 28.0], [78.0, 28.0], [78.0, 29.0], [77.0, 29.0], [77.0, 28.0]]
    }

    #[test]
    fn test_valid_polygon() {
        assert!(validate_geometry(&Geometry::polygon(vec![square()])).is_valid);
    }

    #[test]
    fn test_unclosed_ring() {
        let mut ring = square();
        ring.pop();
        ring.push([77.5, 29.5]);
        let result = validate_geometry(&Geometry::polygon(vec![ring]));
        assert!(!result.is_valid);
        assert!(result.errors[0].reason.contains("closed"));
    }

    #[test]
    fn test_short_ring() {
        let ring = vec![[77.0, 28.0], [78.0, 28.0], [77.0, 28.0]];
        assert!(!validate_geometry(&Geometry::polygon(vec![ring])).is_valid);
    }

    #[test]
    fn test_projected_coordinates_rejected() {
        let ring = vec![
            [500_000.0, 3_000_000.0],
            [510_000.0, 3_000_000.0],
            [510_000.0, 3_010_000.0],
            [500_000.0, 3_000_000.0],
        ];
        let result = validate_geometry(&Geometry::polygon(vec![ring]));
        assert!(!result.is_valid);
        assert!(result.errors[0].reason.contains("outside"));
    }

    #[test]
    fn test_collection_errors_are_prefixed() {
        let geometry = Geometry::collection(vec![
            Geometry::polygon(vec![square()]),
            Geometry::point(f64::NAN, 0.0),
        ]);
        let result = validate_geometry(&geometry);
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].location, "GeometryCollection[1].Point");
    }

    #[test]
    fn test_ensure_measurable() {
        assert!(ensure_measurable(&Geometry::polygon(vec![square()])).is_ok());
        assert!(matches!(
            ensure_measurable(&Geometry::polygon(vec![])),
            Err(GeollmError::InvalidGeometry { .. })
        ));
        assert!(ensure_measurable(&Geometry::collection(vec![])).is_err());
    }
}
