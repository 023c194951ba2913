//! Canonical geometry types used across all geollm crates.
//!
//! These types provide a bridge between GeoJSON serialization and the
//! computational geo crate types.

use crate::error::{GeollmError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coordinate Reference System, identified by anything PROJ accepts
/// (an `EPSG:xxxx` code or a `+proj=` definition string)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crs {
    pub definition: String,
    pub name: String,
}

impl Default for Crs {
    fn default() -> Self {
        Self::wgs84()
    }
}

impl Crs {
    pub fn new(definition: impl Into<String>, name: impl Into<String>) -> Self {
        Self { definition: definition.into(), name: name.into() }
    }

    pub fn epsg(code: u32, name: impl Into<String>) -> Self {
        Self::new(format!("EPSG:{}", code), name)
    }

    /// WGS 84 (EPSG:4326)
    pub fn wgs84() -> Self {
        Self::epsg(4326, "WGS 84")
    }

    /// WGS 84 / UTM for the given zone and hemisphere (EPSG:326xx north, 327xx south)
    pub fn utm(zone: u8, north: bool) -> Self {
        let (base, hemisphere) = if north { (32600, 'N') } else { (32700, 'S') };
        Self::epsg(base + u32::from(zone), format!("WGS 84 / UTM zone {}{}", zone, hemisphere))
    }

    /// Albers Equal-Area Conic fitted to the Indian subcontinent
    pub fn india_albers() -> Self {
        Self::new(
            "+proj=aea +lat_1=20 +lat_2=60 +lat_0=40 +lon_0=80 +x_0=0 +y_0=0 \
             +ellps=WGS84 +datum=WGS84 +units=m +no_defs",
            "India Albers Equal Area",
        )
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.definition, self.name)
    }
}

/// Units for reported areas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "String")]
pub enum AreaUnit {
    #[default]
    #[serde(rename = "km2")]
    SquareKilometers,
    #[serde(rename = "m2")]
    SquareMeters,
}

impl AreaUnit {
    /// Convert an area in square meters to this unit
    pub fn from_square_meters(&self, square_meters: f64) -> f64 {
        match self {
            AreaUnit::SquareKilometers => square_meters / 1_000_000.0,
            AreaUnit::SquareMeters => square_meters,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            AreaUnit::SquareKilometers => "km²",
            AreaUnit::SquareMeters => "m²",
        }
    }
}

impl FromStr for AreaUnit {
    type Err = GeollmError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "km2" | "sqkm" | "km²" => Ok(AreaUnit::SquareKilometers),
            "m2" | "sqm" | "m²" => Ok(AreaUnit::SquareMeters),
            _ => Err(GeollmError::invalid_input(
                "units",
                format!("Invalid area unit: {}. Use km2 or m2", s),
            )),
        }
    }
}

impl TryFrom<String> for AreaUnit {
    type Error = GeollmError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Geometry type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GeometryType {
    #[default]
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

/// GeoJSON-compatible geometry representation
///
/// This enum directly maps to GeoJSON geometry types with coordinate arrays.
/// It can be serialized/deserialized as GeoJSON and converted to/from `geo` crate types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        coordinates: [f64; 2],
    },
    LineString {
        coordinates: Vec<[f64; 2]>,
    },
    Polygon {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPoint {
        coordinates: Vec<[f64; 2]>,
    },
    MultiLineString {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<[f64; 2]>>>,
    },
    GeometryCollection {
        geometries: Vec<Geometry>,
    },
}

impl Geometry {
    /// Create a Point geometry
    pub fn point(x: f64, y: f64) -> Self {
        Geometry::Point { coordinates: [x, y] }
    }

    /// Create a Polygon geometry
    pub fn polygon(rings: Vec<Vec<[f64; 2]>>) -> Self {
        Geometry::Polygon { coordinates: rings }
    }

    /// Create a GeometryCollection
    pub fn collection(geometries: Vec<Geometry>) -> Self {
        Geometry::GeometryCollection { geometries }
    }

    /// Get the geometry type
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point { .. } => GeometryType::Point,
            Geometry::LineString { .. } => GeometryType::LineString,
            Geometry::Polygon { .. } => GeometryType::Polygon,
            Geometry::MultiPoint { .. } => GeometryType::MultiPoint,
            Geometry::MultiLineString { .. } => GeometryType::MultiLineString,
            Geometry::MultiPolygon { .. } => GeometryType::MultiPolygon,
            Geometry::GeometryCollection { .. } => GeometryType::GeometryCollection,
        }
    }

    /// True when the geometry carries no positions at all
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point { .. } => false,
            Geometry::LineString { coordinates } | Geometry::MultiPoint { coordinates } => {
                coordinates.is_empty()
            }
            Geometry::Polygon { coordinates } | Geometry::MultiLineString { coordinates } => {
                coordinates.iter().all(Vec::is_empty)
            }
            Geometry::MultiPolygon { coordinates } => {
                coordinates.iter().flatten().all(Vec::is_empty)
            }
            Geometry::GeometryCollection { geometries } => geometries.iter().all(Geometry::is_empty),
        }
    }

    /// Try to parse from a serde_json::Value (GeoJSON)
    pub fn from_geojson(value: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_serialization() {
        let polygon = Geometry::polygon(vec![vec![[77.0, 28.0], [78.0, 28.0], [78.0, 29.0], [77.0, 28.0]]]);
        let json = serde_json::to_string(&polygon).unwrap();
        assert!(json.contains("\"type\":\"Polygon\""));

        let parsed: Geometry = serde_json::from_str(&json).unwrap();
        assert_eq!(polygon, parsed);
    }

    #[test]
    fn test_geometry_collection_from_geojson() {
        let value = serde_json::json!({
            "type": "GeometryCollection",
            "geometries": [
                { "type": "Point", "coordinates": [72.87, 19.07] },
                { "type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]] }
            ]
        });
        let geometry = Geometry::from_geojson(&value).unwrap();
        assert_eq!(geometry.geometry_type(), GeometryType::GeometryCollection);
        assert!(!geometry.is_empty());
    }

    #[test]
    fn test_is_empty() {
        assert!(Geometry::polygon(vec![]).is_empty());
        assert!(Geometry::polygon(vec![vec![]]).is_empty());
        assert!(Geometry::collection(vec![]).is_empty());
        assert!(!Geometry::point(0.0, 0.0).is_empty());
    }

    #[test]
    fn test_area_unit_parsing() {
        assert_eq!("km2".parse::<AreaUnit>().unwrap(), AreaUnit::SquareKilometers);
        assert_eq!("M2".parse::<AreaUnit>().unwrap(), AreaUnit::SquareMeters);
        assert!("acres".parse::<AreaUnit>().is_err());

        let unit: AreaUnit = serde_json::from_str("\"m2\"").unwrap();
        assert_eq!(unit, AreaUnit::SquareMeters);
    }

    #[test]
    fn test_area_unit_deserialization_matches_from_str() {
        let unit: AreaUnit = serde_json::from_str("\"KM2\"").unwrap();
        assert_eq!(unit, AreaUnit::SquareKilometers);
        let unit: AreaUnit = serde_json::from_str("\"sqm\"").unwrap();
        assert_eq!(unit, AreaUnit::SquareMeters);
        assert!(serde_json::from_str::<AreaUnit>("\"acres\"").is_err());

        assert_eq!(serde_json::to_string(&AreaUnit::SquareKilometers).unwrap(), "\"km2\"");
    }

    #[test]
    fn test_area_unit_conversion() {
        assert_eq!(AreaUnit::SquareKilometers.from_square_meters(2_500_000.0), 2.5);
        assert_eq!(AreaUnit::SquareMeters.from_square_meters(2_500_000.0), 2_500_000.0);
    }

    #[test]
    fn test_utm_crs() {
        assert_eq!(Crs::utm(43, true).definition, "EPSG:32643");
        assert_eq!(Crs::utm(7, false).definition, "EPSG:32707");
        assert_eq!(Crs::wgs84().definition, "EPSG:4326");
    }
}
