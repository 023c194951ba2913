//! Geographic point and bounding box value types.

use crate::error::{GeollmError, Result};
use serde::{Deserialize, Serialize};

/// A WGS 84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Create a point, rejecting coordinates outside the valid lat/lon ranges
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        let point = Self { lat, lon };
        if !point.is_valid() {
            return Err(GeollmError::invalid_input(
                "coordinates",
                format!("({}, {}) is not a valid latitude/longitude pair", lat, lon),
            ));
        }
        Ok(point)
    }

    /// Latitude in [-90, 90] and longitude in [-180, 180], both finite
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Coordinates in GeoJSON axis order
    pub fn to_lon_lat(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

/// An axis-aligned lat/lon envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub const fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self { min_lat, max_lat, min_lon, max_lon }
    }

    /// Grow every edge outward by `margin` degrees
    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            min_lat: self.min_lat - margin,
            max_lat: self.max_lat + margin,
            min_lon: self.min_lon - margin,
            max_lon: self.max_lon + margin,
        }
    }
}

/// Mainland India envelope.
pub const INDIA_BBOX: BoundingBox = BoundingBox::new(6.5, 37.5, 68.0, 97.5);

/// Tolerance, in degrees, applied around [`INDIA_BBOX`] when accepting geocoder results.
pub const INDIA_REGION_MARGIN: f64 = 5.0;
