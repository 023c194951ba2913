pub mod geometry;
pub mod point;
pub mod query;

pub use geometry::{AreaUnit, Crs, Geometry, GeometryType};
pub use point::{BoundingBox, GeoPoint, INDIA_BBOX, INDIA_REGION_MARGIN};
pub use query::{country_bias, has_country_token, GeocodeQuery, SearchOptions, COUNTRY_TOKENS};
