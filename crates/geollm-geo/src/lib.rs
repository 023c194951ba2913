//! GeoLLM Geo - Region checks, CRS transforms, and spatial measurement
//!
//! This crate handles every geometric operation: the India region predicate,
//! reprojection through PROJ, metric buffering in UTM, equal-area
//! measurement, and overlay/nearest queries between geometry sets.

pub mod area;
pub mod buffer;
pub mod models;
pub mod region;
pub mod spatial;
pub mod transform;
pub mod validation;

pub use area::area;
pub use buffer::{buffer, buffer_feature};
pub use region::is_in_region;
pub use spatial::{intersection, nearest_features, Overlap, DEFAULT_NEAREST_K};
