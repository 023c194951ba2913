//! GeoLLM Geocode - Place name resolution
//!
//! This crate provides the Nominatim adapter for the [`Geocoder`] port, the
//! process-wide rate limiter guarding it, and the [`LocationResolver`] that
//! runs the fallback search over both.
//!
//! [`Geocoder`]: geollm_core::ports::Geocoder

pub mod nominatim;
pub mod rate_limit;
pub mod resolver;

pub use nominatim::NominatimGeocoder;
pub use rate_limit::RateLimiter;
pub use resolver::LocationResolver;
