//! GeoLLM Core - Domain models, configuration, and ports
//!
//! This crate contains the value types shared by every geollm crate, the
//! unified error type, layered configuration, and the geocoding port.

pub mod config;
pub mod error;
pub mod models;
pub mod ports;

pub use error::{GeollmError, Result};
