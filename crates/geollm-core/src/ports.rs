//! Port trait definitions
//!
//! These traits define the interfaces that adapters must implement.

use crate::error::Result;
use crate::models::{GeoPoint, GeocodeQuery};
use async_trait::async_trait;

/// Port for a forward geocoding backend
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Look up a single best match for the query
    ///
    /// Returns `Ok(None)` when the backend answered but found nothing.
    async fn geocode(&self, query: &GeocodeQuery) -> Result<Option<GeoPoint>>;

    /// Name of the backend, used in logs
    fn name(&self) -> &str;
}
