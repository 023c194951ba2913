//! Place name to coordinate resolution with fallback search.
//!
//! Resolution runs up to three stages against the geocoder, stopping at the
//! first hit:
//!
//! 1. the name biased towards India (", India" appended unless it already
//!    names a country), restricted to country code `in`
//! 2. the untouched name with no country restriction, only when stage 1
//!    changed the search text
//! 3. structured `{city, state, country: India}` queries, one per way of
//!    picking a single token as the city and joining the rest as the state
//!
//! Every backend call passes through the shared [`RateLimiter`].

use crate::rate_limit::RateLimiter;
use geollm_core::error::{GeollmError, Result};
use geollm_core::models::{country_bias, GeoPoint, GeocodeQuery, SearchOptions};
use geollm_core::ports::Geocoder;
use std::sync::Arc;

/// Outcome of one stage: `Ok(Some)` stops the search, `Ok(None)` falls
/// through, `Err` aborts resolution.
type StageResult = Result<Option<GeoPoint>>;

pub struct LocationResolver {
    geocoder: Arc<dyn Geocoder>,
    limiter: Arc<RateLimiter>,
}

impl LocationResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>, limiter: Arc<RateLimiter>) -> Self {
        Self { geocoder, limiter }
    }

    /// Resolve a place name, returning `None` when every stage comes up empty.
    ///
    /// Backend failures are logged and never returned. The point, when
    /// present, has valid lat/lon ranges but may lie outside India.
    pub async fn resolve(&self, name: &str) -> Option<GeoPoint> {
        match self.run_stages(name).await {
            Ok(Some((point, stage))) => {
                tracing::info!(
                    location = name,
                    lat = point.lat,
                    lon = point.lon,
                    stage,
                    "Geocoded location"
                );
                Some(point)
            }
            Ok(None) => {
                tracing::warn!(location = name, "Could not geocode location");
                None
            }
            Err(e) => {
                tracing::error!(location = name, error = %e, "Error geocoding location");
                None
            }
        }
    }

    async fn run_stages(&self, name: &str) -> Result<Option<(GeoPoint, &'static str)>> {
        if name.trim().is_empty() {
            return Err(GeollmError::InvalidQuery { reason: "location name is empty".to_string() });
        }
        let biased = country_bias(name);

        if let Some(point) = self.biased_search(&biased).await? {
            return Ok(Some((point, "biased")));
        }
        if biased != name {
            if let Some(point) = self.unbiased_search(name).await? {
                return Ok(Some((point, "unbiased")));
            }
        }
        if let Some(point) = self.structured_search(name).await? {
            return Ok(Some((point, "structured")));
        }
        Ok(None)
    }

    async fn biased_search(&self, search_text: &str) -> StageResult {
        self.lookup(GeocodeQuery::free_form(search_text, SearchOptions::india())).await
    }

    async fn unbiased_search(&self, name: &str) -> StageResult {
        self.lookup(GeocodeQuery::free_form(name, SearchOptions::worldwide())).await
    }

    async fn structured_search(&self, name: &str) -> StageResult {
        for query in structured_candidates(name) {
            if let Some(point) = self.lookup(query).await? {
                return Ok(Some(point));
            }
        }
        Ok(None)
    }

    /// One rate-limited backend call.
    ///
    /// Transport and response failures count as "no result"; only errors that
    /// invalidate the query itself are returned.
    async fn lookup(&self, query: GeocodeQuery) -> StageResult {
        query.validate()?;
        self.limiter.acquire().await;

        match self.geocoder.geocode(&query).await {
            Ok(Some(point)) if point.is_valid() => Ok(Some(point)),
            Ok(Some(point)) => {
                tracing::warn!(
                    query = %query.describe(),
                    lat = point.lat,
                    lon = point.lon,
                    "Discarding out-of-range geocoder result"
                );
                Ok(None)
            }
            Ok(None) => Ok(None),
            Err(e) if e.is_query_error() => Err(e),
            Err(e) => {
                tracing::warn!(
                    geocoder = self.geocoder.name(),
                    query = %query.describe(),
                    error = %e,
                    "Geocoder call failed, trying next"
                );
                Ok(None)
            }
        }
    }
}

/// Structured city/state queries for every split position of a multi-word name
fn structured_candidates(name: &str) -> Vec<GeocodeQuery> {
    let tokens: Vec<&str> = name.split_whitespace().collect();
    if tokens.len() < 2 {
        return Vec::new();
    }

    (0..tokens.len())
        .map(|i| {
            let state = tokens
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, token)| *token)
                .collect::<Vec<_>>()
                .join(" ");
            GeocodeQuery::structured_india(tokens[i], state)
        })
        .collect()
}
