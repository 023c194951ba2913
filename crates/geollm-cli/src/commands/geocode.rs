//! Geocode command implementation

use crate::cli::GeocodeArgs;
use crate::output::OutputWriter;
use crate::output_types::GeocodeOutput;
use anyhow::{Context, Result};
use geollm_core::config::GeollmConfig;
use geollm_core::models::{country_bias, INDIA_BBOX};
use geollm_geo::is_in_region;
use geollm_geocode::{LocationResolver, NominatimGeocoder, RateLimiter};
use std::sync::Arc;

pub async fn execute(args: GeocodeArgs, config: &GeollmConfig, output: &OutputWriter) -> Result<()> {
    let name = args.name();

    let geocoder = NominatimGeocoder::new(config.geocoder_url.value.clone(), &config.user_agent.value)
        .context("Failed to create geocoder")?;
    let limiter = Arc::new(RateLimiter::new(config.geocoder_min_delay()));
    let resolver = LocationResolver::new(Arc::new(geocoder), limiter);

    let point = resolver.resolve(&name).await;
    let near_india = point.map(|p| is_in_region(&p, &INDIA_BBOX, config.region_margin.value));

    if output.is_json() {
        return output.result(GeocodeOutput {
            location: country_bias(&name),
            query: name,
            found: point.is_some(),
            coordinates: point,
            near_india,
        });
    }

    match point {
        Some(point) => {
            output.success(format!("Geocoded {}", name));
            output.kv("Latitude", format!("{:.6}", point.lat));
            output.kv("Longitude", format!("{:.6}", point.lon));
            if near_india == Some(false) {
                output.warning(format!(
                    "Coordinates ({}, {}) are outside India's geographic region",
                    point.lat, point.lon
                ));
            }
        }
        None => output.warning(format!("Could not geocode location: {}", country_bias(&name))),
    }
    Ok(())
}
