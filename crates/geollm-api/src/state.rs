use std::sync::Arc;

use geollm_core::config::GeollmConfig;
use geollm_core::error::Result;
use geollm_core::ports::Geocoder;
use geollm_geocode::{LocationResolver, NominatimGeocoder, RateLimiter};
use geollm_llm::{GeminiGenerator, QueryResponder, TextGenerator};

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<LocationResolver>,
    pub responder: Arc<QueryResponder>,
    /// Degrees of tolerance around India when accepting geocoded points
    pub region_margin: f64,
}

impl AppState {
    pub fn new(resolver: LocationResolver, responder: QueryResponder, region_margin: f64) -> Self {
        Self { resolver: Arc::new(resolver), responder: Arc::new(responder), region_margin }
    }

    /// Wire the Nominatim and Gemini adapters from service settings
    pub fn from_config(config: &GeollmConfig, api_key: String) -> Result<Self> {
        let geocoder: Arc<dyn Geocoder> = Arc::new(NominatimGeocoder::new(
            config.geocoder_url.value.clone(),
            &config.user_agent.value,
        )?);
        let limiter = Arc::new(RateLimiter::new(config.geocoder_min_delay()));

        let generator: Arc<dyn TextGenerator> = Arc::new(GeminiGenerator::new(
            config.llm_url.value.clone(),
            config.llm_model.value.clone(),
            api_key,
        ));

        Ok(Self::new(
            LocationResolver::new(geocoder, limiter),
            QueryResponder::new(generator),
            config.region_margin.value,
        ))
    }
}
