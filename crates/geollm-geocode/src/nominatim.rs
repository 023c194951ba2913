//! Nominatim / OpenStreetMap geocoder adapter.
//!
//! Free-text queries go to `/search?q=...`, structured queries to
//! `/search?city=...&state=...&country=...`. Both ask for a single `jsonv2`
//! result.
//!
//! See <https://nominatim.org/release-docs/develop/api/Search/>

use async_trait::async_trait;
use geollm_core::error::{GeollmError, Result};
use geollm_core::models::{GeoPoint, GeocodeQuery, SearchOptions};
use geollm_core::ports::Geocoder;
use reqwest::Url;

/// Nominatim geocoder.
///
/// Performs no throttling of its own; callers share a
/// [`RateLimiter`](crate::RateLimiter) in front of it.
pub struct NominatimGeocoder {
    /// Base URL of the instance, without the `/search` path
    base_url: String,

    /// HTTP client carrying the identifying user agent
    client: reqwest::Client,
}

impl NominatimGeocoder {
    /// Create a geocoder for `base_url`.
    ///
    /// Nominatim rejects anonymous clients, so `user_agent` should identify
    /// the application.
    pub fn new(base_url: impl Into<String>, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(user_agent).build().map_err(|e| {
            GeollmError::GeocoderTransport { reason: format!("Failed to build HTTP client: {}", e) }
        })?;

        Ok(Self { base_url: base_url.into(), client })
    }

    /// Full search URL for a query
    fn search_url(&self, query: &GeocodeQuery) -> Result<Url> {
        let endpoint = format!("{}/search", self.base_url.trim_end_matches('/'));
        Url::parse_with_params(&endpoint, query_params(query)).map_err(|e| {
            GeollmError::InvalidQuery {
                reason: format!("Cannot build search URL from '{}': {}", endpoint, e),
            }
        })
    }
}

fn flag(enabled: bool) -> String {
    if enabled { "1" } else { "0" }.to_string()
}

/// Query-string parameters for a search
fn query_params(query: &GeocodeQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![("format", "jsonv2".to_string()), ("limit", "1".to_string())];

    match query {
        GeocodeQuery::FreeForm { text, options } => {
            let SearchOptions { country_codes, address_details, name_details, extra_tags, language } =
                options;
            params.push(("q", text.clone()));
            params.push(("addressdetails", flag(*address_details)));
            params.push(("namedetails", flag(*name_details)));
            params.push(("extratags", flag(*extra_tags)));
            if let Some(codes) = country_codes {
                params.push(("countrycodes", codes.clone()));
            }
            if let Some(language) = language {
                params.push(("accept-language", language.clone()));
            }
        }
        GeocodeQuery::Structured { city, state, country } => {
            params.push(("city", city.clone()));
            params.push(("state", state.clone()));
            params.push(("country", country.clone()));
        }
    }

    params
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, query: &GeocodeQuery) -> Result<Option<GeoPoint>> {
        query.validate()?;
        let url = self.search_url(query)?;

        let response = self.client.get(url).send().await.map_err(|e| {
            GeollmError::GeocoderTransport {
                reason: format!("Failed to connect to Nominatim at {}: {}", self.base_url, e),
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeollmError::GeocoderRateLimited);
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeollmError::GeocoderResponse {
                reason: format!("Nominatim API error ({}): {}", status, error_text),
            });
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            GeollmError::GeocoderResponse { reason: format!("Failed to parse Nominatim response: {}", e) }
        })?;

        parse_response(&body)
    }

    fn name(&self) -> &str {
        "nominatim"
    }
}

/// Read `lat`/`lon` of the first result. Nominatim sends them as strings.
fn coordinate(result: &serde_json::Value, key: &str) -> Result<f64> {
    let value = &result[key];
    value
        .as_str()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .or_else(|| value.as_f64())
        .ok_or_else(|| GeollmError::GeocoderResponse {
            reason: format!("Missing {} in Nominatim response", key),
        })
}

/// Parses a Nominatim search response.
fn parse_response(body: &serde_json::Value) -> Result<Option<GeoPoint>> {
    let results = body.as_array().ok_or_else(|| GeollmError::GeocoderResponse {
        reason: "Nominatim response is not an array".to_string(),
    })?;

    let Some(first) = results.first() else {
        return Ok(None);
    };

    let lat = coordinate(first, "lat")?;
    let lon = coordinate(first, "lon")?;

    GeoPoint::new(lat, lon)
        .map(Some)
        .map_err(|e| GeollmError::GeocoderResponse { reason: e.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn mumbai_body() -> serde_json::Value {
        serde_json::json!([{
            "lat": "19.0759899",
            "lon": "72.8773928",
            "display_name": "Mumbai, Mumbai Suburban, Maharashtra, India"
        }])
    }

    #[test]
    fn test_parses_result() {
        let point = parse_response(&mumbai_body()).unwrap().unwrap();
        assert!((point.lat - 19.07599).abs() < 1e-4);
        assert!((point.lon - 72.87739).abs() < 1e-4);
    }

    #[test]
    fn test_parses_empty() {
        assert!(parse_response(&serde_json::json!([])).unwrap().is_none());
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(parse_response(&serde_json::json!({"error": "oops"})).is_err());
        assert!(parse_response(&serde_json::json!([{"lat": "abc", "lon": "1"}])).is_err());
        assert!(parse_response(&serde_json::json!([{"lat": "95.0", "lon": "1"}])).is_err());
    }

    #[test]
    fn test_free_form_params() {
        let query = GeocodeQuery::free_form("Mumbai, India", SearchOptions::india());
        let params = query_params(&query);
        assert!(params.contains(&("q", "Mumbai, India".to_string())));
        assert!(params.contains(&("countrycodes", "in".to_string())));
        assert!(params.contains(&("extratags", "1".to_string())));
        assert!(params.contains(&("accept-language", "en".to_string())));

        let params = query_params(&GeocodeQuery::free_form("Mumbai", SearchOptions::worldwide()));
        assert!(!params.iter().any(|(k, _)| *k == "countrycodes"));
        assert!(params.contains(&("extratags", "0".to_string())));
    }

    #[test]
    fn test_structured_params() {
        let params = query_params(&GeocodeQuery::structured_india("Pune", "Maharashtra"));
        assert!(params.contains(&("city", "Pune".to_string())));
        assert!(params.contains(&("state", "Maharashtra".to_string())));
        assert!(params.contains(&("country", "India".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "q"));
    }

    #[test]
    fn test_search_url_trims_slash() {
        let geocoder = NominatimGeocoder::new("http://localhost:8080/", "test-agent").unwrap();
        let url = geocoder
            .search_url(&GeocodeQuery::free_form("Goa", SearchOptions::india()))
            .unwrap();
        assert_eq!(url.path(), "/search");
        assert!(url.query().unwrap().contains("q=Goa"));
    }

    #[tokio::test]
    async fn test_geocode_against_mock_server() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "Mumbai, India"))
            .and(query_param("countrycodes", "in"))
            .respond_with(ResponseTemplate::new(200).set_body_json(mumbai_body()))
            .mount(&mock_server)
            .await;

        let geocoder = NominatimGeocoder::new(mock_server.uri(), "test-agent").unwrap();
        let query = GeocodeQuery::free_form("Mumbai, India", SearchOptions::india());
        let point = geocoder.geocode(&query).await.unwrap().unwrap();
        assert!((point.lat - 19.076).abs() < 1e-3);
    }

    #[tokio::test]
    async fn test_geocode_no_match() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&mock_server)
            .await;

        let geocoder = NominatimGeocoder::new(mock_server.uri(), "test-agent").unwrap();
        let query = GeocodeQuery::structured_india("Xyzzy", "Nowhere");
        assert!(geocoder.geocode(&query).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_geocode_rate_limited() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;

        let geocoder = NominatimGeocoder::new(mock_server.uri(), "test-agent").unwrap();
        let query = GeocodeQuery::free_form("Delhi", SearchOptions::india());
        assert!(matches!(geocoder.geocode(&query).await, Err(GeollmError::GeocoderRateLimited)));
    }

    #[tokio::test]
    async fn test_geocode_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let geocoder = NominatimGeocoder::new(mock_server.uri(), "test-agent").unwrap();
        let query = GeocodeQuery::free_form("Delhi", SearchOptions::india());
        assert!(matches!(
            geocoder.geocode(&query).await,
            Err(GeollmError::GeocoderResponse { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected_before_dispatch() {
        let geocoder = NominatimGeocoder::new("http://127.0.0.1:9", "test-agent").unwrap();
        let query = GeocodeQuery::free_form("   ", SearchOptions::india());
        let err = geocoder.geocode(&query).await.unwrap_err();
        assert!(err.is_query_error());
    }
}
