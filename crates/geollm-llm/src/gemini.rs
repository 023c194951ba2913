use crate::models::GenerationResponse;
use crate::ports::TextGenerator;
use async_trait::async_trait;
use geollm_core::error::{GeollmError, Result};
use serde::Serialize;

/// Gemini text generator
pub struct GeminiGenerator {
    /// Base URL for the API (e.g., "https://generativelanguage.googleapis.com")
    base_url: String,

    /// Model name to generate with
    model: String,

    /// API key sent in the `x-goog-api-key` header
    api_key: String,

    /// HTTP client
    client: reqwest::Client,
}

impl GeminiGenerator {
    /// Create a new Gemini generator
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<GenerationResponse> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent { parts: vec![RequestPart { text: prompt }] }],
        };

        tracing::info!(model = %self.model, "Sending request to Gemini API");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GeollmError::GenerationTransport {
                reason: format!("Failed to connect to Gemini at {}: {}", self.base_url, e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeollmError::GenerationResponse {
                reason: format!("Gemini API error ({}): {}", status, error_text),
            });
        }

        let generation: GenerationResponse =
            response.json().await.map_err(|e| GeollmError::GenerationResponse {
                reason: format!("Failed to parse Gemini response: {}", e),
            })?;

        tracing::info!(
            model = %self.model,
            candidates = generation.candidates.len(),
            "Response received from Gemini API"
        );
        Ok(generation)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Request body for the generateContent API
#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}
