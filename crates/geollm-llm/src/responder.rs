//! Query responder: prompt in, user-facing text out.
//!
//! Every backend outcome, failures included, becomes a plain string. Failure
//! strings start with `Error:`.

use crate::models::GenerationResponse;
use crate::ports::TextGenerator;
use crate::prompt::build_prompt;
use std::sync::Arc;

/// Finish reason reported when the backend gives none
const UNKNOWN_REASON: &str = "UNKNOWN";

/// Classification of a single generation reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// The prompt was refused before generation
    Blocked { reason: String },
    /// The first candidate has text parts, but they are all empty
    Empty,
    /// The first candidate has no content parts
    NoContent { finish_reason: String },
    /// The reply holds no candidates
    NoCandidates,
    /// Text of the first candidate, parts concatenated in order
    Success(String),
}

impl ResponseOutcome {
    /// Classify a reply. A block reason wins over any candidates present.
    pub fn classify(response: &GenerationResponse) -> Self {
        if let Some(reason) = response.block_reason() {
            return ResponseOutcome::Blocked { reason: reason.to_string() };
        }

        let Some(first) = response.candidates.first() else {
            return ResponseOutcome::NoCandidates;
        };

        match first.content.as_ref().filter(|c| !c.parts.is_empty()) {
            Some(content) => {
                let text: String =
                    content.parts.iter().filter_map(|p| p.text.as_deref()).collect();
                if text.is_empty() {
                    ResponseOutcome::Empty
                } else {
                    ResponseOutcome::Success(text)
                }
            }
            None => ResponseOutcome::NoContent {
                finish_reason: first.finish_reason().unwrap_or(UNKNOWN_REASON).to_string(),
            },
        }
    }

    /// User-facing text for this outcome
    pub fn into_message(self) -> String {
        match self {
            ResponseOutcome::Blocked { reason } => format!(
                "Error: Your query was blocked by the content safety filter. Reason: {}. Please rephrase your question.",
                reason
            ),
            ResponseOutcome::Empty => {
                "Error: The model returned an empty response. Please try rephrasing your question."
                    .to_string()
            }
            ResponseOutcome::NoContent { finish_reason } => format!(
                "Error: The model could not generate a response. Reason: {}. This may be due to safety filters.",
                finish_reason
            ),
            ResponseOutcome::NoCandidates => {
                "Error: Received an invalid response from the AI model (no candidates).".to_string()
            }
            ResponseOutcome::Success(text) => text,
        }
    }
}

/// Message returned when the backend call itself fails
pub fn failure_message(details: &str) -> String {
    format!(
        "Error: An unexpected error occurred while communicating with the AI model. Please check the backend logs. Details: {}",
        details
    )
}

pub struct QueryResponder {
    generator: Arc<dyn TextGenerator>,
}

impl QueryResponder {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub fn model_name(&self) -> &str {
        self.generator.model_name()
    }

    /// Answer a geospatial question. Never fails; see [`ResponseOutcome`].
    pub async fn answer(&self, query: &str) -> String {
        let prompt = build_prompt(query);

        let response = match self.generator.generate(&prompt).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(model = self.model_name(), error = %e, "Error generating response");
                return failure_message(&e.to_string());
            }
        };

        let outcome = ResponseOutcome::classify(&response);
        match &outcome {
            ResponseOutcome::Blocked { reason } => {
                tracing::error!(reason = %reason, "Prompt was blocked by the API")
            }
            ResponseOutcome::Empty => {
                tracing::warn!("API response received, but the generated text is empty")
            }
            ResponseOutcome::NoContent { finish_reason } => {
                tracing::error!(finish_reason = %finish_reason, "API response has no content parts")
            }
            ResponseOutcome::NoCandidates => {
                tracing::error!("No candidates found in the API response")
            }
            ResponseOutcome::Success(text) => {
                tracing::info!(chars = text.len(), "Successfully extracted text from response")
            }
        }
        outcome.into_message()
    }
}
