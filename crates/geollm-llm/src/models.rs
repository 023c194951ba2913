//! Response shape of a text generation call.
//!
//! Field names follow the Gemini `generateContent` JSON (camelCase). Every
//! field is optional on the wire.

use serde::{Deserialize, Serialize};

/// Enum value the backend sends when a reason is not set
const UNSPECIFIED_SUFFIX: &str = "_UNSPECIFIED";

fn is_set(reason: &Option<String>) -> Option<&str> {
    reason.as_deref().filter(|r| !r.is_empty() && !r.ends_with(UNSPECIFIED_SUFFIX))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<PromptFeedback>,
}

impl GenerationResponse {
    /// Reason the prompt itself was refused, if it was
    pub fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback.as_ref().and_then(|f| is_set(&f.block_reason))
    }

    /// Response with a single candidate holding `parts` as text parts
    pub fn from_text_parts<S: Into<String>>(parts: impl IntoIterator<Item = S>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Some(Content {
                    parts: parts.into_iter().map(|text| Part { text: Some(text.into()) }).collect(),
                }),
                finish_reason: Some("STOP".to_string()),
            }],
            prompt_feedback: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

impl Candidate {
    pub fn finish_reason(&self) -> Option<&str> {
        is_set(&self.finish_reason)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One chunk of candidate text. Non-text parts deserialize with `text: None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_gemini_reply() {
        let json = serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "Hello"}, {"text": " world"}], "role": "model"},
                "finishReason": "STOP",
                "index": 0
            }],
            "usageMetadata": {"promptTokenCount": 12}
        });
        let response: GenerationResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.candidates.len(), 1);
        assert_eq!(response.candidates[0].finish_reason(), Some("STOP"));
        assert_eq!(response.block_reason(), None);
    }

    #[test]
    fn test_deserialize_blocked_prompt() {
        let json = serde_json::json!({"promptFeedback": {"blockReason": "SAFETY"}});
        let response: GenerationResponse = serde_json::from_value(json).unwrap();
        assert!(response.candidates.is_empty());
        assert_eq!(response.block_reason(), Some("SAFETY"));
    }

    #[test]
    fn test_unspecified_reasons_are_unset() {
        let json = serde_json::json!({
            "promptFeedback": {"blockReason": "BLOCK_REASON_UNSPECIFIED"},
            "candidates": [{"finishReason": "FINISH_REASON_UNSPECIFIED"}]
        });
        let response: GenerationResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.block_reason(), None);
        assert_eq!(response.candidates[0].finish_reason(), None);
    }
}
