//! LLM port definitions

use crate::models::GenerationResponse;
use async_trait::async_trait;
use geollm_core::error::Result;

/// Port for a hosted text generation backend
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send a prompt and return the backend's structured reply
    ///
    /// # Arguments
    /// * `prompt` - The complete prompt text
    ///
    /// # Returns
    /// The raw response, including candidates and block metadata. Interpreting
    /// it is left to the caller.
    async fn generate(&self, prompt: &str) -> Result<GenerationResponse>;

    /// Get the name/identifier of the generation model
    fn model_name(&self) -> &str;
}
