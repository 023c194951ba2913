//! GeoLLM LLM - Text generation port and the query responder
//!
//! This crate defines the text generation port, the Gemini adapter
//! implementing it, the assistant prompt, and the responder that turns a
//! backend reply into user-facing text.

pub mod gemini;
pub mod models;
pub mod ports;
pub mod prompt;
pub mod responder;

// Re-export main types
pub use gemini::GeminiGenerator;
pub use models::{Candidate, Content, GenerationResponse, Part, PromptFeedback};
pub use ports::TextGenerator;
pub use prompt::build_prompt;
pub use responder::{QueryResponder, ResponseOutcome};
