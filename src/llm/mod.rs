/// Text-generation client abstraction
///
/// The insight pipeline talks to the external service through the
/// TextGenerator trait so tests can substitute canned or failing
/// implementations. The only production implementation is the Gemini client.

pub mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while generating text
///
/// None of these are fatal to the process: the insight pipeline reduces every
/// variant to its fallback message.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("API key not configured: {0}")]
    MissingCredential(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service returned an error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Client for an external text-generation service
///
/// Implementations accept a model identifier and a prompt and return the
/// generated text. The call may suspend for as long as the service takes;
/// there is no client-side timeout or cancellation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for the given model and prompt
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerationError>;
}

/// Stand-in used when no API key is configured at startup
///
/// Construction of the real client failed, so every call fails too, which the
/// insight pipeline turns into its fallback message instead of a crash.
pub struct UnconfiguredGenerator;

#[async_trait]
impl TextGenerator for UnconfiguredGenerator {
    async fn generate(&self, _model: &str, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::MissingCredential(
            "no text-generation client configured".to_string(),
        ))
    }
}
