/// Google Gemini implementation of the text-generation client
///
/// This module talks to the Generative Language REST API. Only plain
/// non-streaming text completion is implemented; that is all the analysis
/// pipeline needs.

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::llm::{GenerationError, TextGenerator};

/// Environment variable holding the API key
const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Base URL for the Gemini API
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Gemini API request structure
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

/// Content structure for the Gemini API
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<ContentPart>,
}

/// A text part of a content block
#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    text: String,
}

/// Gemini API response structure
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiError>,
}

/// Response candidate
#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
}

/// API error payload from Gemini
#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Client Implementation
// ============================================================================

/// Google Gemini text-generation client
pub struct GeminiClient {
    api_key: String,
    client: Client,
}

impl GeminiClient {
    /// Create a new client with an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
        }
    }

    /// Create a client from the `GEMINI_API_KEY` environment variable
    ///
    /// Returns an error if the variable is not set; the caller decides how to
    /// degrade (the app falls back to an unconfigured generator).
    pub fn from_env() -> Result<Self, GenerationError> {
        let api_key = env::var(GEMINI_API_KEY_ENV).map_err(|_| {
            GenerationError::MissingCredential(format!(
                "{} environment variable not set",
                GEMINI_API_KEY_ENV
            ))
        })?;
        Ok(Self::new(api_key))
    }

    /// Build the API URL for a model
    fn build_url(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            API_BASE_URL, model, self.api_key
        )
    }

    /// Extract the generated text from a response
    fn extract_text(response: GeminiResponse) -> Result<String, GenerationError> {
        if let Some(error) = response.error {
            return Err(GenerationError::MalformedResponse(format!(
                "API error in response body: {}",
                error.message
            )));
        }

        response
            .candidates
            .and_then(|mut c| c.drain(..).next())
            .and_then(|c| c.content)
            .and_then(|mut c| c.parts.drain(..).next())
            .map(|p| p.text)
            .ok_or_else(|| {
                GenerationError::MalformedResponse("no text candidate in response".to_string())
            })
    }

    /// Map a non-success HTTP status to a generation error
    fn map_api_error(status: u16, body: &str) -> GenerationError {
        let message = serde_json::from_str::<GeminiResponse>(body)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| body.to_string(), |e| e.message);

        GenerationError::Api { status, message }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerationError> {
        let url = self.build_url(model);
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![ContentPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        debug!(model, "Sending generation request to Gemini");

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &body));
        }

        let parsed: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "Failed to parse Gemini response");
            GenerationError::MalformedResponse(e.to_string())
        })?;

        let text = Self::extract_text(parsed)?;
        debug!("Received {} characters from Gemini", text.len());
        Ok(text)
    }
}

impl Debug for GeminiClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiClient")
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
