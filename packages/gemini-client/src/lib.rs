//! Pure Google Generative Language (Gemini) REST API client
//!
//! A minimal client for `models/{model}:generateContent` with no
//! domain-specific logic. Supports text prompts, inline image parts and
//! JSON-mode responses.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::{GeminiClient, GenerateRequest, Part};
//!
//! let client = GeminiClient::from_env()?;
//!
//! let request = GenerateRequest::new(vec![
//!     Part::text("Describe this image"),
//!     Part::inline("image/png", &bytes),
//! ])
//! .json_response();
//!
//! let value: serde_json::Value = client.generate_json("gemini-1.5-flash", &request).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{GeminiError, Result};
pub use types::*;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Create from environment variable `GOOGLE_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GOOGLE_API_KEY")
            .map_err(|_| GeminiError::Config("GOOGLE_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies, regional endpoints).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Call `generateContent` and return the text of the first candidate.
    pub async fn generate(&self, model: &str, request: &GenerateRequest) -> Result<String> {
        let start = std::time::Instant::now();
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(model, error = %e, "Gemini request failed");
                GeminiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(model, status = %status, "Gemini API error");
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw: types::GenerateResponseRaw = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        let text = raw
            .first_text()
            .ok_or_else(|| GeminiError::Parse("No candidate text in response".into()))?;

        debug!(
            model,
            duration_ms = start.elapsed().as_millis(),
            "Gemini generateContent"
        );

        Ok(text)
    }

    /// Call `generateContent` and deserialize the answer as JSON.
    ///
    /// Markdown code fences around the payload are tolerated.
    pub async fn generate_json<T: DeserializeOwned>(
        &self,
        model: &str,
        request: &GenerateRequest,
    ) -> Result<T> {
        let text = self.generate(model, request).await?;
        parse_json_answer(&text)
    }
}

/// Remove ```json fences models sometimes wrap around JSON answers.
pub fn strip_json_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse a model answer as JSON after stripping code fences.
pub fn parse_json_answer<T: DeserializeOwned>(text: &str) -> Result<T> {
    serde_json::from_str(&strip_json_fences(text))
        .map_err(|e| GeminiError::Parse(format!("Failed to deserialize answer: {}", e)))
}
