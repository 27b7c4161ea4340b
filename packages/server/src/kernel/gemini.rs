//! Gemini-backed card extraction and gift search.
//!
//! Both adapters walk the configured model list in order and fall through to
//! the next model on rate limits, API errors or unparseable answers.

use async_trait::async_trait;
use gemini_client::{GeminiClient, GeminiError, GenerateRequest, Part};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::{BaseCardExtractor, BaseGiftSearch};
use crate::domains::cards::data::MISSING_API_KEY;
use crate::domains::cards::CardExtraction;
use crate::domains::gifts::WebGiftIdeas;

const CARD_PROMPT: &str = r#"You are reading a photographed business card. If two images are given, the first is the front and the second the back.
Return one JSON object with exactly these string fields:
{
  "name": "business or person name",
  "phone": "phone numbers, comma separated",
  "email": "email addresses, comma separated",
  "address": "postal address",
  "website": "website URL",
  "category": "industry, e.g. Catering, Technology, Retail",
  "products": "products or services listed or implied",
  "tagline": "slogan",
  "social_media": "social handles",
  "designation": "job title on a personal card"
}
Use an empty string for anything not on the card. Copy phone numbers and emails exactly."#;

fn gift_prompt(query: &str) -> String {
    format!(
        r#"You help companies choose corporate gifts.
For the request "{}" suggest 5 specific gift products and 5 well known brands or vendors for this category.
Return one JSON object shaped exactly like:
{{
  "products": [{{"title": "", "price": "approximate price", "description": "why it fits", "link": "official URL if known"}}],
  "vendors": [{{"name": "", "specialty": "what they are known for", "website": ""}}]
}}"#,
        query
    )
}

/// MIME type for an image path, from its extension.
pub fn image_mime_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

/// Short reason recorded when a model attempt fails.
fn failure_reason(model: &str, error: &GeminiError) -> String {
    match error {
        GeminiError::Api { status, .. } => format!("{}: {}", status, model),
        GeminiError::Parse(_) => "Parsing Error".to_string(),
        other => other.to_string(),
    }
}

// =============================================================================
// Card extraction
// =============================================================================

pub struct GeminiCardExtractor {
    client: Option<GeminiClient>,
    models: Vec<String>,
}

impl GeminiCardExtractor {
    /// `client` is `None` when no API key is configured.
    pub fn new(client: Option<GeminiClient>, models: Vec<String>) -> Self {
        Self { client, models }
    }
}

#[async_trait]
impl BaseCardExtractor for GeminiCardExtractor {
    async fn extract_card(&self, images: &[PathBuf]) -> CardExtraction {
        let Some(client) = &self.client else {
            warn!("GOOGLE_API_KEY missing, skipping card extraction");
            return CardExtraction::error(MISSING_API_KEY);
        };

        let mut parts = vec![Part::text(CARD_PROMPT)];
        for path in images {
            match tokio::fs::read(path).await {
                Ok(bytes) => parts.push(Part::inline(image_mime_type(path), &bytes)),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Card image unreadable");
                    return CardExtraction::file_error(e.to_string());
                }
            }
        }
        let request = GenerateRequest::new(parts).json_response();

        let mut last_error = String::new();
        for model in &self.models {
            info!(model = %model, images = images.len(), "Extracting card");

            match client.generate_json::<Value>(model, &request).await {
                Ok(answer) => match CardExtraction::from_model_answer(&answer) {
                    Some(card) => return card,
                    None => {
                        debug!(model = %model, "Answer was not a JSON object");
                        last_error = "Parsing Error".to_string();
                    }
                },
                Err(e) => {
                    warn!(model = %model, error = %e, "Model failed, trying next");
                    last_error = failure_reason(model, &e);
                }
            }
        }

        CardExtraction::ai_error(format!("All models failed. Last: {}", last_error))
    }
}

// =============================================================================
// Gift search
// =============================================================================

pub struct GeminiGiftSearch {
    client: Option<GeminiClient>,
    models: Vec<String>,
}

impl GeminiGiftSearch {
    pub fn new(client: Option<GeminiClient>, models: Vec<String>) -> Self {
        Self { client, models }
    }
}

#[async_trait]
impl BaseGiftSearch for GeminiGiftSearch {
    async fn search_gifts(&self, query: &str) -> WebGiftIdeas {
        let Some(client) = &self.client else {
            warn!("GOOGLE_API_KEY missing, no web gift ideas");
            return WebGiftIdeas::default();
        };

        let request = GenerateRequest::text(gift_prompt(query)).json_response();

        for model in &self.models {
            match client.generate_json::<WebGiftIdeas>(model, &request).await {
                Ok(ideas) => {
                    info!(model = %model, products = ideas.products.len(), "Gift ideas found");
                    return ideas;
                }
                Err(e) => warn!(model = %model, error = %e, "Gift search model failed"),
            }
        }

        warn!(query, "All gift search models failed, serving curated ideas");
        WebGiftIdeas::curated_fallback()
    }
}
