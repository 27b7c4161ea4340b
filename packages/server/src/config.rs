use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default model fallback order (fastest first).
pub const DEFAULT_GEMINI_MODELS: &[&str] = &["gemini-1.5-flash", "gemini-1.5-pro", "gemini-pro"];

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Public base URL used to build image links in search results
    pub base_url: String,
    pub upload_dir: PathBuf,
    /// Missing key is not fatal: extraction reports it as a data-shaped error
    pub google_api_key: Option<String>,
    pub gemini_models: Vec<String>,
    pub status_capacity: usize,
    pub status_ttl: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:storytellerz.db?mode=rwc".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            base_url: env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            upload_dir: env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "uploads".to_string())
                .into(),
            google_api_key: env::var("GOOGLE_API_KEY").ok().filter(|k| !k.is_empty()),
            gemini_models: env::var("GEMINI_MODELS")
                .map(|v| parse_model_list(&v))
                .unwrap_or_else(|_| default_models()),
            status_capacity: env::var("STATUS_CAPACITY")
                .unwrap_or_else(|_| "1024".to_string())
                .parse()
                .context("STATUS_CAPACITY must be a valid number")?,
            status_ttl: Duration::from_secs(
                env::var("STATUS_TTL_SECS")
                    .unwrap_or_else(|_| "600".to_string())
                    .parse()
                    .context("STATUS_TTL_SECS must be a valid number")?,
            ),
        })
    }
}

fn default_models() -> Vec<String> {
    DEFAULT_GEMINI_MODELS.iter().map(|m| m.to_string()).collect()
}

fn parse_model_list(raw: &str) -> Vec<String> {
    let models: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect();

    if models.is_empty() {
        default_models()
    } else {
        models
    }
}
