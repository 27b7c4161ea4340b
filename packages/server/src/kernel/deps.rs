//! Server dependencies for domain activities (using traits for testability)
//!
//! This module provides the central dependency container used by the card
//! pipeline, gift search and HTTP routes. External services sit behind trait
//! objects so tests can swap in mocks.

use anyhow::Result;
use gemini_client::GeminiClient;
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::domains::scraping::WebsiteScraper;
use crate::kernel::{
    BaseCardExtractor, BaseGiftSearch, BasePageFetcher, GeminiCardExtractor, GeminiGiftSearch,
    HttpPageFetcher, StatusBoard,
};

/// Server dependencies accessible to activities
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: SqlitePool,
    pub page_fetcher: Arc<dyn BasePageFetcher>,
    pub card_extractor: Arc<dyn BaseCardExtractor>,
    pub gift_search: Arc<dyn BaseGiftSearch>,
    /// Progress board shared by the card pipeline and the status stream
    pub status: StatusBoard,
    /// Where uploaded and merged card images are written
    pub upload_dir: PathBuf,
    /// Public base URL used to build image links
    pub base_url: String,
}

impl ServerDeps {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        db_pool: SqlitePool,
        page_fetcher: Arc<dyn BasePageFetcher>,
        card_extractor: Arc<dyn BaseCardExtractor>,
        gift_search: Arc<dyn BaseGiftSearch>,
        status: StatusBoard,
        upload_dir: PathBuf,
        base_url: String,
    ) -> Self {
        Self {
            db_pool,
            page_fetcher,
            card_extractor,
            gift_search,
            status,
            upload_dir,
            base_url,
        }
    }

    /// Production wiring: reqwest fetcher, Gemini adapters, bounded status board.
    pub fn from_config(config: &Config, db_pool: SqlitePool) -> Result<Self> {
        let gemini = config.google_api_key.clone().map(GeminiClient::new);

        Ok(Self::new(
            db_pool,
            Arc::new(HttpPageFetcher::new()?),
            Arc::new(GeminiCardExtractor::new(
                gemini.clone(),
                config.gemini_models.clone(),
            )),
            Arc::new(GeminiGiftSearch::new(gemini, config.gemini_models.clone())),
            StatusBoard::new(config.status_capacity, config.status_ttl),
            config.upload_dir.clone(),
            config.base_url.clone(),
        ))
    }

    pub fn scraper(&self) -> WebsiteScraper {
        WebsiteScraper::new(self.page_fetcher.clone())
    }
}
