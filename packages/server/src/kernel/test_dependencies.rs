// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.
// Every mock is cheap to clone and shares its recorded calls across clones,
// so a test can keep a handle while the deps own another.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::{
    BaseCardExtractor, BaseGiftSearch, BasePageFetcher, FetchedPage, ServerDeps, StatusBoard,
};
use crate::domains::cards::CardExtraction;
use crate::domains::gifts::WebGiftIdeas;

// =============================================================================
// Mock Page Fetcher
// =============================================================================

#[derive(Clone, Default)]
pub struct MockPageFetcher {
    pages: Arc<Mutex<HashMap<String, std::result::Result<FetchedPage, String>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with `status` for `url`.
    pub fn with_page(self, url: &str, status: u16, body: &str) -> Self {
        self.pages.lock().unwrap().insert(
            url.to_string(),
            Ok(FetchedPage {
                url: url.to_string(),
                status,
                body: body.to_string(),
            }),
        );
        self
    }

    /// Fail fetches of `url` with a transport error.
    pub fn with_error(self, url: &str, message: &str) -> Self {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), Err(message.to_string()));
        self
    }

    /// Get all URLs that were fetched
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl BasePageFetcher for MockPageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        self.calls.lock().unwrap().push(url.to_string());

        match self.pages.lock().unwrap().get(url) {
            Some(Ok(page)) => Ok(page.clone()),
            Some(Err(message)) => Err(anyhow::anyhow!("{}", message)),
            // Unknown URLs behave like a missing page
            None => Ok(FetchedPage {
                url: url.to_string(),
                status: 404,
                body: String::new(),
            }),
        }
    }
}

// =============================================================================
// Mock Card Extractor
// =============================================================================

#[derive(Clone)]
pub struct MockCardExtractor {
    extraction: Arc<Mutex<CardExtraction>>,
    calls: Arc<Mutex<Vec<Vec<PathBuf>>>>,
}

impl MockCardExtractor {
    pub fn new() -> Self {
        Self {
            extraction: Arc::new(Mutex::new(CardExtraction {
                name: "Mock Vendor".to_string(),
                category: "Gifts".to_string(),
                ..Default::default()
            })),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Return `extraction` for every call
    pub fn with_extraction(self, extraction: CardExtraction) -> Self {
        *self.extraction.lock().unwrap() = extraction;
        self
    }

    /// Image paths passed to each call
    pub fn calls(&self) -> Vec<Vec<PathBuf>> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockCardExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseCardExtractor for MockCardExtractor {
    async fn extract_card(&self, images: &[PathBuf]) -> CardExtraction {
        self.calls.lock().unwrap().push(images.to_vec());
        self.extraction.lock().unwrap().clone()
    }
}

// =============================================================================
// Mock Gift Search
// =============================================================================

#[derive(Clone, Default)]
pub struct MockGiftSearch {
    ideas: Arc<Mutex<WebGiftIdeas>>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockGiftSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ideas(self, ideas: WebGiftIdeas) -> Self {
        *self.ideas.lock().unwrap() = ideas;
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseGiftSearch for MockGiftSearch {
    async fn search_gifts(&self, query: &str) -> WebGiftIdeas {
        self.queries.lock().unwrap().push(query.to_string());
        self.ideas.lock().unwrap().clone()
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

#[derive(Clone)]
pub struct TestDependencies {
    pub page_fetcher: MockPageFetcher,
    pub card_extractor: MockCardExtractor,
    pub gift_search: MockGiftSearch,
    pub status: StatusBoard,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            page_fetcher: MockPageFetcher::new(),
            card_extractor: MockCardExtractor::new(),
            gift_search: MockGiftSearch::new(),
            status: StatusBoard::default(),
        }
    }

    /// Set a mock page fetcher
    pub fn mock_fetcher(mut self, fetcher: MockPageFetcher) -> Self {
        self.page_fetcher = fetcher;
        self
    }

    /// Set a mock card extractor
    pub fn mock_extractor(mut self, extractor: MockCardExtractor) -> Self {
        self.card_extractor = extractor;
        self
    }

    /// Set a mock gift search
    pub fn mock_gift_search(mut self, search: MockGiftSearch) -> Self {
        self.gift_search = search;
        self
    }

    /// Build ServerDeps sharing these mocks
    pub fn into_server_deps(self, db_pool: SqlitePool, upload_dir: PathBuf) -> ServerDeps {
        ServerDeps::new(
            db_pool,
            Arc::new(self.page_fetcher),
            Arc::new(self.card_extractor),
            Arc::new(self.gift_search),
            self.status,
            upload_dir,
            "http://localhost:8000".to_string(),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
