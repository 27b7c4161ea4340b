// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Domain code (scraping tiers, pipeline steps, result merging) lives in the
// domains and talks to the outside world through these seams.
//
// Naming convention: Base* for trait names (e.g., BasePageFetcher)

use anyhow::Result;
use async_trait::async_trait;
use std::path::PathBuf;

use crate::domains::cards::CardExtraction;
use crate::domains::gifts::WebGiftIdeas;

// =============================================================================
// Page Fetcher Trait (Infrastructure - outbound HTTP GET)
// =============================================================================

/// A fetched web page.
///
/// Non-200 responses are returned as pages too (with an empty body) so the
/// caller can tag the failure with its status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait BasePageFetcher: Send + Sync {
    /// GET a URL. Errors are transport failures only (DNS, TLS, timeout).
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

// =============================================================================
// Card Extractor Trait (Infrastructure - multimodal AI)
// =============================================================================

#[async_trait]
pub trait BaseCardExtractor: Send + Sync {
    /// Turn one or more card images into structured fields.
    ///
    /// Never fails: configuration, file and model faults come back as an
    /// extraction whose `name` carries the error.
    async fn extract_card(&self, images: &[PathBuf]) -> CardExtraction;
}

// =============================================================================
// Gift Search Trait (Infrastructure - AI web knowledge)
// =============================================================================

#[async_trait]
pub trait BaseGiftSearch: Send + Sync {
    /// Product and vendor ideas for a free-text gifting query.
    async fn search_gifts(&self, query: &str) -> WebGiftIdeas;
}
