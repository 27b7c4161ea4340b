use std::sync::Arc;
use tracing::{info, warn};

use super::extract::extract_pricing;
use super::outcome::{ScrapeFailure, ScrapeOutcome};
use crate::kernel::BasePageFetcher;

/// Fetches a vendor site and extracts its product pricing.
///
/// Never fails: every fault is folded into the returned [`ScrapeOutcome`].
#[derive(Clone)]
pub struct WebsiteScraper {
    fetcher: Arc<dyn BasePageFetcher>,
}

impl WebsiteScraper {
    pub fn new(fetcher: Arc<dyn BasePageFetcher>) -> Self {
        Self { fetcher }
    }

    pub async fn scrape(&self, url: &str) -> ScrapeOutcome {
        let url = url.trim();
        if url.is_empty() {
            return ScrapeOutcome::Skipped;
        }

        let url = normalize_url(url);
        info!(url = %url, "Scraping vendor website");

        let page = match self.fetcher.fetch(&url).await {
            Ok(page) => page,
            Err(e) => {
                warn!(url = %url, error = %e, "Website fetch failed");
                return ScrapeOutcome::Failed(ScrapeFailure::Fetch(format!("{:#}", e)));
            }
        };

        if page.status != 200 {
            warn!(url = %url, status = page.status, "Website returned non-200");
            return ScrapeOutcome::Failed(ScrapeFailure::HttpStatus(page.status));
        }

        let outcome = extract_pricing(&page.body);
        info!(url = %url, status = %outcome.status_tag(), "Scrape finished");
        outcome
    }
}

/// Prefix `https://` unless the URL already names an http(s) scheme.
pub fn normalize_url(url: &str) -> String {
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}
