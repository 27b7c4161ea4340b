use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A product name with the price text found next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedItem {
    pub item: String,
    pub price: String,
}

impl PricedItem {
    pub fn new(item: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            price: price.into(),
        }
    }
}

/// Item label used for prices found without a product name.
pub const GENERIC_PRICE: &str = "Generic Price";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeFailure {
    /// Site answered with something other than 200.
    HttpStatus(u16),
    /// Network, TLS or timeout failure.
    Fetch(String),
}

/// Result of scraping a vendor website.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeOutcome {
    /// No website given; nothing was fetched.
    Skipped,
    /// Named products with prices, deduplicated, at most 10.
    Structured(Vec<PricedItem>),
    /// No product names found, only loose prices (at most 5).
    GenericPrices(Vec<PricedItem>),
    /// Page fetched but no prices anywhere.
    Empty,
    Failed(ScrapeFailure),
}

/// Wire shape of `additional_info.pricing_guide`: a list of pairs or a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PricingGuide {
    Items(Vec<PricedItem>),
    Note(String),
}

impl From<PricingGuide> for Value {
    fn from(guide: PricingGuide) -> Self {
        match guide {
            PricingGuide::Items(items) => Value::Array(
                items
                    .into_iter()
                    .map(|p| serde_json::json!({"item": p.item, "price": p.price}))
                    .collect(),
            ),
            PricingGuide::Note(note) => Value::String(note),
        }
    }
}

impl ScrapeOutcome {
    /// Product names, in discovery order.
    pub fn products(&self) -> Vec<String> {
        match self {
            ScrapeOutcome::Structured(items) => items.iter().map(|p| p.item.clone()).collect(),
            _ => Vec::new(),
        }
    }

    pub fn pricing_guide(&self) -> PricingGuide {
        match self {
            ScrapeOutcome::Skipped => PricingGuide::Note(String::new()),
            ScrapeOutcome::Structured(items) | ScrapeOutcome::GenericPrices(items) => {
                PricingGuide::Items(items.clone())
            }
            ScrapeOutcome::Empty => PricingGuide::Items(Vec::new()),
            ScrapeOutcome::Failed(ScrapeFailure::HttpStatus(code)) => {
                PricingGuide::Note(format!("Failed to access website: Status {}", code))
            }
            ScrapeOutcome::Failed(ScrapeFailure::Fetch(reason)) => {
                PricingGuide::Note(format!("Error scraping website: {}", reason))
            }
        }
    }

    /// Short tag stored as `scrape_status`.
    pub fn status_tag(&self) -> String {
        match self {
            ScrapeOutcome::Skipped => "no_website".to_string(),
            ScrapeOutcome::Structured(_) | ScrapeOutcome::GenericPrices(_) => {
                "success".to_string()
            }
            ScrapeOutcome::Empty => "no_data_found".to_string(),
            ScrapeOutcome::Failed(ScrapeFailure::HttpStatus(code)) => code.to_string(),
            ScrapeOutcome::Failed(ScrapeFailure::Fetch(reason)) => {
                format!("Error scraping website: {}", reason)
            }
        }
    }
}
