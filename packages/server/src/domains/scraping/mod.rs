//! Vendor website scraping.

pub mod extract;
pub mod outcome;
pub mod price;
pub mod website;

pub use extract::extract_pricing;
pub use outcome::{PricedItem, PricingGuide, ScrapeFailure, ScrapeOutcome, GENERIC_PRICE};
pub use website::{normalize_url, WebsiteScraper};
