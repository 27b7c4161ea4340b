// Gifting Platform - API Core
//
// Backend for digitising vendor business cards: AI extraction of card fields,
// best-effort scraping of the vendor's website for products and prices,
// SQLite persistence and keyword search combined with AI gift ideas.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
