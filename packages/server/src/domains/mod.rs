pub mod cards;
pub mod gifts;
pub mod scraping;
pub mod vendors;
