//! Business card ingestion.

pub mod activities;
pub mod data;
pub mod images;

pub use activities::{analyze_card, UploadedImage};
pub use data::{CardAnalysis, CardExtraction, CardExtras};
