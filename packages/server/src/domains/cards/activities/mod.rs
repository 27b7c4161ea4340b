pub mod analyze_card;

pub use analyze_card::{analyze_card, UploadedImage};
