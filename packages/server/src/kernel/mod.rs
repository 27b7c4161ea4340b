//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod gemini;
pub mod http_fetcher;
pub mod status_board;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use gemini::{GeminiCardExtractor, GeminiGiftSearch};
pub use http_fetcher::HttpPageFetcher;
pub use status_board::{StatusBoard, StatusEvent};
pub use test_dependencies::TestDependencies;
pub use traits::*;
