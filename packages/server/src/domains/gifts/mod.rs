//! Gift search across saved vendors and AI web ideas.

pub mod activities;
pub mod data;

pub use activities::search_gifts;
pub use data::{
    GiftResult, GiftSearchResponse, SearchRequest, WebGiftIdeas, WebProduct, WebVendor,
};
