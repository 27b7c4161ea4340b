pub mod data;
pub mod models;
pub mod seed;

pub use data::VendorInput;
pub use models::Vendor;
pub use seed::seed_samples;
