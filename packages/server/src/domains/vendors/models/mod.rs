pub mod vendor;

pub use vendor::{decode_additional_info, Vendor};
