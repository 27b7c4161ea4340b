// HTTP routes
pub mod cards;
pub mod gifts;
pub mod health;
pub mod status;
pub mod vendors;

pub use cards::*;
pub use gifts::*;
pub use health::*;
pub use status::*;
pub use vendors::*;
