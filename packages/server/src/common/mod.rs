pub mod db;

pub use db::{connect, connect_in_memory, run_migrations};
