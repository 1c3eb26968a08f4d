// Library modules
pub mod confirm;
pub mod models;
pub mod swap;
pub mod utils;
pub mod wallet;

// Shared types
pub use models::*;
