//! Storage module
//!
//! This module handles catalog persistence behind the `CatalogStore` trait

pub mod connection;
pub mod store;
pub mod memory;
pub mod postgres;

// Re-export commonly used storage components
pub use connection::{DatabasePool, create_pool, health_check};
pub use store::CatalogStore;
pub use memory::MemoryStore;
pub use postgres::PgCatalogStore;
