//! MeetupSync
//!
//! Incremental mirror of Meetup groups and their past events. This library
//! provides a rate-limited API client, response mapping into catalog
//! entities, storage adapters behind a single trait, and the sync engine
//! that keeps the local catalog converging on the remote state.

#![allow(non_snake_case)]

pub mod config;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{MeetupSyncError, Result};

// Re-export main components for easy access
pub use services::{MeetupClient, SyncEngine, GroupSyncOutcome, SyncSummary};
pub use storage::{CatalogStore, MemoryStore, PgCatalogStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
