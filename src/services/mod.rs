//! Services module
//!
//! This module contains the sync pipeline: the rate-limited API client,
//! response mapping, and the engine driving both.

pub mod client;
pub mod parser;
pub mod payloads;
pub mod rate_limit;
pub mod sync;

// Re-export commonly used services
pub use client::MeetupClient;
pub use rate_limit::RateLimit;
pub use sync::{SyncEngine, GroupSyncOutcome, SyncSummary};
