//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the MeetupSync application.

use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
///
/// The returned guard must be held for as long as the process logs; dropping
/// it stops the non-blocking file writer.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "meetupsync.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log removal of a local group copy after the remote reported it gone
pub fn log_group_removed(urlname: &str, status: u16, had_local_copy: bool) {
    warn!(
        urlname = urlname,
        status = status,
        had_local_copy = had_local_copy,
        "Remote group no longer available"
    );
}

/// Log the outcome of a catalog-wide sync pass
pub fn log_sync_summary(synced: usize, deleted: usize, failed: usize, events_created: usize) {
    info!(
        groups_synced = synced,
        groups_deleted = deleted,
        groups_failed = failed,
        events_created = events_created,
        "Catalog sync pass finished"
    );
}
