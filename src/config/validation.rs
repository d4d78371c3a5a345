//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{MeetupSyncError, Result};
use super::Settings;

/// Bounds the events feed accepts for its page parameter
pub const MIN_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 200;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_database_config(&settings.database)?;
    validate_sync_config(&settings.sync)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate Meetup API configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(MeetupSyncError::Config(
            "API base URL is required".to_string()
        ));
    }

    if url::Url::parse(&config.base_url).is_err() {
        return Err(MeetupSyncError::Config(
            format!("Invalid API base URL: {}", config.base_url)
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(MeetupSyncError::Config(
            "API timeout must be greater than 0".to_string()
        ));
    }

    if config.fallback_reset_seconds == 0 {
        return Err(MeetupSyncError::Config(
            "Fallback rate-limit reset must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(MeetupSyncError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(MeetupSyncError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(MeetupSyncError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate catalog sync configuration
fn validate_sync_config(config: &super::SyncConfig) -> Result<()> {
    if config.page_size < MIN_PAGE_SIZE || config.page_size > MAX_PAGE_SIZE {
        return Err(MeetupSyncError::Config(
            format!(
                "Page size must be between {} and {}, got {}",
                MIN_PAGE_SIZE, MAX_PAGE_SIZE, config.page_size
            )
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(MeetupSyncError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(MeetupSyncError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    if config.file_path.is_empty() {
        return Err(MeetupSyncError::Config(
            "Log file path is required".to_string()
        ));
    }

    Ok(())
}
