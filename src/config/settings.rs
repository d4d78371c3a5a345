//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub sync: SyncConfig,
    pub logging: LoggingConfig,
}

/// Meetup API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub fallback_reset_seconds: u64,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Catalog sync configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    pub page_size: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("MEETUPSYNC"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::MeetupSyncError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            database: DatabaseConfig {
                url: "postgresql://localhost/meetupsync".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            sync: SyncConfig { page_size: 200 },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "./logs".to_string(),
            },
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.meetup.com/".to_string(),
            timeout_seconds: 30,
            max_retries: 3,
            fallback_reset_seconds: 60,
        }
    }
}
