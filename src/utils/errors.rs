//! Error handling for MeetupSync
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for MeetupSync operations
#[derive(Error, Debug)]
pub enum MeetupSyncError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Meetup API error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Response mapping error: {0}")]
    Parse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Group not found: {urlname}")]
    GroupNotFound { urlname: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Failures of a single rate-limited fetch against the Meetup API
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("resource not found (HTTP 404)")]
    NotFound,

    #[error("resource permanently gone (HTTP 410)")]
    Gone,

    #[error("request did not succeed within the retry budget (last status: {status:?})")]
    NoSuccess { status: Option<u16> },

    #[error("response carried no usable X-RateLimit headers")]
    MissingRateLimitHeaders,

    #[error("transport failure: {0}")]
    Transport(String),
}

/// Failures constructing a catalog entity from an API response
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("cannot construct {entity} from response: {source}")]
    CannotConstruct {
        entity: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("timestamp out of range for {entity}: {millis}ms")]
    TimeOutOfRange { entity: &'static str, millis: i64 },
}

/// Result type alias for MeetupSync operations
pub type Result<T> = std::result::Result<T, MeetupSyncError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for response mapping operations
pub type ParseResult<T> = std::result::Result<T, ParseError>;

impl FetchError {
    /// Check if the remote reported the resource as removed
    ///
    /// 404 and 410 both mean the local copy must be deleted; callers that
    /// need to tell them apart match on the variant directly.
    pub fn indicates_removal(&self) -> bool {
        matches!(self, FetchError::NotFound | FetchError::Gone)
    }
}

impl MeetupSyncError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            MeetupSyncError::Database(_) => false,
            MeetupSyncError::Fetch(_) => true,
            MeetupSyncError::Parse(_) => true,
            MeetupSyncError::Config(_) => false,
            MeetupSyncError::GroupNotFound { .. } => false,
            MeetupSyncError::Http(_) => true,
            MeetupSyncError::Serialization(_) => false,
            MeetupSyncError::Io(_) => true,
            MeetupSyncError::UrlParse(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            MeetupSyncError::Database(_) => ErrorSeverity::Critical,
            MeetupSyncError::Config(_) => ErrorSeverity::Critical,
            MeetupSyncError::Fetch(FetchError::NotFound) => ErrorSeverity::Warning,
            MeetupSyncError::Fetch(FetchError::Gone) => ErrorSeverity::Warning,
            MeetupSyncError::Parse(_) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
