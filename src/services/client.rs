//! Meetup API client
//!
//! This service owns the HTTP client for the Meetup REST API, including
//! request retries, rate-limit gating driven by response headers, and
//! status-code classification.

use std::sync::Arc;
use std::time::Duration;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use crate::config::ApiConfig;
use crate::services::rate_limit::RateLimit;
use crate::utils::errors::{FetchError, FetchResult, MeetupSyncError, Result};

/// Rate-limited client for the Meetup REST API
///
/// Requests are sequential: every call waits out the advertised rate-limit
/// window before sending, and every successful response overwrites the
/// window state from its `X-RateLimit` headers.
#[derive(Debug, Clone)]
pub struct MeetupClient {
    client: Client,
    base_url: Url,
    max_retries: u32,
    fallback_reset_secs: u64,
    rate_limit: Arc<Mutex<RateLimit>>,
}

impl MeetupClient {
    /// Create a new MeetupClient instance
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            // Url::join replaces the last path segment otherwise
            base.push('/');
        }
        let base_url = Url::parse(&base)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("MeetupSync/0.1")
            .build()
            .map_err(|e| MeetupSyncError::Http(e))?;

        Ok(Self {
            client,
            base_url,
            max_retries: config.max_retries,
            fallback_reset_secs: config.fallback_reset_seconds,
            rate_limit: Arc::new(Mutex::new(RateLimit::new())),
        })
    }

    /// Fetch a path relative to the API base URL and return the JSON body
    ///
    /// 404 and 410 are terminal. Every other failure (unexpected status,
    /// transport error, missing rate-limit headers) consumes one attempt out
    /// of `max_retries + 1` and is reported as the final error once the
    /// budget is spent.
    pub async fn get(&self, path: &str) -> FetchResult<Value> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let max_attempts = self.max_retries + 1;
        let mut last_error = FetchError::NoSuccess { status: None };

        for attempt in 1..=max_attempts {
            {
                let limit = self.rate_limit.lock().await;
                limit.wait_until_allowed().await;
            }

            debug!(url = %url, attempt = attempt, "Requesting Meetup API");

            match self.execute_once(&url).await {
                Ok(body) => {
                    debug!(url = %url, "Meetup API request succeeded");
                    return Ok(body);
                }
                Err(err) if err.indicates_removal() => return Err(err),
                Err(err) => {
                    warn!(
                        url = %url,
                        attempt = attempt,
                        max_attempts = max_attempts,
                        error = %err,
                        "Meetup API request failed"
                    );
                    last_error = err;
                }
            }
        }

        Err(last_error)
    }

    /// Current rate-limit state as last advertised by the remote
    pub async fn rate_limit_snapshot(&self) -> RateLimit {
        self.rate_limit.lock().await.clone()
    }

    async fn execute_once(&self, url: &Url) -> FetchResult<Value> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }
        if status == StatusCode::GONE {
            return Err(FetchError::Gone);
        }
        if !status.is_success() {
            return Err(FetchError::NoSuccess {
                status: Some(status.as_u16()),
            });
        }

        // Statuses outside 2xx never reach this point, so the limiter only
        // ever reflects successful responses.
        {
            let mut limit = self.rate_limit.lock().await;
            limit.update_from_headers(response.headers(), self.fallback_reset_secs)?;
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}
