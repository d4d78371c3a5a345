//! Header-driven rate limiting for the Meetup API
//!
//! The remote advertises its quota in `X-RateLimit` response headers. This
//! module tracks the advertised window and gates requests until it reopens.

use reqwest::header::HeaderMap;
use tokio::time::{sleep, Duration, Instant};
use tracing::{debug, warn};

use crate::utils::errors::{FetchError, FetchResult};

pub const HEADER_LIMIT: &str = "x-ratelimit-limit";
pub const HEADER_REMAINING: &str = "x-ratelimit-remaining";
pub const HEADER_RESET: &str = "x-ratelimit-reset";

/// Poll resolution while waiting out an exhausted window
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Rate limit state as last advertised by the remote
#[derive(Debug, Clone)]
pub struct RateLimit {
    /// Maximum requests per window
    pub limit: i64,
    /// Requests left in the current window
    pub remaining: i64,
    /// Window length in seconds
    pub reset: i64,
    /// When the current window reopens; `None` until the first response
    reset_deadline: Option<Instant>,
}

impl RateLimit {
    /// Create fresh state that allows the first request through
    pub fn new() -> Self {
        Self {
            limit: 0,
            remaining: 0,
            reset: 0,
            reset_deadline: None,
        }
    }

    /// Wait until the advertised window permits another request
    ///
    /// Before the first response no deadline is known and the call returns
    /// immediately. With the window exhausted this polls at one-second
    /// resolution until the reset instant has passed; the state itself is
    /// never decremented, the next response overwrites it.
    pub async fn wait_until_allowed(&self) {
        let Some(deadline) = self.reset_deadline else {
            return;
        };
        if self.remaining >= 1 {
            return;
        }

        let wait = deadline.duration_since(Instant::now());
        debug!(
            wait_secs = wait.as_secs(),
            remaining = self.remaining,
            "Rate limit window exhausted, waiting for reset"
        );
        while Instant::now() < deadline {
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Overwrite state from the `X-RateLimit` headers of a response
    ///
    /// When any of the three headers is absent or non-numeric the window is
    /// assumed exhausted for `fallback_reset_secs` and the caller is told via
    /// `FetchError::MissingRateLimitHeaders`; the remote contract requires
    /// the headers on every successful response.
    pub fn update_from_headers(
        &mut self,
        headers: &HeaderMap,
        fallback_reset_secs: u64,
    ) -> FetchResult<()> {
        match Self::parse_headers(headers) {
            Some((limit, remaining, reset)) => {
                self.limit = limit;
                self.remaining = remaining;
                self.reset = reset;
                self.reset_deadline =
                    Some(Instant::now() + Duration::from_secs(reset.max(0) as u64));
                debug!(
                    limit = limit,
                    remaining = remaining,
                    reset_secs = reset,
                    "Rate limit state updated from response headers"
                );
                Ok(())
            }
            None => {
                self.limit = 0;
                self.remaining = 0;
                self.reset = fallback_reset_secs as i64;
                self.reset_deadline =
                    Some(Instant::now() + Duration::from_secs(fallback_reset_secs));
                warn!(
                    fallback_secs = fallback_reset_secs,
                    "Response carried no usable X-RateLimit headers, assuming exhausted window"
                );
                Err(FetchError::MissingRateLimitHeaders)
            }
        }
    }

    fn parse_headers(headers: &HeaderMap) -> Option<(i64, i64, i64)> {
        let parse = |name: &'static str| -> Option<i64> {
            headers.get(name)?.to_str().ok()?.trim().parse().ok()
        };
        Some((
            parse(HEADER_LIMIT)?,
            parse(HEADER_REMAINING)?,
            parse(HEADER_RESET)?,
        ))
    }
}

impl Default for RateLimit {
    fn default() -> Self {
        Self::new()
    }
}
