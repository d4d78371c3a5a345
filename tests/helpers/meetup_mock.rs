//! Mock Meetup API server for testing
//!
//! This module provides a wiremock-backed stand-in for the Meetup REST API.
//! Successful responses carry the X-RateLimit headers the client requires,
//! error responses do not, matching the live API.

use serde_json::Value;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use MeetupSync::config::ApiConfig;

/// Mock Meetup API server for testing
pub struct MeetupMockServer {
    pub server: MockServer,
}

impl MeetupMockServer {
    /// Start a fresh mock server
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Client configuration pointing at this server
    ///
    /// The fallback reset is one second so header-poisoned retries stay fast.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.server.uri(),
            timeout_seconds: 5,
            max_retries: 3,
            fallback_reset_seconds: 1,
        }
    }

    /// Mock `GET /{urlname}` with a JSON body and fresh rate-limit headers
    pub async fn mock_group(&self, urlname: &str, body: &Value) {
        Mock::given(method("GET"))
            .and(path(format!("/{}", urlname)))
            .respond_with(ok_response(body))
            .mount(&self.server)
            .await;
    }

    /// Mock `GET /{urlname}` with a bare status code
    pub async fn mock_group_status(&self, urlname: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("/{}", urlname)))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Mock `GET /{urlname}` with a 200 response missing the rate-limit headers
    pub async fn mock_group_without_headers(&self, urlname: &str, body: &Value) {
        Mock::given(method("GET"))
            .and(path(format!("/{}", urlname)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mock the events feed for every request regardless of cursor
    pub async fn mock_events(&self, urlname: &str, body: &Value) {
        Mock::given(method("GET"))
            .and(path(format!("/{}/events", urlname)))
            .respond_with(ok_response(body))
            .mount(&self.server)
            .await;
    }

    /// Mock the first events feed request, before any cursor exists
    pub async fn mock_events_without_cursor(&self, urlname: &str, body: &Value) {
        Mock::given(method("GET"))
            .and(path(format!("/{}/events", urlname)))
            .and(query_param_is_missing("no_earlier_than"))
            .respond_with(ok_response(body))
            .mount(&self.server)
            .await;
    }

    /// Mock a cursored events feed request for one specific day
    pub async fn mock_events_with_cursor(&self, urlname: &str, date: &str, body: &Value) {
        Mock::given(method("GET"))
            .and(path(format!("/{}/events", urlname)))
            .and(query_param("no_earlier_than", date))
            .respond_with(ok_response(body))
            .mount(&self.server)
            .await;
    }

    /// Mock the events feed with a bare status code
    pub async fn mock_events_status(&self, urlname: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("/{}/events", urlname)))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Drop all mounted mocks and recorded requests
    pub async fn reset(&self) {
        self.server.reset().await;
    }

    /// Query strings of every events feed request received so far, in order
    pub async fn event_feed_queries(&self, urlname: &str) -> Vec<String> {
        let feed_path = format!("/{}/events", urlname);
        self.server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .filter(|request| request.url.path() == feed_path)
            .map(|request| request.url.query().unwrap_or("").to_string())
            .collect()
    }

    /// How many requests hit `GET /{urlname}` itself
    pub async fn group_request_count(&self, urlname: &str) -> usize {
        let group_path = format!("/{}", urlname);
        self.server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .filter(|request| request.url.path() == group_path)
            .count()
    }
}

/// 200 response carrying a JSON body and an open rate-limit window
pub fn ok_response(body: &Value) -> ResponseTemplate {
    with_rate_limit_headers(ResponseTemplate::new(200)).set_body_json(body)
}

/// Append the X-RateLimit headers of an open window
pub fn with_rate_limit_headers(template: ResponseTemplate) -> ResponseTemplate {
    template
        .insert_header("x-ratelimit-limit", "30")
        .insert_header("x-ratelimit-remaining", "29")
        .insert_header("x-ratelimit-reset", "10")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_server_starts_and_configures_a_client() {
        let mock = MeetupMockServer::new().await;
        let config = mock.api_config();
        assert!(config.base_url.starts_with("http://"));
        assert_eq!(config.fallback_reset_seconds, 1);
    }
}
