//! Integration tests for the rate-limited Meetup API client
//!
//! These tests run the real client against a mock Meetup API and cover
//! status classification, the retry budget, and rate-limit header tracking.

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use MeetupSync::services::MeetupClient;
use MeetupSync::utils::errors::FetchError;

#[tokio::test]
async fn fetches_json_and_tracks_the_rate_limit_window() {
    let mock = MeetupMockServer::new().await;
    mock.mock_group(SANDBOX_URLNAME, &sandbox_group()).await;

    let client = MeetupClient::new(&mock.api_config()).unwrap();
    let body = client.get(SANDBOX_URLNAME).await.unwrap();

    assert_eq!(body["id"], json!(SANDBOX_GROUP_ID));

    let snapshot = client.rate_limit_snapshot().await;
    assert_eq!(snapshot.limit, 30);
    assert_eq!(snapshot.remaining, 29);
    assert_eq!(snapshot.reset, 10);
}

#[tokio::test]
async fn not_found_is_terminal_without_retries() {
    let mock = MeetupMockServer::new().await;
    mock.mock_group_status("vanished-group", 404).await;

    let client = MeetupClient::new(&mock.api_config()).unwrap();
    let err = client.get("vanished-group").await.unwrap_err();

    assert_matches!(err, FetchError::NotFound);
    assert_eq!(mock.group_request_count("vanished-group").await, 1);
}

#[tokio::test]
async fn gone_is_terminal_without_retries() {
    let mock = MeetupMockServer::new().await;
    mock.mock_group_status("blocked-group", 410).await;

    let client = MeetupClient::new(&mock.api_config()).unwrap();
    let err = client.get("blocked-group").await.unwrap_err();

    assert_matches!(err, FetchError::Gone);
    assert_eq!(mock.group_request_count("blocked-group").await, 1);
}

#[tokio::test]
async fn server_errors_exhaust_the_retry_budget() {
    let mock = MeetupMockServer::new().await;
    mock.mock_group_status("flaky-group", 500).await;

    let client = MeetupClient::new(&mock.api_config()).unwrap();
    let err = client.get("flaky-group").await.unwrap_err();

    assert_matches!(err, FetchError::NoSuccess { status: Some(500) });
    // max_retries = 3 means four attempts in total
    assert_eq!(mock.group_request_count("flaky-group").await, 4);
}

#[tokio::test]
async fn a_retry_recovers_from_a_transient_failure() {
    let mock = MeetupMockServer::new().await;
    Mock::given(method("GET"))
        .and(path("/flaky-group"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .mount(&mock.server)
        .await;
    mock.mock_group("flaky-group", &sandbox_group()).await;

    let client = MeetupClient::new(&mock.api_config()).unwrap();
    let body = client.get("flaky-group").await.unwrap();

    assert_eq!(body["urlname"], json!(SANDBOX_URLNAME));
    assert_eq!(mock.group_request_count("flaky-group").await, 2);
}

#[tokio::test]
async fn missing_rate_limit_headers_fail_after_retries() {
    let mock = MeetupMockServer::new().await;
    mock.mock_group_without_headers(SANDBOX_URLNAME, &sandbox_group())
        .await;

    let client = MeetupClient::new(&mock.api_config()).unwrap();
    let err = client.get(SANDBOX_URLNAME).await.unwrap_err();

    assert_matches!(err, FetchError::MissingRateLimitHeaders);
    assert_eq!(mock.group_request_count(SANDBOX_URLNAME).await, 4);
}
