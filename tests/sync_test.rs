//! Integration tests for the catalog sync engine
//!
//! Each test drives a SyncEngine over an in-memory store against a mock
//! Meetup API, covering group refresh semantics, event idempotency, and
//! the deletion path for groups the remote reports gone.

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use serde_json::json;

use MeetupSync::config::SyncConfig;
use MeetupSync::services::{GroupSyncOutcome, MeetupClient, SyncEngine, SyncSummary};
use MeetupSync::storage::{CatalogStore, MemoryStore};

fn engine(mock: &MeetupMockServer) -> SyncEngine<MemoryStore> {
    let client = MeetupClient::new(&mock.api_config()).unwrap();
    SyncEngine::new(client, MemoryStore::new(), &SyncConfig { page_size: 200 })
}

#[tokio::test]
async fn syncing_the_sandbox_group_builds_its_catalog_record() {
    let mock = MeetupMockServer::new().await;
    mock.mock_group(SANDBOX_URLNAME, &sandbox_group_full()).await;
    mock.mock_events(SANDBOX_URLNAME, &events_feed(&[full_event("1")]))
        .await;

    let engine = engine(&mock);
    let outcome = engine.sync_group_with_events(SANDBOX_URLNAME).await.unwrap();

    let GroupSyncOutcome::Synced { group, new_events } = outcome else {
        panic!("expected a synced outcome");
    };
    assert_eq!(group.meetup_id, SANDBOX_GROUP_ID);
    assert_eq!(group.title, "1556336: Meetup API Testing Sandbox");
    assert_eq!(group.city.as_deref(), Some("Brooklyn"));
    assert_eq!(group.meta_category_id, Some(252));
    assert_eq!(group.topic_ids, vec![132]);
    assert!(group.nomination_acceptable);

    assert_eq!(new_events.len(), 1);
    assert_eq!(new_events[0].title, "1: test meetup");
    assert_eq!(new_events[0].group_id, SANDBOX_GROUP_ID);
    assert!(engine.store().event_exists("1").await.unwrap());
}

#[tokio::test]
async fn resyncing_creates_no_duplicate_events() {
    let mock = MeetupMockServer::new().await;
    mock.mock_group(SANDBOX_URLNAME, &sandbox_group()).await;
    mock.mock_events(SANDBOX_URLNAME, &events_feed(&[minimal_event("1")]))
        .await;

    let engine = engine(&mock);
    let first = engine.sync_group_with_events(SANDBOX_URLNAME).await.unwrap();
    let second = engine.sync_group_with_events(SANDBOX_URLNAME).await.unwrap();

    let GroupSyncOutcome::Synced { new_events, .. } = first else {
        panic!("expected the first pass to sync");
    };
    assert_eq!(new_events.len(), 1);

    let GroupSyncOutcome::Synced { group, new_events } = second else {
        panic!("expected the second pass to sync");
    };
    assert!(new_events.is_empty());
    assert_eq!(
        engine.store().events_of_group(group.meetup_id).await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn group_refresh_overwrites_required_fields_but_keeps_created() {
    let mock = MeetupMockServer::new().await;
    mock.mock_group(SANDBOX_URLNAME, &sandbox_group()).await;

    let engine = engine(&mock);
    engine.sync_group(SANDBOX_URLNAME).await.unwrap();

    let mut refreshed = sandbox_group();
    refreshed["members"] = json!(8000);
    refreshed["name"] = json!("Renamed Sandbox");
    refreshed["created"] = json!(9999999999000i64);
    mock.reset().await;
    mock.mock_group(SANDBOX_URLNAME, &refreshed).await;

    let group = engine.sync_group(SANDBOX_URLNAME).await.unwrap().unwrap();
    assert_eq!(group.members, 8000);
    assert_eq!(group.name, "Renamed Sandbox");
    assert_eq!(group.title, "1556336: Renamed Sandbox");
    // created is written once and never refreshed
    assert_eq!(group.created.timestamp(), 1258123610);
}

#[tokio::test]
async fn absent_optionals_keep_their_last_observed_value() {
    let mock = MeetupMockServer::new().await;
    mock.mock_group(SANDBOX_URLNAME, &sandbox_group_full()).await;

    let engine = engine(&mock);
    engine.sync_group(SANDBOX_URLNAME).await.unwrap();

    mock.reset().await;
    mock.mock_group(SANDBOX_URLNAME, &sandbox_group()).await;

    let group = engine.sync_group(SANDBOX_URLNAME).await.unwrap().unwrap();
    assert_eq!(group.city.as_deref(), Some("Brooklyn"));
    assert_eq!(group.organizer_id, Some(1));
    assert_eq!(group.topic_ids, vec![132]);
    // nomination_acceptable is value-backed, so absence reads as false
    assert!(!group.nomination_acceptable);
}

#[tokio::test]
async fn a_not_found_group_is_deleted_with_its_events() {
    let mock = MeetupMockServer::new().await;
    mock.mock_group(SANDBOX_URLNAME, &sandbox_group()).await;
    mock.mock_events(SANDBOX_URLNAME, &events_feed(&[minimal_event("1")]))
        .await;

    let engine = engine(&mock);
    engine.sync_group_with_events(SANDBOX_URLNAME).await.unwrap();
    assert!(engine.store().event_exists("1").await.unwrap());

    mock.reset().await;
    mock.mock_group_status(SANDBOX_URLNAME, 404).await;

    let group = engine.sync_group(SANDBOX_URLNAME).await.unwrap();
    assert!(group.is_none());
    assert!(engine
        .store()
        .find_group_by_urlname(SANDBOX_URLNAME)
        .await
        .unwrap()
        .is_none());
    assert!(!engine.store().event_exists("1").await.unwrap());
}

#[tokio::test]
async fn a_gone_group_reports_a_deletion_outcome() {
    let mock = MeetupMockServer::new().await;
    mock.mock_group(SANDBOX_URLNAME, &sandbox_group()).await;

    let engine = engine(&mock);
    engine.sync_group(SANDBOX_URLNAME).await.unwrap();

    mock.reset().await;
    mock.mock_group_status(SANDBOX_URLNAME, 410).await;

    let outcome = engine.sync_group_with_events(SANDBOX_URLNAME).await.unwrap();
    assert_matches!(outcome, GroupSyncOutcome::Deleted);
}

#[tokio::test]
async fn a_not_found_group_without_local_copy_is_a_failure() {
    let mock = MeetupMockServer::new().await;
    mock.mock_group_status("never-seen", 404).await;

    let engine = engine(&mock);
    let outcome = engine.sync_group_with_events("never-seen").await.unwrap();
    assert_matches!(outcome, GroupSyncOutcome::Failed);
}

#[tokio::test]
async fn fetch_failures_leave_the_local_copy_alone() {
    let mock = MeetupMockServer::new().await;
    mock.mock_group(SANDBOX_URLNAME, &sandbox_group()).await;

    let engine = engine(&mock);
    engine.sync_group(SANDBOX_URLNAME).await.unwrap();

    mock.reset().await;
    mock.mock_group_status(SANDBOX_URLNAME, 500).await;

    let group = engine.sync_group(SANDBOX_URLNAME).await.unwrap();
    assert!(group.is_none());
    assert!(engine
        .store()
        .find_group_by_urlname(SANDBOX_URLNAME)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn a_failing_events_feed_still_syncs_the_group() {
    let mock = MeetupMockServer::new().await;
    mock.mock_group(SANDBOX_URLNAME, &sandbox_group()).await;
    mock.mock_events_status(SANDBOX_URLNAME, 500).await;

    let engine = engine(&mock);
    let outcome = engine.sync_group_with_events(SANDBOX_URLNAME).await.unwrap();

    let GroupSyncOutcome::Synced { group, new_events } = outcome else {
        panic!("expected a synced outcome");
    };
    assert_eq!(group.urlname, SANDBOX_URLNAME);
    assert!(new_events.is_empty());
    assert!(engine
        .store()
        .find_group_by_urlname(SANDBOX_URLNAME)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn an_unusable_group_payload_is_skipped() {
    let mock = MeetupMockServer::new().await;
    mock.mock_group("broken", &json!({"id": 1})).await;

    let engine = engine(&mock);
    let group = engine.sync_group("broken").await.unwrap();
    assert!(group.is_none());
    assert!(engine.store().list_groups().await.unwrap().is_empty());
}

#[tokio::test]
async fn sync_known_groups_counts_outcomes() {
    let mock = MeetupMockServer::new().await;
    mock.mock_group("alpha", &group_payload(1, "alpha")).await;
    mock.mock_group("beta", &group_payload(2, "beta")).await;

    let engine = engine(&mock);
    engine.sync_group("alpha").await.unwrap();
    engine.sync_group("beta").await.unwrap();

    mock.reset().await;
    mock.mock_group("alpha", &group_payload(1, "alpha")).await;
    mock.mock_events("alpha", &events_feed(&[])).await;
    mock.mock_group_status("beta", 404).await;

    let summary = engine.sync_known_groups().await.unwrap();
    assert_eq!(
        summary,
        SyncSummary {
            groups_synced: 1,
            groups_deleted: 1,
            groups_failed: 0,
            events_created: 0,
        }
    );

    let remaining = engine.store().list_groups().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].urlname, "alpha");
}
