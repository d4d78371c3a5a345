//! Catalog sync engine
//!
//! Drives the mirror: fetch a group, refresh its catalog record, then walk
//! its past-events feed until no new events arrive. Fetch and mapping
//! failures degrade to skipped work, storage failures abort the pass.

use tracing::warn;

use crate::config::validation::{MAX_PAGE_SIZE, MIN_PAGE_SIZE};
use crate::config::SyncConfig;
use crate::models::{Event, Group};
use crate::services::client::MeetupClient;
use crate::services::parser::{event_from_response, group_from_response};
use crate::storage::CatalogStore;
use crate::utils::errors::{FetchError, MeetupSyncError, Result};
use crate::utils::helpers::format_date_cursor;
use crate::utils::logging::{log_group_removed, log_sync_summary};

/// Outcome of syncing one group together with its events
#[derive(Debug)]
pub enum GroupSyncOutcome {
    /// Group record refreshed; carries the events new to the catalog
    Synced { group: Group, new_events: Vec<Event> },
    /// Remote reported the group gone and a local copy was removed
    Deleted,
    /// Nothing usable came back and no local state changed
    Failed,
}

/// Counters of a catalog-wide sync pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub groups_synced: usize,
    pub groups_deleted: usize,
    pub groups_failed: usize,
    pub events_created: usize,
}

/// What a single group fetch produced, before events enter the picture
enum GroupFetch {
    Mapped(Group),
    Removed { had_local_copy: bool },
    Skipped,
}

/// Incremental mirror of groups and their past events
pub struct SyncEngine<S: CatalogStore> {
    client: MeetupClient,
    store: S,
    page_size: u32,
}

impl<S: CatalogStore> SyncEngine<S> {
    /// Create a new sync engine over a client and a catalog store
    pub fn new(client: MeetupClient, store: S, config: &SyncConfig) -> Self {
        Self {
            client,
            store,
            page_size: config.page_size,
        }
    }

    /// The catalog store this engine writes through
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch one group and refresh its catalog record
    ///
    /// Returns `Ok(None)` when the group could not be synced: the remote
    /// reported it gone (the local copy, if any, is deleted), the fetch
    /// failed, or the payload was unusable.
    pub async fn sync_group(&self, urlname: &str) -> Result<Option<Group>> {
        match self.fetch_and_map_group(urlname).await? {
            GroupFetch::Mapped(group) => Ok(Some(group)),
            GroupFetch::Removed { .. } | GroupFetch::Skipped => Ok(None),
        }
    }

    /// Fetch one page of the past-events feed and store the new entries
    ///
    /// The feed is cursored by date: with a latest known event its day is
    /// passed as `no_earlier_than`, re-fetching that day and everything
    /// after. Feed failures yield an empty page, unusable entries are
    /// skipped one by one.
    pub async fn sync_events_page(&self, group: &Group, page_size: u32) -> Result<Vec<Event>> {
        let path = match self.store.latest_event_of_group(group.meetup_id).await? {
            Some(last_event) => format!(
                "{}/events?status=past&no_earlier_than={}&page={}",
                group.urlname,
                format_date_cursor(last_event.time),
                page_size
            ),
            None => format!("{}/events?status=past&page={}", group.urlname, page_size),
        };

        let body = match self.client.get(&path).await {
            Ok(body) => body,
            Err(err) => {
                warn!(urlname = %group.urlname, error = %err, "Event feed request failed");
                return Ok(Vec::new());
            }
        };

        let Some(entries) = body.as_array() else {
            warn!(urlname = %group.urlname, "Event feed payload is not an array");
            return Ok(Vec::new());
        };

        let mut events = Vec::new();
        for entry in entries {
            match event_from_response(&self.store, group, entry).await {
                Ok(Some(event)) => events.push(event),
                Ok(None) => {}
                Err(MeetupSyncError::Parse(err)) => {
                    warn!(urlname = %group.urlname, error = %err, "Skipping unusable event entry");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(events)
    }

    /// Walk the past-events feed until a page yields nothing new
    ///
    /// `page_size` is clamped into the accepted range first. Each stored
    /// page advances the date cursor, so repeated requests converge: once
    /// a page creates zero events the feed is exhausted.
    pub async fn sync_all_past_events(&self, group: &Group, page_size: u32) -> Result<Vec<Event>> {
        let page_size = clamp_page_size(page_size);
        let mut events = Vec::new();
        loop {
            let page = self.sync_events_page(group, page_size).await?;
            if page.is_empty() {
                break;
            }
            events.extend(page);
        }
        Ok(events)
    }

    /// Sync one group and then its full past-events feed
    pub async fn sync_group_with_events(&self, urlname: &str) -> Result<GroupSyncOutcome> {
        match self.fetch_and_map_group(urlname).await? {
            GroupFetch::Mapped(group) => {
                let new_events = self.sync_all_past_events(&group, self.page_size).await?;
                Ok(GroupSyncOutcome::Synced { group, new_events })
            }
            GroupFetch::Removed {
                had_local_copy: true,
            } => Ok(GroupSyncOutcome::Deleted),
            GroupFetch::Removed {
                had_local_copy: false,
            }
            | GroupFetch::Skipped => Ok(GroupSyncOutcome::Failed),
        }
    }

    /// Run a sync pass over every group already in the catalog
    pub async fn sync_known_groups(&self) -> Result<SyncSummary> {
        let groups = self.store.list_groups().await?;
        let mut summary = SyncSummary::default();

        for group in groups {
            match self.sync_group_with_events(&group.urlname).await? {
                GroupSyncOutcome::Synced { new_events, .. } => {
                    summary.groups_synced += 1;
                    summary.events_created += new_events.len();
                }
                GroupSyncOutcome::Deleted => summary.groups_deleted += 1,
                GroupSyncOutcome::Failed => summary.groups_failed += 1,
            }
        }

        log_sync_summary(
            summary.groups_synced,
            summary.groups_deleted,
            summary.groups_failed,
            summary.events_created,
        );
        Ok(summary)
    }

    async fn fetch_and_map_group(&self, urlname: &str) -> Result<GroupFetch> {
        match self.client.get(urlname).await {
            Ok(value) => match group_from_response(&self.store, &value).await {
                Ok(group) => Ok(GroupFetch::Mapped(group)),
                Err(MeetupSyncError::Parse(err)) => {
                    warn!(urlname = urlname, error = %err, "Skipping group with unusable payload");
                    Ok(GroupFetch::Skipped)
                }
                Err(err) => Err(err),
            },
            Err(err) if err.indicates_removal() => {
                let had_local_copy = self.store.delete_group(urlname).await?;
                log_group_removed(urlname, removal_status(&err), had_local_copy);
                Ok(GroupFetch::Removed { had_local_copy })
            }
            Err(err) => {
                warn!(urlname = urlname, error = %err, "Group fetch failed");
                Ok(GroupFetch::Skipped)
            }
        }
    }
}

fn clamp_page_size(page_size: u32) -> u32 {
    page_size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE)
}

fn removal_status(err: &FetchError) -> u16 {
    match err {
        FetchError::Gone => 410,
        _ => 404,
    }
}
