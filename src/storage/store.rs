//! Catalog store interface
//!
//! Persistence is a consumed interface: the sync pipeline only ever talks to
//! a `CatalogStore`, and hosting concerns (CMS pages, search wiring, admin
//! surfaces) stay on the other side of it.

use async_trait::async_trait;

use crate::models::{Category, Event, Group, Member, MetaCategory, Photo, Topic, Venue};
use crate::utils::errors::Result;

/// Storage operations required by the sync pipeline
///
/// Reference entities (venues, members, photos, categories, meta-categories,
/// topics) are written through single-call upserts: create the row when the
/// id is new, refresh the fields the caller observed, leave the rest alone.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Find a group by its unique urlname
    async fn find_group_by_urlname(&self, urlname: &str) -> Result<Option<Group>>;

    /// Insert a new group
    async fn insert_group(&self, group: &Group) -> Result<Group>;

    /// Overwrite an existing group identified by its meetup id
    async fn update_group(&self, group: &Group) -> Result<Group>;

    /// Delete a group and all of its events, returning whether it existed
    async fn delete_group(&self, urlname: &str) -> Result<bool>;

    /// List all mirrored groups
    async fn list_groups(&self) -> Result<Vec<Group>>;

    /// Check whether an event id is already in the catalog
    async fn event_exists(&self, meetup_id: &str) -> Result<bool>;

    /// Insert a new event
    async fn insert_event(&self, event: &Event) -> Result<Event>;

    /// Latest event of a group by event time
    async fn latest_event_of_group(&self, group_id: i64) -> Result<Option<Event>>;

    /// All events of a group, newest first
    async fn events_of_group(&self, group_id: i64) -> Result<Vec<Event>>;

    /// Get-or-create a venue and refresh its observed fields
    async fn upsert_venue(&self, venue: &Venue) -> Result<Venue>;

    /// Get-or-create a member and refresh its observed fields
    async fn upsert_member(&self, member: &Member) -> Result<Member>;

    /// Get-or-create a photo and refresh its observed fields
    async fn upsert_photo(&self, photo: &Photo) -> Result<Photo>;

    /// Get-or-create a category and refresh its observed fields
    async fn upsert_category(&self, category: &Category) -> Result<Category>;

    /// Get-or-create a meta-category; naming fields and the category list
    /// are replaced outright, the photo is refreshed when observed
    async fn upsert_meta_category(&self, meta_category: &MetaCategory) -> Result<MetaCategory>;

    /// Get-or-create a topic; all fields are replaced outright
    async fn upsert_topic(&self, topic: &Topic) -> Result<Topic>;
}
