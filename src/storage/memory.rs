//! In-memory catalog store
//!
//! HashMap-backed `CatalogStore` used by the test suite and for running the
//! pipeline without a database. Mirrors the Postgres adapter's semantics,
//! including the keep-observed merge on reference upserts.

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::models::{Category, Event, Group, Member, MetaCategory, Photo, Topic, Venue};
use crate::storage::store::CatalogStore;
use crate::utils::errors::Result;

#[derive(Debug, Default)]
struct MemoryState {
    groups: HashMap<String, Group>,
    events: HashMap<String, Event>,
    venues: HashMap<i64, Venue>,
    members: HashMap<i64, Member>,
    photos: HashMap<i64, Photo>,
    categories: HashMap<i64, Category>,
    meta_categories: HashMap<i64, MetaCategory>,
    topics: HashMap<i64, Topic>,
}

/// In-memory `CatalogStore` implementation
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn find_group_by_urlname(&self, urlname: &str) -> Result<Option<Group>> {
        let state = self.state.lock().await;
        Ok(state.groups.get(urlname).cloned())
    }

    async fn insert_group(&self, group: &Group) -> Result<Group> {
        let mut state = self.state.lock().await;
        state.groups.insert(group.urlname.clone(), group.clone());
        Ok(group.clone())
    }

    async fn update_group(&self, group: &Group) -> Result<Group> {
        let mut state = self.state.lock().await;
        if !state.groups.contains_key(&group.urlname) {
            return Err(sqlx::Error::RowNotFound.into());
        }
        state.groups.insert(group.urlname.clone(), group.clone());
        Ok(group.clone())
    }

    async fn delete_group(&self, urlname: &str) -> Result<bool> {
        let mut state = self.state.lock().await;
        match state.groups.remove(urlname) {
            Some(group) => {
                state.events.retain(|_, event| event.group_id != group.meetup_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_groups(&self) -> Result<Vec<Group>> {
        let state = self.state.lock().await;
        let mut groups: Vec<Group> = state.groups.values().cloned().collect();
        groups.sort_by(|a, b| a.urlname.cmp(&b.urlname));
        Ok(groups)
    }

    async fn event_exists(&self, meetup_id: &str) -> Result<bool> {
        let state = self.state.lock().await;
        Ok(state.events.contains_key(meetup_id))
    }

    async fn insert_event(&self, event: &Event) -> Result<Event> {
        let mut state = self.state.lock().await;
        state.events.insert(event.meetup_id.clone(), event.clone());
        Ok(event.clone())
    }

    async fn latest_event_of_group(&self, group_id: i64) -> Result<Option<Event>> {
        let state = self.state.lock().await;
        Ok(state
            .events
            .values()
            .filter(|event| event.group_id == group_id)
            .max_by_key(|event| event.time)
            .cloned())
    }

    async fn events_of_group(&self, group_id: i64) -> Result<Vec<Event>> {
        let state = self.state.lock().await;
        let mut events: Vec<Event> = state
            .events
            .values()
            .filter(|event| event.group_id == group_id)
            .cloned()
            .collect();
        events.sort_by(|a, b| b.time.cmp(&a.time));
        Ok(events)
    }

    async fn upsert_venue(&self, venue: &Venue) -> Result<Venue> {
        let mut state = self.state.lock().await;
        let merged = state
            .venues
            .entry(venue.meetup_id)
            .and_modify(|existing| {
                if venue.address_1.is_some() {
                    existing.address_1 = venue.address_1.clone();
                }
                if venue.address_2.is_some() {
                    existing.address_2 = venue.address_2.clone();
                }
                if venue.address_3.is_some() {
                    existing.address_3 = venue.address_3.clone();
                }
                if venue.city.is_some() {
                    existing.city = venue.city.clone();
                }
                if venue.country.is_some() {
                    existing.country = venue.country.clone();
                }
                if venue.lat.is_some() {
                    existing.lat = venue.lat;
                }
                if venue.lon.is_some() {
                    existing.lon = venue.lon;
                }
                if venue.localized_country_name.is_some() {
                    existing.localized_country_name = venue.localized_country_name.clone();
                }
                if venue.name.is_some() {
                    existing.name = venue.name.clone();
                }
                if venue.phone.is_some() {
                    existing.phone = venue.phone.clone();
                }
                if venue.zip_code.is_some() {
                    existing.zip_code = venue.zip_code.clone();
                }
            })
            .or_insert_with(|| venue.clone())
            .clone();
        Ok(merged)
    }

    async fn upsert_member(&self, member: &Member) -> Result<Member> {
        let mut state = self.state.lock().await;
        let merged = state
            .members
            .entry(member.meetup_id)
            .and_modify(|existing| {
                if member.name.is_some() {
                    existing.name = member.name.clone();
                }
                if member.bio.is_some() {
                    existing.bio = member.bio.clone();
                }
                if member.photo_id.is_some() {
                    existing.photo_id = member.photo_id;
                }
            })
            .or_insert_with(|| member.clone())
            .clone();
        Ok(merged)
    }

    async fn upsert_photo(&self, photo: &Photo) -> Result<Photo> {
        let mut state = self.state.lock().await;
        let merged = state
            .photos
            .entry(photo.meetup_id)
            .and_modify(|existing| {
                if photo.highres_link.is_some() {
                    existing.highres_link = photo.highres_link.clone();
                }
                if photo.base_url.is_some() {
                    existing.base_url = photo.base_url.clone();
                }
                if photo.photo_link.is_some() {
                    existing.photo_link = photo.photo_link.clone();
                }
                if photo.thumb_link.is_some() {
                    existing.thumb_link = photo.thumb_link.clone();
                }
                if photo.photo_type.is_some() {
                    existing.photo_type = photo.photo_type.clone();
                }
            })
            .or_insert_with(|| photo.clone())
            .clone();
        Ok(merged)
    }

    async fn upsert_category(&self, category: &Category) -> Result<Category> {
        let mut state = self.state.lock().await;
        let merged = state
            .categories
            .entry(category.meetup_id)
            .and_modify(|existing| {
                if category.name.is_some() {
                    existing.name = category.name.clone();
                }
                if category.shortname.is_some() {
                    existing.shortname = category.shortname.clone();
                }
                if category.sort_name.is_some() {
                    existing.sort_name = category.sort_name.clone();
                }
            })
            .or_insert_with(|| category.clone())
            .clone();
        Ok(merged)
    }

    async fn upsert_meta_category(&self, meta_category: &MetaCategory) -> Result<MetaCategory> {
        let mut state = self.state.lock().await;
        let merged = state
            .meta_categories
            .entry(meta_category.meetup_id)
            .and_modify(|existing| {
                existing.name = meta_category.name.clone();
                existing.shortname = meta_category.shortname.clone();
                existing.sort_name = meta_category.sort_name.clone();
                if meta_category.photo_id.is_some() {
                    existing.photo_id = meta_category.photo_id;
                }
                existing.category_ids = meta_category.category_ids.clone();
            })
            .or_insert_with(|| meta_category.clone())
            .clone();
        Ok(merged)
    }

    async fn upsert_topic(&self, topic: &Topic) -> Result<Topic> {
        let mut state = self.state.lock().await;
        state.topics.insert(topic.meetup_id, topic.clone());
        Ok(topic.clone())
    }
}
