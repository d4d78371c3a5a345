//! Response mapping
//!
//! Turns raw API payloads into catalog entities and writes them through a
//! `CatalogStore`. Groups are get-or-create-and-refresh, events are
//! create-once, and every nested entity (venues, members, photos,
//! categories, meta categories, topics) is materialized in the same call
//! that references it.

use serde_json::Value;
use sqlx::types::Json;

use crate::models::{Category, Event, EventHost, Group, Member, MetaCategory, Photo, Topic, Venue};
use crate::services::payloads::{
    CategoryResponse, EventHostResponse, EventResponse, GroupResponse, MemberResponse,
    MetaCategoryResponse, PhotoResponse, TopicResponse, VenueResponse,
};
use crate::storage::CatalogStore;
use crate::utils::errors::Result;
use crate::utils::helpers::{datetime_from_millis, seconds_from_millis};

/// Get or create a group from a `GET /{urlname}` payload
///
/// Required fields are overwritten on every call, optional fields only when
/// the payload carries them, and `created` is written once when the group is
/// first seen. The display title tracks the remote name.
pub async fn group_from_response<S: CatalogStore>(store: &S, value: &Value) -> Result<Group> {
    let response = GroupResponse::from_value(value)?;

    let (mut group, is_new) = match store.find_group_by_urlname(&response.urlname).await? {
        Some(group) => (group, false),
        None => {
            let group = Group {
                meetup_id: response.id,
                urlname: response.urlname.clone(),
                title: Group::derive_title(response.id, &response.name),
                name: response.name.clone(),
                status: response.status.clone(),
                description: response.description.clone(),
                created: datetime_from_millis("group", response.created)?,
                lat: response.lat,
                lon: response.lon,
                link: response.link.clone(),
                members: response.members,
                timezone: response.timezone.clone(),
                visibility: response.visibility.clone(),
                category_id: None,
                city: None,
                city_link: None,
                country: None,
                fee_options_currencies_code: None,
                fee_options_currencies_default: None,
                fee_options_type: None,
                group_photo_id: None,
                join_mode: None,
                key_photo_id: None,
                localized_country_name: None,
                localized_location: None,
                member_limit: None,
                meta_category_id: None,
                nomination_acceptable: false,
                organizer_id: None,
                short_link: None,
                state: None,
                untranslated_city: None,
                welcome_message: None,
                who: None,
                topic_ids: Vec::new(),
            };
            (group, true)
        }
    };

    // update required fields
    group.description = response.description.clone();
    group.lat = response.lat;
    group.lon = response.lon;
    group.link = response.link.clone();
    group.members = response.members;
    group.name = response.name.clone();
    group.status = response.status.clone();
    group.timezone = response.timezone.clone();
    group.visibility = response.visibility.clone();
    group.title = Group::derive_title(group.meetup_id, &response.name);

    // add optional fields
    if let Some(category) = &response.category {
        let category = category_from_response(store, category).await?;
        group.category_id = Some(category.meetup_id);
    }
    if response.city.is_some() {
        group.city = response.city.clone();
    }
    if response.city_link.is_some() {
        group.city_link = response.city_link.clone();
    }
    if response.country.is_some() {
        group.country = response.country.clone();
    }
    if let Some(fee_options) = &response.fee_options {
        if let Some(currencies) = &fee_options.currencies {
            if currencies.code.is_some() {
                group.fee_options_currencies_code = currencies.code.clone();
            }
            group.fee_options_currencies_default = Some(currencies.default.unwrap_or(false));
        }
        if fee_options.fee_type.is_some() {
            group.fee_options_type = fee_options.fee_type.clone();
        }
    }
    if let Some(photo) = &response.group_photo {
        let photo = photo_from_response(store, photo).await?;
        group.group_photo_id = Some(photo.meetup_id);
    }
    if response.join_mode.is_some() {
        group.join_mode = response.join_mode.clone();
    }
    if let Some(photo) = &response.key_photo {
        let photo = photo_from_response(store, photo).await?;
        group.key_photo_id = Some(photo.meetup_id);
    }
    if response.localized_country_name.is_some() {
        group.localized_country_name = response.localized_country_name.clone();
    }
    if response.localized_location.is_some() {
        group.localized_location = response.localized_location.clone();
    }
    if response.member_limit.is_some() {
        group.member_limit = response.member_limit;
    }
    if let Some(meta_category) = &response.meta_category {
        let meta_category = meta_category_from_response(store, meta_category).await?;
        group.meta_category_id = Some(meta_category.meetup_id);
    }
    group.nomination_acceptable = response.nomination_acceptable.unwrap_or(false);
    if let Some(organizer) = &response.organizer {
        let organizer = member_from_response(store, organizer).await?;
        group.organizer_id = Some(organizer.meetup_id);
    }
    if response.short_link.is_some() {
        group.short_link = response.short_link.clone();
    }
    if response.state.is_some() {
        group.state = response.state.clone();
    }
    if let Some(topics) = &response.topics {
        let mut topic_ids = Vec::with_capacity(topics.len());
        for topic in topics {
            let topic = topic_from_response(store, topic).await?;
            topic_ids.push(topic.meetup_id);
        }
        group.topic_ids = topic_ids;
    }
    if response.untranslated_city.is_some() {
        group.untranslated_city = response.untranslated_city.clone();
    }
    if response.welcome_message.is_some() {
        group.welcome_message = response.welcome_message.clone();
    }
    if response.who.is_some() {
        group.who = response.who.clone();
    }

    if is_new {
        store.insert_group(&group).await
    } else {
        store.update_group(&group).await
    }
}

/// Create an event from a `GET /{urlname}/events` feed entry
///
/// Returns `Ok(None)` when the entry has no id or its id is already in the
/// catalog. An entry that names an id but cannot satisfy the required set
/// fails with a mapping error.
pub async fn event_from_response<S: CatalogStore>(
    store: &S,
    group: &Group,
    value: &Value,
) -> Result<Option<Event>> {
    let Some(meetup_id) = event_id_of(value) else {
        return Ok(None);
    };
    if store.event_exists(&meetup_id).await? {
        return Ok(None);
    }

    let response = EventResponse::from_value(value)?;
    let mut event = Event {
        meetup_id: response.id.clone(),
        group_id: group.meetup_id,
        title: Event::derive_title(&response.id, &response.name),
        name: response.name.clone(),
        time: datetime_from_millis("event", response.time)?,
        attendance_count: response.attendance_count,
        attendance_sample: response.attendance_sample,
        attendee_sample: response.attendee_sample,
        created: None,
        date_in_series_pattern: response.date_in_series_pattern.unwrap_or(false),
        description: response.description.clone(),
        duration_secs: response.duration.map(seconds_from_millis),
        event_hosts: Json(Vec::new()),
        fee_accepts: None,
        fee_amount: None,
        fee_currency: None,
        fee_description: None,
        fee_label: None,
        how_to_find_us: response.how_to_find_us.clone(),
        status: response.status.clone(),
        updated: None,
        utc_offset_secs: response.utc_offset.map(seconds_from_millis),
        venue_id: None,
        venue_visibility: response.venue_visibility.clone(),
        visibility: response.visibility.clone(),
    };

    if let Some(millis) = response.created {
        event.created = Some(datetime_from_millis("event", millis)?);
    }
    if let Some(millis) = response.updated {
        event.updated = Some(datetime_from_millis("event", millis)?);
    }
    if let Some(hosts) = &response.event_hosts {
        let mut event_hosts = Vec::with_capacity(hosts.len());
        for host in hosts {
            event_hosts.push(event_host_from_response(store, host).await?);
        }
        event.event_hosts = Json(event_hosts);
    }
    if let Some(fee) = &response.fee {
        event.fee_accepts = fee.accepts.clone();
        event.fee_amount = fee.amount;
        event.fee_currency = fee.currency.clone();
        event.fee_description = fee.description.clone();
        event.fee_label = fee.label.clone();
    }
    if let Some(venue) = &response.venue {
        let venue = venue_from_response(store, venue).await?;
        event.venue_id = Some(venue.meetup_id);
    }

    let inserted = store.insert_event(&event).await?;
    Ok(Some(inserted))
}

/// Upsert a venue from a nested payload
pub async fn venue_from_response<S: CatalogStore>(
    store: &S,
    response: &VenueResponse,
) -> Result<Venue> {
    let venue = Venue {
        meetup_id: response.id,
        address_1: response.address_1.clone(),
        address_2: response.address_2.clone(),
        address_3: response.address_3.clone(),
        city: response.city.clone(),
        country: response.country.clone(),
        lat: response.lat,
        lon: response.lon,
        localized_country_name: response.localized_country_name.clone(),
        name: response.name.clone(),
        phone: response.phone.clone(),
        zip_code: response.zip_code.clone(),
    };
    store.upsert_venue(&venue).await
}

/// Upsert a member from a nested payload, materializing its photo first
pub async fn member_from_response<S: CatalogStore>(
    store: &S,
    response: &MemberResponse,
) -> Result<Member> {
    let photo_id = match &response.photo {
        Some(photo) => Some(photo_from_response(store, photo).await?.meetup_id),
        None => None,
    };
    let member = Member {
        meetup_id: response.id,
        name: response.name.clone(),
        bio: response.bio.clone(),
        photo_id,
    };
    store.upsert_member(&member).await
}

/// Upsert a photo from a nested payload
pub async fn photo_from_response<S: CatalogStore>(
    store: &S,
    response: &PhotoResponse,
) -> Result<Photo> {
    let photo = Photo {
        meetup_id: response.id,
        highres_link: response.highres_link.clone(),
        base_url: response.base_url.clone(),
        photo_link: response.photo_link.clone(),
        thumb_link: response.thumb_link.clone(),
        photo_type: response.photo_type.clone(),
    };
    store.upsert_photo(&photo).await
}

/// Upsert a category from a nested payload
pub async fn category_from_response<S: CatalogStore>(
    store: &S,
    response: &CategoryResponse,
) -> Result<Category> {
    let category = Category {
        meetup_id: response.id,
        name: response.name.clone(),
        shortname: response.shortname.clone(),
        sort_name: response.sort_name.clone(),
    };
    store.upsert_category(&category).await
}

/// Upsert a meta-category, materializing bare categories for every listed id
pub async fn meta_category_from_response<S: CatalogStore>(
    store: &S,
    response: &MetaCategoryResponse,
) -> Result<MetaCategory> {
    let photo_id = match &response.photo {
        Some(photo) => Some(photo_from_response(store, photo).await?.meetup_id),
        None => None,
    };
    let category_ids = response.category_ids.clone().unwrap_or_default();
    for category_id in &category_ids {
        let category = Category {
            meetup_id: *category_id,
            name: None,
            shortname: None,
            sort_name: None,
        };
        store.upsert_category(&category).await?;
    }
    let meta_category = MetaCategory {
        meetup_id: response.id,
        name: response.name.clone(),
        shortname: response.shortname.clone(),
        sort_name: response.sort_name.clone(),
        photo_id,
        category_ids,
    };
    store.upsert_meta_category(&meta_category).await
}

/// Upsert a topic from a nested payload
pub async fn topic_from_response<S: CatalogStore>(
    store: &S,
    response: &TopicResponse,
) -> Result<Topic> {
    let topic = Topic {
        meetup_id: response.id,
        lang: response.lang.clone(),
        name: response.name.clone(),
        urlkey: response.urlkey.clone(),
    };
    store.upsert_topic(&topic).await
}

/// Build a host entry, materializing its member and photo
pub async fn event_host_from_response<S: CatalogStore>(
    store: &S,
    response: &EventHostResponse,
) -> Result<EventHost> {
    let member_id = match response.id {
        Some(member_id) => {
            let member = Member {
                meetup_id: member_id,
                name: None,
                bio: None,
                photo_id: None,
            };
            Some(store.upsert_member(&member).await?.meetup_id)
        }
        None => None,
    };
    let photo_id = match &response.photo {
        Some(photo) => Some(photo_from_response(store, photo).await?.meetup_id),
        None => None,
    };
    let join_date = match response.join_date {
        Some(millis) => Some(datetime_from_millis("event host", millis)?),
        None => None,
    };
    Ok(EventHost {
        host_count: response.host_count,
        member_id,
        intro: response.intro.clone(),
        join_date,
        name: response.name.clone(),
        photo_id,
    })
}

/// Extract the event id from a raw feed entry, coercing numbers to strings
fn event_id_of(value: &Value) -> Option<String> {
    match value.get("id") {
        Some(Value::String(id)) => Some(id.clone()),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    }
}
