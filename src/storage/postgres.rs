//! Postgres catalog store
//!
//! `CatalogStore` adapter over a `PgPool`. Group and event rows carry every
//! catalog column, reference entities (venues, members, photos, categories,
//! meta categories, topics) are upserted with keep-observed merges so a
//! sparse payload never wipes fields learned from an earlier response.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Category, Event, Group, Member, MetaCategory, Photo, Topic, Venue};
use crate::storage::store::CatalogStore;
use crate::utils::errors::Result;

const GROUP_COLUMNS: &str = "meetup_id, urlname, title, name, status, description, created, \
     lat, lon, link, members, timezone, visibility, category_id, city, city_link, country, \
     fee_options_currencies_code, fee_options_currencies_default, fee_options_type, \
     group_photo_id, join_mode, key_photo_id, localized_country_name, localized_location, \
     member_limit, meta_category_id, nomination_acceptable, organizer_id, short_link, state, \
     untranslated_city, welcome_message, who, topic_ids";

const EVENT_COLUMNS: &str = "meetup_id, group_id, title, name, time, attendance_count, \
     attendance_sample, attendee_sample, created, date_in_series_pattern, description, \
     duration_secs, event_hosts, fee_accepts, fee_amount, fee_currency, fee_description, \
     fee_label, how_to_find_us, status, updated, utc_offset_secs, venue_id, \
     venue_visibility, visibility";

/// Postgres-backed `CatalogStore` implementation
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    /// Create a store over an existing connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn find_group_by_urlname(&self, urlname: &str) -> Result<Option<Group>> {
        let sql = format!("SELECT {} FROM groups WHERE urlname = $1", GROUP_COLUMNS);
        let group = sqlx::query_as::<_, Group>(&sql)
            .bind(urlname)
            .fetch_optional(&self.pool)
            .await?;
        Ok(group)
    }

    async fn insert_group(&self, group: &Group) -> Result<Group> {
        let sql = format!(
            "INSERT INTO groups ({}) VALUES \
             ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, \
              $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30, $31, $32, \
              $33, $34, $35) \
             RETURNING {}",
            GROUP_COLUMNS, GROUP_COLUMNS
        );
        fetch_group_row(&self.pool, &sql, group).await
    }

    async fn update_group(&self, group: &Group) -> Result<Group> {
        let sql = format!(
            "UPDATE groups SET \
                 urlname = $2, title = $3, name = $4, status = $5, description = $6, \
                 created = $7, lat = $8, lon = $9, link = $10, members = $11, \
                 timezone = $12, visibility = $13, category_id = $14, city = $15, \
                 city_link = $16, country = $17, fee_options_currencies_code = $18, \
                 fee_options_currencies_default = $19, fee_options_type = $20, \
                 group_photo_id = $21, join_mode = $22, key_photo_id = $23, \
                 localized_country_name = $24, localized_location = $25, \
                 member_limit = $26, meta_category_id = $27, nomination_acceptable = $28, \
                 organizer_id = $29, short_link = $30, state = $31, \
                 untranslated_city = $32, welcome_message = $33, who = $34, \
                 topic_ids = $35 \
             WHERE meetup_id = $1 \
             RETURNING {}",
            GROUP_COLUMNS
        );
        fetch_group_row(&self.pool, &sql, group).await
    }

    async fn delete_group(&self, urlname: &str) -> Result<bool> {
        let row: Option<(i64,)> =
            sqlx::query_as("SELECT meetup_id FROM groups WHERE urlname = $1")
                .bind(urlname)
                .fetch_optional(&self.pool)
                .await?;
        let Some((group_id,)) = row else {
            return Ok(false);
        };
        sqlx::query("DELETE FROM events WHERE group_id = $1")
            .bind(group_id)
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM groups WHERE meetup_id = $1")
            .bind(group_id)
            .execute(&self.pool)
            .await?;
        Ok(true)
    }

    async fn list_groups(&self) -> Result<Vec<Group>> {
        let sql = format!("SELECT {} FROM groups ORDER BY urlname", GROUP_COLUMNS);
        let groups = sqlx::query_as::<_, Group>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(groups)
    }

    async fn event_exists(&self, meetup_id: &str) -> Result<bool> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM events WHERE meetup_id = $1")
                .bind(meetup_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count > 0)
    }

    async fn insert_event(&self, event: &Event) -> Result<Event> {
        let sql = format!(
            "INSERT INTO events ({}) VALUES \
             ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, \
              $18, $19, $20, $21, $22, $23, $24, $25) \
             RETURNING {}",
            EVENT_COLUMNS, EVENT_COLUMNS
        );
        let inserted = sqlx::query_as::<_, Event>(&sql)
            .bind(&event.meetup_id)
            .bind(event.group_id)
            .bind(&event.title)
            .bind(&event.name)
            .bind(event.time)
            .bind(event.attendance_count)
            .bind(event.attendance_sample)
            .bind(event.attendee_sample)
            .bind(event.created)
            .bind(event.date_in_series_pattern)
            .bind(&event.description)
            .bind(event.duration_secs)
            .bind(&event.event_hosts)
            .bind(&event.fee_accepts)
            .bind(event.fee_amount)
            .bind(&event.fee_currency)
            .bind(&event.fee_description)
            .bind(&event.fee_label)
            .bind(&event.how_to_find_us)
            .bind(&event.status)
            .bind(event.updated)
            .bind(event.utc_offset_secs)
            .bind(event.venue_id)
            .bind(&event.venue_visibility)
            .bind(&event.visibility)
            .fetch_one(&self.pool)
            .await?;
        Ok(inserted)
    }

    async fn latest_event_of_group(&self, group_id: i64) -> Result<Option<Event>> {
        let sql = format!(
            "SELECT {} FROM events WHERE group_id = $1 ORDER BY time DESC LIMIT 1",
            EVENT_COLUMNS
        );
        let event = sqlx::query_as::<_, Event>(&sql)
            .bind(group_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(event)
    }

    async fn events_of_group(&self, group_id: i64) -> Result<Vec<Event>> {
        let sql = format!(
            "SELECT {} FROM events WHERE group_id = $1 ORDER BY time DESC",
            EVENT_COLUMNS
        );
        let events = sqlx::query_as::<_, Event>(&sql)
            .bind(group_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(events)
    }

    async fn upsert_venue(&self, venue: &Venue) -> Result<Venue> {
        let venue = sqlx::query_as::<_, Venue>(
            "INSERT INTO venues (meetup_id, address_1, address_2, address_3, city, country, \
                 lat, lon, localized_country_name, name, phone, zip_code) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             ON CONFLICT (meetup_id) DO UPDATE SET \
                 address_1 = COALESCE(EXCLUDED.address_1, venues.address_1), \
                 address_2 = COALESCE(EXCLUDED.address_2, venues.address_2), \
                 address_3 = COALESCE(EXCLUDED.address_3, venues.address_3), \
                 city = COALESCE(EXCLUDED.city, venues.city), \
                 country = COALESCE(EXCLUDED.country, venues.country), \
                 lat = COALESCE(EXCLUDED.lat, venues.lat), \
                 lon = COALESCE(EXCLUDED.lon, venues.lon), \
                 localized_country_name = \
                     COALESCE(EXCLUDED.localized_country_name, venues.localized_country_name), \
                 name = COALESCE(EXCLUDED.name, venues.name), \
                 phone = COALESCE(EXCLUDED.phone, venues.phone), \
                 zip_code = COALESCE(EXCLUDED.zip_code, venues.zip_code) \
             RETURNING meetup_id, address_1, address_2, address_3, city, country, lat, lon, \
                 localized_country_name, name, phone, zip_code",
        )
        .bind(venue.meetup_id)
        .bind(&venue.address_1)
        .bind(&venue.address_2)
        .bind(&venue.address_3)
        .bind(&venue.city)
        .bind(&venue.country)
        .bind(venue.lat)
        .bind(venue.lon)
        .bind(&venue.localized_country_name)
        .bind(&venue.name)
        .bind(&venue.phone)
        .bind(&venue.zip_code)
        .fetch_one(&self.pool)
        .await?;
        Ok(venue)
    }

    async fn upsert_member(&self, member: &Member) -> Result<Member> {
        let member = sqlx::query_as::<_, Member>(
            "INSERT INTO members (meetup_id, name, bio, photo_id) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (meetup_id) DO UPDATE SET \
                 name = COALESCE(EXCLUDED.name, members.name), \
                 bio = COALESCE(EXCLUDED.bio, members.bio), \
                 photo_id = COALESCE(EXCLUDED.photo_id, members.photo_id) \
             RETURNING meetup_id, name, bio, photo_id",
        )
        .bind(member.meetup_id)
        .bind(&member.name)
        .bind(&member.bio)
        .bind(member.photo_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(member)
    }

    async fn upsert_photo(&self, photo: &Photo) -> Result<Photo> {
        let photo = sqlx::query_as::<_, Photo>(
            "INSERT INTO photos (meetup_id, highres_link, base_url, photo_link, thumb_link, \
                 photo_type) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (meetup_id) DO UPDATE SET \
                 highres_link = COALESCE(EXCLUDED.highres_link, photos.highres_link), \
                 base_url = COALESCE(EXCLUDED.base_url, photos.base_url), \
                 photo_link = COALESCE(EXCLUDED.photo_link, photos.photo_link), \
                 thumb_link = COALESCE(EXCLUDED.thumb_link, photos.thumb_link), \
                 photo_type = COALESCE(EXCLUDED.photo_type, photos.photo_type) \
             RETURNING meetup_id, highres_link, base_url, photo_link, thumb_link, photo_type",
        )
        .bind(photo.meetup_id)
        .bind(&photo.highres_link)
        .bind(&photo.base_url)
        .bind(&photo.photo_link)
        .bind(&photo.thumb_link)
        .bind(&photo.photo_type)
        .fetch_one(&self.pool)
        .await?;
        Ok(photo)
    }

    async fn upsert_category(&self, category: &Category) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (meetup_id, name, shortname, sort_name) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (meetup_id) DO UPDATE SET \
                 name = COALESCE(EXCLUDED.name, categories.name), \
                 shortname = COALESCE(EXCLUDED.shortname, categories.shortname), \
                 sort_name = COALESCE(EXCLUDED.sort_name, categories.sort_name) \
             RETURNING meetup_id, name, shortname, sort_name",
        )
        .bind(category.meetup_id)
        .bind(&category.name)
        .bind(&category.shortname)
        .bind(&category.sort_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(category)
    }

    async fn upsert_meta_category(&self, meta_category: &MetaCategory) -> Result<MetaCategory> {
        // Naming and the category list always reflect the latest payload,
        // only the photo keeps an earlier observation.
        let meta_category = sqlx::query_as::<_, MetaCategory>(
            "INSERT INTO meta_categories (meetup_id, name, shortname, sort_name, photo_id, \
                 category_ids) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (meetup_id) DO UPDATE SET \
                 name = EXCLUDED.name, \
                 shortname = EXCLUDED.shortname, \
                 sort_name = EXCLUDED.sort_name, \
                 photo_id = COALESCE(EXCLUDED.photo_id, meta_categories.photo_id), \
                 category_ids = EXCLUDED.category_ids \
             RETURNING meetup_id, name, shortname, sort_name, photo_id, category_ids",
        )
        .bind(meta_category.meetup_id)
        .bind(&meta_category.name)
        .bind(&meta_category.shortname)
        .bind(&meta_category.sort_name)
        .bind(meta_category.photo_id)
        .bind(&meta_category.category_ids)
        .fetch_one(&self.pool)
        .await?;
        Ok(meta_category)
    }

    async fn upsert_topic(&self, topic: &Topic) -> Result<Topic> {
        let topic = sqlx::query_as::<_, Topic>(
            "INSERT INTO topics (meetup_id, lang, name, urlkey) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (meetup_id) DO UPDATE SET \
                 lang = EXCLUDED.lang, \
                 name = EXCLUDED.name, \
                 urlkey = EXCLUDED.urlkey \
             RETURNING meetup_id, lang, name, urlkey",
        )
        .bind(topic.meetup_id)
        .bind(&topic.lang)
        .bind(&topic.name)
        .bind(&topic.urlkey)
        .fetch_one(&self.pool)
        .await?;
        Ok(topic)
    }
}

type GroupQuery<'q> =
    sqlx::query::QueryAs<'q, sqlx::Postgres, Group, sqlx::postgres::PgArguments>;

async fn fetch_group_row(pool: &PgPool, sql: &str, group: &Group) -> Result<Group> {
    let query = sqlx::query_as::<_, Group>(sql);
    let row = bind_group_fields(query, group).fetch_one(pool).await?;
    Ok(row)
}

fn bind_group_fields<'q>(query: GroupQuery<'q>, group: &'q Group) -> GroupQuery<'q> {
    query
        .bind(group.meetup_id)
        .bind(&group.urlname)
        .bind(&group.title)
        .bind(&group.name)
        .bind(&group.status)
        .bind(&group.description)
        .bind(group.created)
        .bind(group.lat)
        .bind(group.lon)
        .bind(&group.link)
        .bind(group.members)
        .bind(&group.timezone)
        .bind(&group.visibility)
        .bind(group.category_id)
        .bind(&group.city)
        .bind(&group.city_link)
        .bind(&group.country)
        .bind(&group.fee_options_currencies_code)
        .bind(group.fee_options_currencies_default)
        .bind(&group.fee_options_type)
        .bind(group.group_photo_id)
        .bind(&group.join_mode)
        .bind(group.key_photo_id)
        .bind(&group.localized_country_name)
        .bind(&group.localized_location)
        .bind(group.member_limit)
        .bind(group.meta_category_id)
        .bind(group.nomination_acceptable)
        .bind(group.organizer_id)
        .bind(&group.short_link)
        .bind(&group.state)
        .bind(&group.untranslated_city)
        .bind(&group.welcome_message)
        .bind(&group.who)
        .bind(&group.topic_ids)
}
