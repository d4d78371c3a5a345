//! Group model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A mirrored Meetup group
///
/// Required fields are refreshed on every successful fetch; optional fields
/// keep their last observed value when absent from a payload. `created` is
/// written once at first sight of the group.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Group {
    pub meetup_id: i64,
    pub urlname: String,
    pub title: String,
    pub name: String,
    pub status: String,
    pub description: String,
    pub created: DateTime<Utc>,
    pub lat: f64,
    pub lon: f64,
    pub link: String,
    pub members: i32,
    pub timezone: String,
    pub visibility: String,
    pub category_id: Option<i64>,
    pub city: Option<String>,
    pub city_link: Option<String>,
    pub country: Option<String>,
    pub fee_options_currencies_code: Option<String>,
    pub fee_options_currencies_default: Option<bool>,
    pub fee_options_type: Option<String>,
    pub group_photo_id: Option<i64>,
    pub join_mode: Option<String>,
    pub key_photo_id: Option<i64>,
    pub localized_country_name: Option<String>,
    pub localized_location: Option<String>,
    pub member_limit: Option<i32>,
    pub meta_category_id: Option<i64>,
    pub nomination_acceptable: bool,
    pub organizer_id: Option<i64>,
    pub short_link: Option<String>,
    pub state: Option<String>,
    pub untranslated_city: Option<String>,
    pub welcome_message: Option<String>,
    pub who: Option<String>,
    pub topic_ids: Vec<i64>,
}

impl Group {
    /// Display title, recomputed whenever the remote name is written
    pub fn derive_title(meetup_id: i64, name: &str) -> String {
        format!("{}: {}", meetup_id, name)
    }
}
