//! Wire payloads of the Meetup REST API
//!
//! Deserialization is the required-field gate: payloads type required fields
//! directly and optional fields as `Option`, so a record that cannot satisfy
//! its required set fails here and is skipped by the caller.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::utils::errors::{ParseError, ParseResult};

/// Group payload as served by `GET /{urlname}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GroupResponse {
    pub id: i64,
    pub urlname: String,
    pub created: i64,
    pub description: String,
    pub lat: f64,
    pub lon: f64,
    pub link: String,
    pub members: i32,
    pub name: String,
    pub status: String,
    pub timezone: String,
    pub visibility: String,
    pub category: Option<CategoryResponse>,
    pub city: Option<String>,
    pub city_link: Option<String>,
    pub country: Option<String>,
    pub fee_options: Option<FeeOptionsResponse>,
    pub group_photo: Option<PhotoResponse>,
    pub join_mode: Option<String>,
    pub key_photo: Option<PhotoResponse>,
    pub localized_country_name: Option<String>,
    pub localized_location: Option<String>,
    pub member_limit: Option<i32>,
    pub meta_category: Option<MetaCategoryResponse>,
    pub nomination_acceptable: Option<bool>,
    pub organizer: Option<MemberResponse>,
    pub short_link: Option<String>,
    pub state: Option<String>,
    pub topics: Option<Vec<TopicResponse>>,
    pub untranslated_city: Option<String>,
    pub welcome_message: Option<String>,
    pub who: Option<String>,
}

impl GroupResponse {
    pub fn from_value(value: &Value) -> ParseResult<Self> {
        serde_json::from_value(value.clone()).map_err(|e| ParseError::CannotConstruct {
            entity: "group",
            source: e,
        })
    }
}

/// Event payload as served by `GET /{urlname}/events`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventResponse {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub time: i64,
    pub attendance_count: Option<i32>,
    pub attendance_sample: Option<i32>,
    pub attendee_sample: Option<i32>,
    pub created: Option<i64>,
    pub date_in_series_pattern: Option<bool>,
    pub description: Option<String>,
    pub duration: Option<i64>,
    pub event_hosts: Option<Vec<EventHostResponse>>,
    pub fee: Option<FeeResponse>,
    pub how_to_find_us: Option<String>,
    pub status: Option<String>,
    pub updated: Option<i64>,
    pub utc_offset: Option<i64>,
    pub venue: Option<VenueResponse>,
    pub venue_visibility: Option<String>,
    pub visibility: Option<String>,
}

impl EventResponse {
    pub fn from_value(value: &Value) -> ParseResult<Self> {
        serde_json::from_value(value.clone()).map_err(|e| ParseError::CannotConstruct {
            entity: "event",
            source: e,
        })
    }
}

/// Per-event fee block, flattened onto the event record
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeeResponse {
    pub accepts: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub description: Option<String>,
    pub label: Option<String>,
}

/// Group fee options, flattened onto the group record
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeeOptionsResponse {
    pub currencies: Option<CurrenciesResponse>,
    #[serde(rename = "type")]
    pub fee_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CurrenciesResponse {
    pub code: Option<String>,
    pub default: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VenueResponse {
    pub id: i64,
    pub address_1: Option<String>,
    pub address_2: Option<String>,
    pub address_3: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub localized_country_name: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub zip_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MemberResponse {
    pub id: i64,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub photo: Option<PhotoResponse>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PhotoResponse {
    pub id: i64,
    pub highres_link: Option<String>,
    pub base_url: Option<String>,
    pub photo_link: Option<String>,
    pub thumb_link: Option<String>,
    #[serde(rename = "type")]
    pub photo_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: Option<String>,
    pub shortname: Option<String>,
    pub sort_name: Option<String>,
}

/// Meta-category payload; unlike plain categories all naming fields are
/// mandatory on the wire
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetaCategoryResponse {
    pub id: i64,
    pub name: String,
    pub shortname: String,
    pub sort_name: String,
    pub photo: Option<PhotoResponse>,
    pub category_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TopicResponse {
    pub id: i64,
    pub lang: String,
    pub name: String,
    pub urlkey: String,
}

/// Host entries arrive with every field optional, including the member id
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventHostResponse {
    pub host_count: Option<i32>,
    pub id: Option<i64>,
    pub intro: Option<String>,
    pub join_date: Option<i64>,
    pub name: Option<String>,
    pub photo: Option<PhotoResponse>,
}

/// Event ids are usually strings but occasionally arrive as bare numbers
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(i64),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    })
}
