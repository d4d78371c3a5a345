//! Event model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use sqlx::types::Json;

/// A past event of a mirrored group
///
/// Events are append-only: once a `meetup_id` is in the catalog the record is
/// never rewritten, whatever later payloads claim.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub meetup_id: String,
    pub group_id: i64,
    pub title: String,
    pub name: String,
    pub time: DateTime<Utc>,
    pub attendance_count: Option<i32>,
    pub attendance_sample: Option<i32>,
    pub attendee_sample: Option<i32>,
    pub created: Option<DateTime<Utc>>,
    pub date_in_series_pattern: bool,
    pub description: Option<String>,
    pub duration_secs: Option<i64>,
    pub event_hosts: Json<Vec<EventHost>>,
    pub fee_accepts: Option<String>,
    pub fee_amount: Option<f64>,
    pub fee_currency: Option<String>,
    pub fee_description: Option<String>,
    pub fee_label: Option<String>,
    pub how_to_find_us: Option<String>,
    pub status: Option<String>,
    pub updated: Option<DateTime<Utc>>,
    pub utc_offset_secs: Option<i64>,
    pub venue_id: Option<i64>,
    pub venue_visibility: Option<String>,
    pub visibility: Option<String>,
}

/// Host entry embedded in an event, captured once at event creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventHost {
    pub host_count: Option<i32>,
    pub member_id: Option<i64>,
    pub intro: Option<String>,
    pub join_date: Option<DateTime<Utc>>,
    pub name: Option<String>,
    pub photo_id: Option<i64>,
}

impl Event {
    /// Display title, fixed at creation time
    pub fn derive_title(meetup_id: &str, name: &str) -> String {
        format!("{}: {}", meetup_id, name)
    }
}
