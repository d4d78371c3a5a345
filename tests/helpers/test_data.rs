//! Test data helpers for building Meetup API payloads
//!
//! This module provides builders for the payload shapes the live API serves:
//! a required-only variant and a fully-populated variant per entity. The
//! group builders default to the public API sandbox group.

use serde_json::{json, Value};

pub const SANDBOX_URLNAME: &str = "Meetup-API-Testing";
pub const SANDBOX_GROUP_ID: i64 = 1556336;

/// Required-only payload of the API sandbox group
pub fn sandbox_group() -> Value {
    group_payload(SANDBOX_GROUP_ID, SANDBOX_URLNAME)
}

/// Required-only group payload
pub fn group_payload(meetup_id: i64, urlname: &str) -> Value {
    json!({
        "id": meetup_id,
        "urlname": urlname,
        "created": 1258123610000i64,
        "description": "description",
        "lat": 40.7,
        "lon": -73.99,
        "link": "https://www.meetup.com/de-DE/Meetup-API-Testing/",
        "members": 7737,
        "name": "Meetup API Testing Sandbox",
        "status": "active",
        "timezone": "US/Eastern",
        "visibility": "public_limited"
    })
}

/// Sandbox group payload with every optional field populated
pub fn sandbox_group_full() -> Value {
    let mut payload = sandbox_group();
    merge(
        &mut payload,
        json!({
            "short_link": "https://mee.up/test",
            "welcome_message": "Welcome!",
            "city": "Brooklyn",
            "city_link": "https://www.meetup.com/city/Brooklyn/",
            "untranslated_city": "Brooklyn",
            "country": "US",
            "localized_country_name": "USA",
            "localized_location": "Brooklyn, NY",
            "state": "NY",
            "join_mode": "open",
            "fee_options": {
                "currencies": {"code": "EUR", "default": true},
                "type": "cash"
            },
            "member_limit": 10,
            "nomination_acceptable": true,
            "organizer": {"id": 1},
            "who": "Developers",
            "group_photo": {"id": 1},
            "key_photo": {"id": 2},
            "category": {"id": 34},
            "topics": [{"id": 132, "lang": "en", "name": "demo", "urlkey": "demo"}],
            "meta_category": {
                "id": 252,
                "shortname": "tech",
                "name": "Tech",
                "sort_name": "Tech"
            }
        }),
    );
    payload
}

/// Required-only event payload
pub fn minimal_event(id: &str) -> Value {
    event_at(id, 1560639600000)
}

/// Required-only event payload at a specific time
pub fn event_at(id: &str, time_millis: i64) -> Value {
    json!({
        "id": id,
        "name": "test meetup",
        "time": time_millis,
        "link": "http://localhost/"
    })
}

/// Event payload with every optional field populated
pub fn full_event(id: &str) -> Value {
    let mut payload = minimal_event(id);
    merge(
        &mut payload,
        json!({
            "attendance_count": 10,
            "attendance_sample": 10,
            "attendee_sample": 10,
            "created": 1560639600000i64,
            "date_in_series_pattern": true,
            "description": "Test Event",
            "duration": 7200000,
            "event_hosts": [{
                "host_count": 10,
                "id": 1,
                "intro": "I'm host",
                "join_date": 1560639600000i64,
                "name": "Hosti",
                "photo": {"id": 1}
            }],
            "fee": {
                "accepts": "cash",
                "amount": 10,
                "currency": "EUR",
                "description": "per-person",
                "label": "Price"
            },
            "how_to_find_us": "when nothing goes right, go left",
            "status": "past",
            "updated": 1560639600000i64,
            "utc_offset": -14400000,
            "venue": {
                "id": 1,
                "address_1": "Berlinerstr. 1",
                "city": "Berlin",
                "country": "Germany",
                "lat": 52.520008,
                "lon": 13.404954,
                "localized_country_name": "Deutschland",
                "name": "Meetup Place",
                "zip_code": "10101"
            },
            "venue_visibility": "public",
            "visibility": "public_limited"
        }),
    );
    payload
}

/// Feed body assembled from individual event payloads
pub fn events_feed(events: &[Value]) -> Value {
    Value::Array(events.to_vec())
}

fn merge(target: &mut Value, extras: Value) {
    let Value::Object(extra_map) = extras else {
        return;
    };
    if let Value::Object(map) = target {
        map.extend(extra_map);
    }
}
