//! Test helpers module
//!
//! This module provides utilities and helpers for testing the MeetupSync
//! pipeline: a mock Meetup API server and payload builders.

pub mod meetup_mock;
pub mod test_data;

pub use meetup_mock::*;
pub use test_data::*;
