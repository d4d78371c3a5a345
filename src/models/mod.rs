//! Data models module
//!
//! This module contains all catalog entities mirrored from the Meetup API

pub mod group;
pub mod event;
pub mod venue;
pub mod member;
pub mod photo;
pub mod category;
pub mod topic;

// Re-export commonly used models
pub use group::Group;
pub use event::{Event, EventHost};
pub use venue::Venue;
pub use member::Member;
pub use photo::Photo;
pub use category::{Category, MetaCategory};
pub use topic::Topic;
