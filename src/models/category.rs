//! Category and meta-category models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub meetup_id: i64,
    pub name: Option<String>,
    pub shortname: Option<String>,
    pub sort_name: Option<String>,
}

/// Meta-category grouping several categories
///
/// `category_ids` mirrors the remote list exactly: it is cleared and rebuilt
/// on every encounter rather than merged.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MetaCategory {
    pub meetup_id: i64,
    pub name: String,
    pub shortname: String,
    pub sort_name: String,
    pub photo_id: Option<i64>,
    pub category_ids: Vec<i64>,
}
