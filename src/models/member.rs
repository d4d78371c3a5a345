//! Member model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Member {
    pub meetup_id: i64,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub photo_id: Option<i64>,
}
