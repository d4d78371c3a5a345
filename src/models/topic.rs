//! Topic model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Topic {
    pub meetup_id: i64,
    pub lang: String,
    pub name: String,
    pub urlkey: String,
}
