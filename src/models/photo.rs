//! Photo model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Photo {
    pub meetup_id: i64,
    pub highres_link: Option<String>,
    pub base_url: Option<String>,
    pub photo_link: Option<String>,
    pub thumb_link: Option<String>,
    pub photo_type: Option<String>,
}
