//! Answer model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Answer {
    pub id: i64,
    pub content: String,
    pub question_id: i64,
    pub club_id: i64,
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

