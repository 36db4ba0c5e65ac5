use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Resume {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub owner_id: i64,
}

/// The caller-editable fields of a resume, used for both create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct ResumeDraft {
    pub title: String,
    pub content: String,
}
