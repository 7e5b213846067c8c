use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::platform::Platform;

/// An unpublished, editable post. Stored as `{ id, content, platforms, createdAt, updatedAt }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: String,
    pub content: String,
    pub platforms: Vec<Platform>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
