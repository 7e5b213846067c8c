use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::platform::Platform;

/// A submission that was accepted by the publishing webhook. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    /// Content as sent, after directive expansion.
    pub content: String,
    pub platforms: Vec<Platform>,
    /// `None` means "publish immediately".
    pub scheduled_date_time: Option<DateTime<Utc>>,
    pub received_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_round_trips_on_disk_shape() {
        let on_disk = json!({
            "id": "1712570000000",
            "content": "We shipped!",
            "platforms": ["linkedin", "twitter"],
            "scheduledDateTime": null,
            "receivedAt": "2025-04-08T12:00:00.000Z"
        });

        let post: Post = serde_json::from_value(on_disk.clone()).unwrap();
        assert!(post.scheduled_date_time.is_none());
        assert_eq!(post.platforms, vec![Platform::Linkedin, Platform::Twitter]);

        let back = serde_json::to_value(&post).unwrap();
        assert_eq!(back["scheduledDateTime"], json!(null));
        assert_eq!(back["id"], on_disk["id"]);
    }
}
