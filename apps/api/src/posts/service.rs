//! Publish pipeline: expand directives → forward to webhook → record the post.
//!
//! The post record is appended only after the webhook accepts the submission,
//! so the posts log never lists something that was not sent.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::expansion::expander::{ContentExpander, FailedDirective};
use crate::models::platform::{normalize_platforms, Platform};
use crate::models::post::Post;
use crate::models::{decode, to_fields};
use crate::posts::webhook::{PublishRequest, Publisher};
use crate::store::RecordStore;

/// What the caller gets back from a successful publish.
#[derive(Debug, Clone, Serialize)]
pub struct PublishOutcome {
    pub post: Post,
    pub expansion: ExpansionSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpansionSummary {
    pub expanded: usize,
    /// Directives that stayed in the published text because generation failed.
    pub failed: Vec<FailedDirective>,
}

pub struct PostService {
    store: RecordStore,
    expander: ContentExpander,
    publisher: Arc<dyn Publisher>,
}

impl PostService {
    pub fn new(
        store: RecordStore,
        expander: ContentExpander,
        publisher: Arc<dyn Publisher>,
    ) -> Self {
        Self {
            store,
            expander,
            publisher,
        }
    }

    pub async fn list_posts(&self) -> Vec<Post> {
        self.store
            .list()
            .await
            .into_iter()
            .filter_map(|record| match decode::<Post>(record) {
                Ok(post) => Some(post),
                Err(e) => {
                    warn!("Skipping unreadable post: {e}");
                    None
                }
            })
            .collect()
    }

    pub async fn publish(
        &self,
        content: &str,
        platforms: Vec<Platform>,
        scheduled_date_time: Option<DateTime<Utc>>,
    ) -> Result<PublishOutcome, AppError> {
        if content.trim().is_empty() {
            return Err(AppError::Validation("content cannot be empty".to_string()));
        }

        let expansion = self.expander.expand_detailed(content).await;

        let request = PublishRequest {
            content: expansion.content,
            platforms: normalize_platforms(platforms),
            scheduled_date_time,
        };
        self.publisher.forward(&request).await?;

        let record = self
            .store
            .append(to_fields(json!({
                "content": request.content,
                "platforms": request.platforms,
                "scheduledDateTime": request.scheduled_date_time,
            })))
            .await
            .map_err(|e| {
                // Already forwarded; only the local log entry is missing.
                error!("Post was forwarded but could not be recorded: {e}");
                AppError::from(e)
            })?;
        let post: Post = decode(record)?;

        info!(
            "Published post {} to {:?} ({} directives expanded, {} left in place)",
            post.id,
            post.platforms,
            expansion.expanded,
            expansion.failed.len()
        );

        Ok(PublishOutcome {
            post,
            expansion: ExpansionSummary {
                expanded: expansion.expanded,
                failed: expansion.failed,
            },
        })
    }
}
