//! Draft CRUD on top of the drafts `RecordStore`.

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::draft::Draft;
use crate::models::platform::{normalize_platforms, Platform};
use crate::models::{decode, to_fields};
use crate::store::{Fields, RecordStore};

pub struct DraftService {
    store: RecordStore,
}

impl DraftService {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Oldest first. Records that no longer decode are skipped with a warning.
    pub async fn list_drafts(&self) -> Vec<Draft> {
        self.store
            .list()
            .await
            .into_iter()
            .filter_map(|record| match decode::<Draft>(record) {
                Ok(draft) => Some(draft),
                Err(e) => {
                    warn!("Skipping unreadable draft: {e}");
                    None
                }
            })
            .collect()
    }

    pub async fn get_draft(&self, id: &str) -> Result<Draft, AppError> {
        let record = self.store.get(id).await?;
        Ok(decode(record)?)
    }

    pub async fn save_draft(
        &self,
        content: String,
        platforms: Vec<Platform>,
    ) -> Result<Draft, AppError> {
        require_content(&content)?;

        let record = self
            .store
            .append(to_fields(json!({
                "content": content,
                "platforms": normalize_platforms(platforms),
            })))
            .await?;
        let draft: Draft = decode(record)?;

        info!("Saved draft {} for {:?}", draft.id, draft.platforms);
        Ok(draft)
    }

    /// Replaces whichever of `content` / `platforms` is given.
    /// An empty platform list keeps the stored selection.
    pub async fn update_draft(
        &self,
        id: &str,
        content: Option<String>,
        platforms: Option<Vec<Platform>>,
    ) -> Result<Draft, AppError> {
        let mut changes = Fields::new();
        if let Some(content) = content {
            require_content(&content)?;
            changes.insert("content".to_string(), Value::String(content));
        }
        if let Some(platforms) = platforms.filter(|p| !p.is_empty()) {
            changes.insert(
                "platforms".to_string(),
                json!(normalize_platforms(platforms)),
            );
        }

        let record = self.store.update(id, changes).await?;
        let draft: Draft = decode(record)?;

        info!("Updated draft {}", draft.id);
        Ok(draft)
    }

    pub async fn delete_draft(&self, id: &str) -> Result<(), AppError> {
        self.store.delete(id).await?;
        info!("Deleted draft {id}");
        Ok(())
    }
}

fn require_content(content: &str) -> Result<(), AppError> {
    if content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }
    Ok(())
}
