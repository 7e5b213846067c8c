//! Record Store — id-keyed CRUD over a single JSON array of records.
//!
//! Every mutation is a full read-modify-write of the backing array. The
//! backend only knows how to load and save the whole array; id assignment,
//! timestamps and merge semantics live here so every backend behaves the same.
//!
//! Read-modify-write cycles on one store are serialized by an in-process lock.
//! Two processes pointed at the same file can still lose updates.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub mod fs;
#[cfg(test)]
pub mod memory;

/// A stored record: field name → JSON value, always including `"id"`.
pub type Fields = Map<String, Value>;

const ID_FIELD: &str = "id";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record '{id}' not found")]
    NotFound { id: String },

    #[error("Failed to persist {target}: {source}")]
    Persistence {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Store {target} does not contain a valid record array: {source}")]
    Corrupt {
        target: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Raw storage I/O for one collection. Handles "where the array lives",
/// while `RecordStore` handles what goes into it.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Loads the full array. A missing backing file is initialized to `[]`.
    async fn load(&self) -> Result<Vec<Fields>, StoreError>;

    /// Replaces the full array. Must be atomic with respect to readers.
    async fn save(&self, records: &[Fields]) -> Result<(), StoreError>;

    /// Human-readable location, used in logs.
    fn describe(&self) -> String;
}

/// Which timestamp fields a collection carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamps {
    /// Set once on append, never overwritten by `update`.
    pub created: &'static str,
    /// Refreshed on append and every `update`, if the collection has one.
    pub updated: Option<&'static str>,
}

impl Stamps {
    pub const DRAFTS: Stamps = Stamps {
        created: "createdAt",
        updated: Some("updatedAt"),
    };

    pub const POSTS: Stamps = Stamps {
        created: "receivedAt",
        updated: None,
    };
}

pub struct RecordStore {
    backend: Arc<dyn StorageBackend>,
    stamps: Stamps,
    write_lock: Mutex<()>,
}

impl RecordStore {
    pub fn new(backend: Arc<dyn StorageBackend>, stamps: Stamps) -> Self {
        Self {
            backend,
            stamps,
            write_lock: Mutex::new(()),
        }
    }

    /// All records, oldest first. A read failure is logged and treated as "no records".
    pub async fn list(&self) -> Vec<Fields> {
        match self.backend.load().await {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    "Could not read store {}, treating as empty: {e}",
                    self.backend.describe()
                );
                Vec::new()
            }
        }
    }

    pub async fn get(&self, id: &str) -> Result<Fields, StoreError> {
        self.list()
            .await
            .into_iter()
            .find(|record| record_id(record) == Some(id))
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    /// Assigns an id and timestamps, persists, and returns the completed record.
    pub async fn append(&self, fields: Fields) -> Result<Fields, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.backend.load().await?;

        let id = next_id(&records, Utc::now().timestamp_millis());
        let now = now_iso();

        let mut record = Fields::new();
        record.insert(ID_FIELD.to_string(), Value::String(id.clone()));
        for (key, value) in fields {
            if !self.is_system_field(&key) {
                record.insert(key, value);
            }
        }
        record.insert(self.stamps.created.to_string(), Value::String(now.clone()));
        if let Some(updated) = self.stamps.updated {
            record.insert(updated.to_string(), Value::String(now));
        }

        records.push(record.clone());
        self.backend.save(&records).await?;

        debug!("Appended record {id} to {}", self.backend.describe());
        Ok(record)
    }

    /// Merges `fields` over the stored record. `id` and the creation stamp are kept.
    pub async fn update(&self, id: &str, fields: Fields) -> Result<Fields, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.backend.load().await?;

        let record = records
            .iter_mut()
            .find(|record| record_id(record) == Some(id))
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;

        for (key, value) in fields {
            if !self.is_system_field(&key) {
                record.insert(key, value);
            }
        }
        if let Some(updated) = self.stamps.updated {
            record.insert(updated.to_string(), Value::String(now_iso()));
        }
        let updated = record.clone();

        self.backend.save(&records).await?;

        debug!("Updated record {id} in {}", self.backend.describe());
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.backend.load().await?;

        let before = records.len();
        records.retain(|record| record_id(record) != Some(id));
        if records.len() == before {
            return Err(StoreError::NotFound { id: id.to_string() });
        }

        self.backend.save(&records).await?;

        debug!("Deleted record {id} from {}", self.backend.describe());
        Ok(())
    }

    fn is_system_field(&self, key: &str) -> bool {
        key == ID_FIELD || key == self.stamps.created || Some(key) == self.stamps.updated
    }
}

pub fn record_id(record: &Fields) -> Option<&str> {
    record.get(ID_FIELD).and_then(Value::as_str)
}

/// Millisecond-timestamp id, bumped past any id already in the store.
fn next_id(records: &[Fields], now_ms: i64) -> String {
    let taken: HashSet<&str> = records.iter().filter_map(record_id).collect();
    let mut candidate = now_ms;
    while taken.contains(candidate.to_string().as_str()) {
        candidate += 1;
    }
    candidate.to_string()
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
