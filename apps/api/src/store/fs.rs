//! JSON-file backend: one pretty-printed array per collection.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tracing::info;

use super::{Fields, StorageBackend, StoreError};

pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Persistence {
            target: self.describe(),
            source,
        }
    }
}

#[async_trait]
impl StorageBackend for JsonFileBackend {
    async fn load(&self) -> Result<Vec<Fields>, StoreError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || load_array(&path))
            .await
            .map_err(|e| self.io_error(std::io::Error::other(e)))?
    }

    async fn save(&self, records: &[Fields]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(records)
            .map_err(|e| self.io_error(std::io::Error::other(e)))?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&path, &bytes))
            .await
            .map_err(|e| self.io_error(std::io::Error::other(e)))?
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// Blocking helpers (run inside spawn_blocking)

fn load_array(path: &Path) -> Result<Vec<Fields>, StoreError> {
    let target = || path.display().to_string();

    if !path.exists() {
        info!("Initializing empty store at {}", path.display());
        write_atomic(path, b"[]")?;
        return Ok(Vec::new());
    }

    let raw = std::fs::read_to_string(path).map_err(|source| StoreError::Persistence {
        target: target(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
        target: target(),
        source,
    })
}

/// Writes to a sibling temp file, fsyncs, then renames over `path`.
/// Readers see either the old array or the new one, never a partial write.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let persistence = |source: std::io::Error| StoreError::Persistence {
        target: path.display().to_string(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(persistence)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(persistence)?;
    tmp.write_all(bytes).map_err(persistence)?;
    tmp.as_file().sync_all().map_err(persistence)?;
    tmp.persist(path).map_err(|e| persistence(e.error))?;
    Ok(())
}
