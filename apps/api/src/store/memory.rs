use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{Fields, StorageBackend, StoreError};

/// In-memory storage backend for tests. Can simulate read and write failures.
#[derive(Default)]
pub struct MemoryBackend {
    records: Mutex<Vec<Fields>>,
    simulate_read_error: AtomicBool,
    simulate_write_error: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.store(simulate, Ordering::SeqCst);
    }

    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    fn simulated(&self) -> std::io::Error {
        std::io::Error::other("simulated storage failure")
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn load(&self) -> Result<Vec<Fields>, StoreError> {
        if self.simulate_read_error.load(Ordering::SeqCst) {
            return Err(StoreError::Persistence {
                target: self.describe(),
                source: self.simulated(),
            });
        }
        Ok(self.records.lock().await.clone())
    }

    async fn save(&self, records: &[Fields]) -> Result<(), StoreError> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(StoreError::Persistence {
                target: self.describe(),
                source: self.simulated(),
            });
        }
        *self.records.lock().await = records.to_vec();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
