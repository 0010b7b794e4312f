use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::StorageBackend;
use crate::domain::AppData;
use crate::StorageError;

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    store: Arc<Mutex<Option<AppData>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `data`, as if it had been saved before.
    pub fn seeded(data: AppData) -> Self {
        Self {
            store: Arc::new(Mutex::new(Some(data))),
        }
    }

    /// What the last save wrote.
    pub fn snapshot(&self) -> Option<AppData> {
        self.store.lock().expect("memory store lock poisoned").clone()
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    async fn load(&self) -> Result<Option<AppData>, StorageError> {
        Ok(self.snapshot())
    }

    async fn save(&self, data: &AppData) -> Result<(), StorageError> {
        *self.store.lock().expect("memory store lock poisoned") = Some(data.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
