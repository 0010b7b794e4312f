//! Storage backend port.
//!
//! Persists the whole [`AppData`] blob. There are no partial updates: every
//! save overwrites whatever was stored before.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::AppData;
use crate::StorageError;

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Outbound port for persisting tracked days.
#[async_trait]
pub trait StorageBackend: Send + Sync + 'static {
    /// Load the previously saved blob, or `None` if nothing was ever saved.
    async fn load(&self) -> Result<Option<AppData>, StorageError>;

    /// Persist the entire blob, replacing prior contents.
    async fn save(&self, data: &AppData) -> Result<(), StorageError>;

    /// Short name used in logs and the UI.
    fn name(&self) -> &'static str;
}

/// Which backend to use, as configured by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageChoice {
    /// File storage when a data location can be resolved, memory otherwise.
    #[default]
    Auto,
    File,
    Memory,
}

/// Default location of the data file inside the platform data directory.
pub fn default_data_file() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("worktimer").join("data.json"))
}

/// Picks the backend once at startup.
pub fn select(
    choice: StorageChoice,
    data_file: Option<PathBuf>,
) -> Result<Arc<dyn StorageBackend>, StorageError> {
    let data_file = data_file.or_else(default_data_file);

    let backend: Arc<dyn StorageBackend> = match (choice, data_file) {
        (StorageChoice::Memory, _) => Arc::new(MemoryStorage::new()),
        (StorageChoice::File | StorageChoice::Auto, Some(path)) => {
            Arc::new(FileStorage::new(path))
        }
        (StorageChoice::File, None) => {
            return Err(StorageError::Unavailable(
                "cannot determine a location for the data file".to_string(),
            ));
        }
        (StorageChoice::Auto, None) => {
            tracing::warn!("No data directory available, tracked time will not be persisted");
            Arc::new(MemoryStorage::new())
        }
    };

    tracing::info!(backend = backend.name(), "Selected storage backend");
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_selects_file_storage() {
        let backend = select(StorageChoice::Auto, Some(PathBuf::from("/tmp/wt.json"))).unwrap();
        assert_eq!(backend.name(), "file");

        let backend = select(StorageChoice::File, Some(PathBuf::from("/tmp/wt.json"))).unwrap();
        assert_eq!(backend.name(), "file");
    }

    #[test]
    fn memory_choice_wins_over_path() {
        let backend = select(StorageChoice::Memory, Some(PathBuf::from("/tmp/wt.json"))).unwrap();
        assert_eq!(backend.name(), "memory");
    }

    #[test]
    fn choice_deserializes_lowercase() {
        let choice: StorageChoice = serde_json::from_str(r#""memory""#).unwrap();
        assert_eq!(choice, StorageChoice::Memory);
        assert_eq!(StorageChoice::default(), StorageChoice::Auto);
    }
}
