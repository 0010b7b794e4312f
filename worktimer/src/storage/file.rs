use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::StorageBackend;
use crate::domain::AppData;
use crate::StorageError;

/// Keeps the blob as a single JSON document on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file a save is staged in before it replaces the data file.
    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl StorageBackend for FileStorage {
    async fn load(&self) -> Result<Option<AppData>, StorageError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No data file yet");
                return Ok(None);
            }
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };

        if raw.trim().is_empty() {
            return Ok(None);
        }

        let data = serde_json::from_str(&raw).map_err(StorageError::Malformed)?;
        Ok(Some(data))
    }

    async fn save(&self, data: &AppData) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::io(parent, e))?;
        }

        // Staged then renamed: the data file is never half-written.
        let raw = serde_json::to_string(data).map_err(StorageError::Encode)?;
        let staging = self.staging_path();
        tokio::fs::write(&staging, raw)
            .await
            .map_err(|e| StorageError::io(&staging, e))?;
        if let Err(e) = tokio::fs::rename(&staging, &self.path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(StorageError::io(&self.path, e));
        }

        tracing::debug!(path = %self.path.display(), days = data.len(), "Saved data");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Day, Entry};
    use time::macros::datetime;

    fn sample() -> AppData {
        let mut data = AppData::new();
        data.insert(
            "2023-05-15".to_string(),
            Day {
                entries: vec![Entry::new(
                    "review",
                    datetime!(2023-05-15 09:00 +2),
                    datetime!(2023-05-15 09:45 +2),
                )],
                current_timer: Some(datetime!(2023-05-15 10:00 +2)),
                current_desc: "coding".to_string(),
            },
        );
        data
    }

    #[tokio::test]
    async fn missing_file_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("data.json"));

        assert_eq!(storage.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("data.json"));

        storage.save(&sample()).await.unwrap();

        assert_eq!(storage.load().await.unwrap(), Some(sample()));
    }

    #[tokio::test]
    async fn save_overwrites_whole_blob() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("data.json"));

        storage.save(&sample()).await.unwrap();
        storage.save(&AppData::new()).await.unwrap();

        assert_eq!(storage.load().await.unwrap(), Some(AppData::new()));
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = FileStorage::new(path).load().await.unwrap_err();
        assert!(matches!(err, StorageError::Malformed(_)));
    }

    #[tokio::test]
    async fn save_leaves_no_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("data.json"));

        storage.save(&sample()).await.unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("data.json")]);
    }

    #[tokio::test]
    async fn interrupted_save_keeps_previous_data() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("data.json"));
        storage.save(&sample()).await.unwrap();

        // A save that died half way through writing.
        std::fs::write(dir.path().join("data.json.tmp"), "{\"2023-05-15\":{\"ent").unwrap();

        assert_eq!(storage.load().await.unwrap(), Some(sample()));

        storage.save(&AppData::new()).await.unwrap();
        assert_eq!(storage.load().await.unwrap(), Some(AppData::new()));
        assert!(!dir.path().join("data.json.tmp").exists());
    }
}
