use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use worktimer::ExportFile;

/// Writes an exported file into `dir`, replacing any earlier export of the
/// same day.
pub async fn save_download(dir: &Path, file: &ExportFile) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let path = dir.join(&file.name);
    tokio::fs::write(&path, &file.contents)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), "Exported day");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_into_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("exports");
        let file = ExportFile {
            name: "2023-05-15.json".to_string(),
            contents: "{}".to_string(),
        };

        let path = save_download(&target, &file).await.unwrap();

        assert_eq!(path, target.join("2023-05-15.json"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "{}");
    }
}
