use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use worktimer::StorageChoice;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorktimerConfig {
    /// Storage backend: "auto", "file" or "memory"
    #[serde(default)]
    pub storage: StorageChoice,
    /// Data file used by the file backend. Defaults to the platform data dir.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    /// Where exported days are written. Defaults to the download dir.
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
    /// Template used by `print`. Defaults to the bundled one.
    #[serde(default)]
    pub template_path: Option<PathBuf>,
    /// Log filter level, overridden by RUST_LOG
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub popout: PopoutConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopoutConfig {
    /// Terminal command the popout window is opened with. `{cols}` and
    /// `{rows}` are replaced by the window size; the worktimer command line is
    /// appended. Empty disables popouts.
    #[serde(default = "default_popout_command")]
    pub command: Vec<String>,
    #[serde(default = "default_popout_cols")]
    pub cols: u16,
    #[serde(default = "default_popout_rows")]
    pub rows: u16,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_popout_command() -> Vec<String> {
    ["xterm", "-geometry", "{cols}x{rows}", "-e"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_popout_cols() -> u16 {
    85
}

fn default_popout_rows() -> u16 {
    24
}

impl Default for PopoutConfig {
    fn default() -> Self {
        Self {
            command: default_popout_command(),
            cols: default_popout_cols(),
            rows: default_popout_rows(),
        }
    }
}

impl Default for WorktimerConfig {
    fn default() -> Self {
        Self {
            storage: StorageChoice::default(),
            data_file: None,
            export_dir: None,
            template_path: None,
            log_level: default_log_level(),
            popout: PopoutConfig::default(),
        }
    }
}

impl WorktimerConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("worktimer")
            .join("config.toml"))
    }

    pub fn log_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("worktimer")
            .join("logs")
    }

    /// Load config from disk. Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }

    /// Directory exported days are written to.
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
