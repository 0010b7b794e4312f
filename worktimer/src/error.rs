use std::path::PathBuf;

use thiserror::Error;

use crate::controller::Field;

/// Errors that can occur while handling worktimer actions.
#[derive(Debug, Error)]
pub enum WorktimerError {
    #[error("timer already running")]
    TimerAlreadyRunning,
    #[error("no timer running")]
    NoTimerRunning,
    #[error("trying to remove entry without index")]
    MissingEntryIndex,
    #[error("no entry at position {0}")]
    EntryNotFound(usize),
    #[error("field `{field}` does not belong to {target}")]
    FieldNotOnTarget { field: Field, target: &'static str },
    #[error("failed to serialize day: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl WorktimerError {
    /// Whether the error should be shown to the user, as opposed to only logged.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, Self::MissingEntryIndex)
    }
}

/// Errors raised by a [`crate::StorageBackend`].
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("stored data is malformed: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("failed to encode data: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while rendering a display model through a template.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("invalid template: {0}")]
    Template(#[from] minijinja::Error),
    #[error("failed to read template {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
