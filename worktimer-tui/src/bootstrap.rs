use crate::app::App;
use crate::config::WorktimerConfig;
use crate::dev_data;
use std::sync::Arc;
use worktimer::{storage, Clock, Controller, MemoryStorage, StorageBackend, ViewContainer};

/// Where tracked time comes from for this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Configured storage.
    Normal,
    /// In-memory sample data, nothing is persisted.
    Dev,
}

impl Mode {
    /// Command line argument that starts this mode.
    pub fn subcommand(self) -> &'static str {
        match self {
            Self::Normal => "run",
            Self::Dev => "dev",
        }
    }
}

pub fn select_storage(
    mode: Mode,
    config: &WorktimerConfig,
    clock: &dyn Clock,
) -> Result<Arc<dyn StorageBackend>, worktimer::StorageError> {
    match mode {
        Mode::Normal => storage::select(config.storage, config.data_file.clone()),
        Mode::Dev => {
            let data = dev_data::sample_data(clock.today(), clock);
            tracing::info!(days = data.len(), "Dev mode: using sample data");
            Ok(Arc::new(MemoryStorage::seeded(data)))
        }
    }
}

/// Selects storage and loads the initial day into `view`.
pub async fn start<V: ViewContainer + ?Sized>(
    mode: Mode,
    config: &WorktimerConfig,
    clock: Arc<dyn Clock>,
    view: &mut V,
) -> Result<Controller, worktimer::WorktimerError> {
    let backend = select_storage(mode, config, clock.as_ref())?;
    Controller::initialize(backend, clock, view).await
}

/// Startup of the interactive UI. Any failure, including loading the config,
/// ends up on the error panel.
pub async fn open(
    mode: Mode,
    config: anyhow::Result<WorktimerConfig>,
    clock: Arc<dyn Clock>,
    app: &mut App,
) -> Option<(WorktimerConfig, Controller)> {
    match try_open(mode, config, clock, app).await {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::error!(error = %e, "Initialization failed");
            app.show_init_error(format!("{e:#}"));
            None
        }
    }
}

async fn try_open(
    mode: Mode,
    config: anyhow::Result<WorktimerConfig>,
    clock: Arc<dyn Clock>,
    app: &mut App,
) -> anyhow::Result<(WorktimerConfig, Controller)> {
    let config = config?;
    tracing::info!(?mode, "Starting worktimer");

    let controller = start(mode, &config, clock, app).await?;
    app.storage_name = controller.storage_name();
    app.mode = mode;
    Ok((config, controller))
}
