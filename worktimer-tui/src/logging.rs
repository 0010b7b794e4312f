use std::path::Path;

use anyhow::Result;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::EnvFilter;

/// Logs go to a daily rolling file: stdout belongs to the terminal UI.
pub fn enable_logging(log_dir: &Path, level: &str) -> Result<()> {
    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(5)
        .filename_prefix("worktimer")
        .filename_suffix("log")
        .build(log_dir)?;

    let filter = std::env::var("RUST_LOG")
        .ok()
        .map(EnvFilter::new)
        .unwrap_or_else(|| {
            EnvFilter::new(format!("worktimer={level},worktimer_tui={level}"))
        });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(appender)
        .with_ansi(false)
        .init();
    Ok(())
}
