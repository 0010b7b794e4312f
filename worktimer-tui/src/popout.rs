use crate::bootstrap::Mode;
use crate::config::PopoutConfig;
use anyhow::{bail, Context, Result};
use std::process::{Command, Stdio};

/// Opens another worktimer in a fixed-size terminal window, in the same mode
/// as this one.
pub fn open(config: &PopoutConfig, mode: Mode) -> Result<()> {
    let exe = std::env::current_exe().context("Cannot locate the worktimer executable")?;
    let argv = command_line(config, &exe.to_string_lossy(), mode)?;

    Command::new(&argv[0])
        .args(&argv[1..])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to start `{}`", argv[0]))?;

    tracing::info!(command = ?argv, "Opened popout window");
    Ok(())
}

fn command_line(config: &PopoutConfig, exe: &str, mode: Mode) -> Result<Vec<String>> {
    if config.command.is_empty() {
        bail!("no popout command configured");
    }

    let cols = config.cols.to_string();
    let rows = config.rows.to_string();
    let mut argv: Vec<String> = config
        .command
        .iter()
        .map(|arg| arg.replace("{cols}", &cols).replace("{rows}", &rows))
        .collect();
    argv.push(exe.to_string());
    argv.push(mode.subcommand().to_string());
    Ok(argv)
}
