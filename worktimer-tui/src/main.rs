mod app;
mod bootstrap;
mod cli;
mod config;
mod dev_data;
mod download;
mod logging;
mod popout;
mod runtime;
mod ui;

use anyhow::{Context, Result};
use app::App;
use bootstrap::Mode;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use time::Date;
use worktimer::{Action, Clock, Effect, RecordedView, SystemClock, TemplateRenderer};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());

    match cli.command.unwrap_or(cli::Commands::Run) {
        cli::Commands::ConfigPath => print_config_path(),
        cli::Commands::Run => run_tui(Mode::Normal, clock).await,
        cli::Commands::Dev => run_tui(Mode::Dev, clock).await,
        cli::Commands::Print { date } => print_day(&setup()?, clock, date).await,
        cli::Commands::Export { date, out } => export_day(&setup()?, clock, date, out).await,
    }
}

fn setup() -> Result<config::WorktimerConfig> {
    let cfg = config::WorktimerConfig::load()?;
    logging::enable_logging(&config::WorktimerConfig::log_dir(), &cfg.log_level)?;
    Ok(cfg)
}

fn print_config_path() -> Result<()> {
    let path = config::WorktimerConfig::config_path()?;
    if !path.exists() {
        config::WorktimerConfig::default().save()?;
        println!("Created default config at: {}", path.display());
    } else {
        println!("{}", path.display());
    }
    Ok(())
}

async fn run_tui(mode: Mode, clock: Arc<dyn Clock>) -> Result<()> {
    let mut app = App::new();
    let session = bootstrap::open(mode, setup(), clock, &mut app).await;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = match session {
        Some((cfg, mut controller)) => {
            runtime::run_app(&mut terminal, &mut app, &mut controller, &cfg).await
        }
        None => runtime::run_error_panel(&mut terminal, &mut app),
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "Worktimer exited with an error");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Loads storage without a terminal UI and moves to `date` if given.
async fn headless(
    cfg: &config::WorktimerConfig,
    clock: Arc<dyn Clock>,
    date: Option<Date>,
    view: &mut RecordedView,
) -> Result<worktimer::Controller> {
    let mut controller = bootstrap::start(Mode::Normal, cfg, clock, view).await?;
    if let Some(date) = date {
        controller.dispatch(Action::SetDate(date), view).await?;
    }
    Ok(controller)
}

async fn print_day(
    cfg: &config::WorktimerConfig,
    clock: Arc<dyn Clock>,
    date: Option<Date>,
) -> Result<()> {
    let mut view = RecordedView::default();
    headless(cfg, clock, date, &mut view).await?;

    let renderer = match &cfg.template_path {
        Some(path) => TemplateRenderer::from_file(path)?,
        None => TemplateRenderer::new(),
    };
    let model = view.model.context("Nothing was rendered")?;
    print!("{}", renderer.render(&model)?);
    Ok(())
}

async fn export_day(
    cfg: &config::WorktimerConfig,
    clock: Arc<dyn Clock>,
    date: Option<Date>,
    out: Option<PathBuf>,
) -> Result<()> {
    let mut view = RecordedView::default();
    let mut controller = headless(cfg, clock, date, &mut view).await?;

    let Effect::Download(file) = controller.dispatch(Action::Export, &mut view).await? else {
        anyhow::bail!("Export produced no file");
    };
    let dir = out.unwrap_or_else(|| cfg.export_dir());
    let path = download::save_download(&dir, &file).await?;
    println!("{}", path.display());
    Ok(())
}
