use crate::app::App;
use crate::config::WorktimerConfig;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use worktimer::Controller;

use super::action_queue::channel;
use super::actions::run_action;
use super::keys::handle_key;

/// Running totals are refreshed in place this often.
const REFRESH_INTERVAL: Duration = Duration::from_secs(5);

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    controller: &mut Controller,
    config: &WorktimerConfig,
) -> Result<()> {
    let mut last_refresh = Instant::now();
    let (action_tx, mut action_rx) = channel();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(key, app, &action_tx);
                }
            }
        }

        if last_refresh.elapsed() >= REFRESH_INTERVAL {
            controller.refresh(app);
            last_refresh = Instant::now();
        }

        while let Ok(action) = action_rx.try_recv() {
            run_action(action, app, controller, config).await;
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}

/// Shows the initialization error until the user quits.
pub fn run_error_panel(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.quit(),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.quit()
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(())
}
