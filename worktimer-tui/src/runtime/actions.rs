use crate::app::App;
use crate::config::WorktimerConfig;
use crate::{download, popout};
use worktimer::{Action, Controller, Effect};

pub(super) async fn run_action(
    action: Action,
    app: &mut App,
    controller: &mut Controller,
    config: &WorktimerConfig,
) {
    let done = success_message(&action);

    match controller.dispatch(action, app).await {
        Ok(Effect::None) => match done {
            Some(message) => app.set_status(message.to_string()),
            None => app.clear_status(),
        },
        Ok(Effect::Download(file)) => {
            match download::save_download(&config.export_dir(), &file).await {
                Ok(path) => app.set_status(format!("Exported to {}", path.display())),
                Err(e) => {
                    tracing::error!(error = %e, "Export failed");
                    app.set_status(format!("Error exporting: {e}"));
                }
            }
        }
        Ok(Effect::Popout) => match popout::open(&config.popout, app.mode) {
            Ok(()) => app.set_status("Opened popout window".to_string()),
            Err(e) => {
                tracing::error!(error = %e, "Popout failed");
                app.set_status(format!("Error opening popout: {e}"));
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "Action failed");
            if e.is_user_visible() {
                app.set_status(format!("Error: {e}"));
            }
        }
    }
}

fn success_message(action: &Action) -> Option<&'static str> {
    match action {
        Action::Start => Some("Timer started"),
        Action::Stop => Some("Timer stopped, entry saved"),
        Action::Delete { .. } => Some("Entry deleted"),
        Action::Commit { .. } => Some("Saved"),
        _ => None,
    }
}
