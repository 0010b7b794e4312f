use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use worktimer::Action;

use super::action_queue::ActionTx;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

pub(super) fn handle_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if app.is_editing() {
        handle_edit_key(key, app, action_tx);
    } else {
        handle_day_key(key, app, action_tx);
    }
}

fn handle_day_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Left | KeyCode::Char('h') => enqueue_action(action_tx, Action::PreviousDay),
        KeyCode::Right | KeyCode::Char('l') => enqueue_action(action_tx, Action::NextDay),
        KeyCode::Char('g') => enqueue_action(action_tx, Action::Today),
        KeyCode::Down | KeyCode::Char('j') => app.focus_down(),
        KeyCode::Up | KeyCode::Char('k') => app.focus_up(),
        KeyCode::Tab => app.focus_next_field(),
        KeyCode::BackTab => app.focus_previous_field(),
        KeyCode::Enter => app.begin_edit(),
        KeyCode::Char(' ') => enqueue_action(action_tx, app.start_stop_action()),
        KeyCode::Char('d') | KeyCode::Delete => enqueue_action(action_tx, app.delete_action()),
        KeyCode::Char('e') => enqueue_action(action_tx, Action::Export),
        KeyCode::Char('o') => enqueue_action(action_tx, Action::Popout),
        _ => {}
    }
}

fn handle_edit_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Enter => commit_edit(app, action_tx),
        // Leaving the field commits it, like losing focus
        KeyCode::Tab => {
            commit_edit(app, action_tx);
            app.focus_next_field();
        }
        KeyCode::BackTab => {
            commit_edit(app, action_tx);
            app.focus_previous_field();
        }
        _ => {
            let Some(edit) = app.edit.as_mut() else {
                return;
            };
            let input = &mut edit.input;
            match key.code {
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    input.insert(c)
                }
                KeyCode::Backspace => input.backspace(),
                KeyCode::Left => input.move_left(),
                KeyCode::Right => input.move_right(),
                KeyCode::Home => input.home(),
                KeyCode::End => input.end(),
                _ => {}
            }
        }
    }
}

fn commit_edit(app: &mut App, action_tx: &ActionTx) {
    if let Some(action) = app.finish_edit() {
        enqueue_action(action_tx, action);
    }
}

#[cfg(test)]
mod tests {
    use super::super::action_queue::channel;
    use super::*;
    use worktimer::{DisplayModel, Field, ViewContainer};

    fn app() -> App {
        let mut app = App::new();
        app.replace(DisplayModel {
            date_key: "2023-05-15".to_string(),
            current_desc: String::new(),
            current_timer: None,
            current_total: None,
            running: false,
            entries: vec![],
            combined_total: "00:00".to_string(),
        });
        app
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn space_starts_timer() {
        let (tx, mut rx) = channel();
        let mut app = app();

        handle_key(press(KeyCode::Char(' ')), &mut app, &tx);

        assert_eq!(rx.try_recv().unwrap(), Action::Start);
    }

    #[test]
    fn typing_a_description_commits_on_enter() {
        let (tx, mut rx) = channel();
        let mut app = app();

        handle_key(press(KeyCode::Tab), &mut app, &tx);
        handle_key(press(KeyCode::Enter), &mut app, &tx);
        for c in "bla".chars() {
            handle_key(press(KeyCode::Char(c)), &mut app, &tx);
        }
        // 'q' is text while editing
        handle_key(press(KeyCode::Char('q')), &mut app, &tx);
        handle_key(press(KeyCode::Backspace), &mut app, &tx);
        handle_key(press(KeyCode::Enter), &mut app, &tx);

        assert!(app.running);
        assert_eq!(
            rx.try_recv().unwrap(),
            Action::Commit {
                index: None,
                field: Field::CurrentDesc,
                value: "bla".to_string(),
            }
        );
    }

    #[test]
    fn escape_discards_edit() {
        let (tx, mut rx) = channel();
        let mut app = app();

        handle_key(press(KeyCode::Enter), &mut app, &tx);
        handle_key(press(KeyCode::Char('9')), &mut app, &tx);
        handle_key(press(KeyCode::Esc), &mut app, &tx);

        assert!(!app.is_editing());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn delete_outside_entries_has_no_index() {
        let (tx, mut rx) = channel();
        let mut app = app();

        handle_key(press(KeyCode::Char('d')), &mut app, &tx);

        assert_eq!(rx.try_recv().unwrap(), Action::Delete { index: None });
    }

    #[test]
    fn navigation_keys() {
        let (tx, mut rx) = channel();
        let mut app = app();

        handle_key(press(KeyCode::Char('l')), &mut app, &tx);
        handle_key(press(KeyCode::Left), &mut app, &tx);
        handle_key(press(KeyCode::Char('g')), &mut app, &tx);

        assert_eq!(rx.try_recv().unwrap(), Action::NextDay);
        assert_eq!(rx.try_recv().unwrap(), Action::PreviousDay);
        assert_eq!(rx.try_recv().unwrap(), Action::Today);
    }
}
