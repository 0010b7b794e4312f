use crate::bootstrap::Mode;
use worktimer::time_format::parse_date_key;
use worktimer::{Action, DisplayModel, Field, LiveTotals, ViewContainer};

mod state;
pub use state::{EditTarget, FieldEdit, FocusedRow, TextInput};

pub struct App {
    pub running: bool,
    /// What the controller last rendered. `None` until initialization.
    pub model: Option<DisplayModel>,
    /// Set when initialization failed; replaces the whole UI.
    pub init_error: Option<String>,
    pub status_message: Option<String>,
    pub storage_name: &'static str,
    pub mode: Mode,

    pub focused_row: FocusedRow,
    pub focused_column: usize,
    pub edit: Option<FieldEdit>,
}

impl App {
    pub fn new() -> Self {
        Self {
            running: true,
            model: None,
            init_error: None,
            status_message: None,
            storage_name: "",
            mode: Mode::Normal,
            focused_row: FocusedRow::Timer,
            focused_column: 0,
            edit: None,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn show_init_error(&mut self, message: String) {
        self.init_error = Some(message);
        self.model = None;
        self.edit = None;
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    pub fn is_timer_running(&self) -> bool {
        self.model.as_ref().is_some_and(|m| m.running)
    }

    pub fn entry_count(&self) -> usize {
        self.model.as_ref().map_or(0, |m| m.entries.len())
    }

    pub fn focus_down(&mut self) {
        let count = self.entry_count();
        self.focused_row = match self.focused_row {
            FocusedRow::Date => FocusedRow::Timer,
            FocusedRow::Timer if count > 0 => FocusedRow::Entry(0),
            FocusedRow::Entry(index) if index + 1 < count => FocusedRow::Entry(index + 1),
            row => row,
        };
        self.clamp_column();
    }

    pub fn focus_up(&mut self) {
        self.focused_row = match self.focused_row {
            FocusedRow::Date | FocusedRow::Timer => FocusedRow::Date,
            FocusedRow::Entry(0) => FocusedRow::Timer,
            FocusedRow::Entry(index) => FocusedRow::Entry(index - 1),
        };
        self.clamp_column();
    }

    pub fn focus_next_field(&mut self) {
        self.focused_column = (self.focused_column + 1) % self.focused_row.field_count();
    }

    pub fn focus_previous_field(&mut self) {
        let count = self.focused_row.field_count();
        self.focused_column = (self.focused_column + count - 1) % count;
    }

    fn clamp_column(&mut self) {
        self.focused_column = self
            .focused_column
            .min(self.focused_row.field_count() - 1);
    }

    pub fn focused_target(&self) -> EditTarget {
        self.focused_row.target(self.focused_column)
    }

    /// Text currently shown for `target`.
    pub fn displayed_value(&self, target: EditTarget) -> String {
        let Some(model) = &self.model else {
            return String::new();
        };

        let value = match target {
            EditTarget::Date => Some(&model.date_key),
            EditTarget::Field { index: None, field } => match field {
                Field::CurrentTimer => model.current_timer.as_ref(),
                Field::CurrentDesc => Some(&model.current_desc),
                _ => None,
            },
            EditTarget::Field {
                index: Some(index),
                field,
            } => model.entries.get(index).and_then(|entry| match field {
                Field::Begin => entry.begin.as_ref(),
                Field::End => entry.end.as_ref(),
                Field::Desc => Some(&entry.desc),
                _ => None,
            }),
        };

        value.cloned().unwrap_or_default()
    }

    /// Starts typing into the focused field, prefilled with what is shown.
    pub fn begin_edit(&mut self) {
        if self.model.is_none() {
            return;
        }
        let target = self.focused_target();
        self.edit = Some(FieldEdit {
            target,
            input: TextInput::from_str(&self.displayed_value(target)),
        });
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// The edited field lost focus: turn it into the action that commits it.
    pub fn finish_edit(&mut self) -> Option<Action> {
        let edit = self.edit.take()?;
        let value = edit.input.value;

        match edit.target {
            EditTarget::Date => match parse_date_key(&value) {
                Some(date) => Some(Action::SetDate(date)),
                None => {
                    self.set_status(format!("Invalid date: {value} (expected YYYY-MM-DD)"));
                    None
                }
            },
            EditTarget::Field { index, field } => {
                // Time fields come back through a full render; text fields keep
                // what was typed, like an input element would.
                if !field.is_time() {
                    self.show_text(index, field, &value);
                }
                Some(Action::Commit {
                    index,
                    field,
                    value,
                })
            }
        }
    }

    fn show_text(&mut self, index: Option<usize>, field: Field, value: &str) {
        let Some(model) = self.model.as_mut() else {
            return;
        };
        match (index, field) {
            (None, Field::CurrentDesc) => model.current_desc = value.to_string(),
            (Some(index), Field::Desc) => {
                if let Some(entry) = model.entries.get_mut(index) {
                    entry.desc = value.to_string();
                }
            }
            _ => {}
        }
    }

    pub fn start_stop_action(&self) -> Action {
        if self.is_timer_running() {
            Action::Stop
        } else {
            Action::Start
        }
    }

    /// Delete targets the focused entry; other rows carry no position.
    pub fn delete_action(&self) -> Action {
        Action::Delete {
            index: self.focused_row.entry_index(),
        }
    }

    pub fn contextual_status(&self) -> String {
        if self.is_editing() {
            "Enter/Tab: Save field  Esc: Cancel".to_string()
        } else if self.is_timer_running() {
            "Timer running".to_string()
        } else {
            "Timer not running".to_string()
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewContainer for App {
    fn replace(&mut self, model: DisplayModel) {
        let count = model.entries.len();
        self.model = Some(model);
        self.edit = None;

        if let FocusedRow::Entry(index) = self.focused_row {
            self.focused_row = match count {
                0 => FocusedRow::Timer,
                _ => FocusedRow::Entry(index.min(count - 1)),
            };
            self.clamp_column();
        }
    }

    fn update_totals(&mut self, totals: &LiveTotals) {
        if let Some(model) = self.model.as_mut() {
            model.apply_totals(totals);
        }
    }
}
