use time::{Date, Duration};

use crate::domain::{AppData, Day};
use crate::time_format::date_key;

/// In-memory owner of all tracked days and of the currently selected date.
#[derive(Debug, Clone)]
pub struct DayStore {
    data: AppData,
    selected: Date,
}

impl DayStore {
    pub fn new(data: AppData, selected: Date) -> Self {
        Self { data, selected }
    }

    pub fn data(&self) -> &AppData {
        &self.data
    }

    pub fn into_data(self) -> AppData {
        self.data
    }

    pub fn selected_date(&self) -> Date {
        self.selected
    }

    /// Key of the selected day.
    pub fn date_key(&self) -> String {
        date_key(self.selected)
    }

    pub fn set_date(&mut self, date: Date) {
        self.selected = date;
    }

    /// Moves the selection by `days`, rolling over months and years.
    pub fn add_days(&mut self, days: i64) {
        self.selected = self.selected.saturating_add(Duration::days(days));
    }

    /// The selected day, created and registered if it was never accessed.
    pub fn current_day(&mut self) -> &mut Day {
        self.data.entry(date_key(self.selected)).or_default()
    }

    /// Read-only lookup that does not register missing days.
    pub fn day(&self, key: &str) -> Option<&Day> {
        self.data.get(key)
    }
}
