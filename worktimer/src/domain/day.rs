use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

/// Every tracked day, keyed by `YYYY-MM-DD`.
pub type AppData = BTreeMap<String, Day>;

/// All tracking data for one calendar date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    #[serde(default)]
    pub entries: Vec<Entry>,
    /// Start of the running timer. `None` while idle.
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub current_timer: Option<OffsetDateTime>,
    #[serde(default)]
    pub current_desc: String,
}

impl Day {
    pub fn is_running(&self) -> bool {
        self.current_timer.is_some()
    }

    /// Time elapsed on the running timer, if any.
    pub fn running_duration(&self, now: OffsetDateTime) -> Option<Duration> {
        self.current_timer.map(|start| now - start)
    }

    /// Sum of all entries whose bounds are both valid.
    pub fn entries_duration(&self) -> Duration {
        self.entries
            .iter()
            .filter_map(Entry::duration)
            .fold(Duration::ZERO, |acc, d| acc + d)
    }

    /// Entries plus the running timer.
    pub fn combined_duration(&self, now: OffsetDateTime) -> Duration {
        self.entries_duration() + self.running_duration(now).unwrap_or(Duration::ZERO)
    }
}

/// One completed interval of tracked work.
///
/// A `None` bound is an instant that could not be understood, e.g. a time
/// field the user left malformed. It is stored as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub desc: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub begin: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end: Option<OffsetDateTime>,
}

impl Entry {
    pub fn new(desc: impl Into<String>, begin: OffsetDateTime, end: OffsetDateTime) -> Self {
        Self {
            desc: desc.into(),
            begin: Some(begin),
            end: Some(end),
        }
    }

    pub fn duration(&self) -> Option<Duration> {
        Some(self.end? - self.begin?)
    }
}
