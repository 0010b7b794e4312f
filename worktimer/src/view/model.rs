use serde::Serialize;
use time::{Duration, OffsetDateTime};

use crate::clock::Clock;
use crate::domain::{Day, Entry};
use crate::time_format::{duration_to_hours_minutes, instant_to_hour};

/// Everything needed to display one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayModel {
    pub date_key: String,
    pub current_desc: String,
    /// Start of the running timer as `HH:MM`.
    pub current_timer: Option<String>,
    /// Elapsed time on the running timer.
    pub current_total: Option<String>,
    pub running: bool,
    pub entries: Vec<EntryView>,
    pub combined_total: String,
}

/// One entry row. `index` is the entry's position when the view was built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
    pub index: usize,
    pub desc: String,
    pub begin: Option<String>,
    pub end: Option<String>,
    pub total: Option<String>,
}

/// The two figures that change while a timer runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveTotals {
    pub current_total: String,
    pub combined_total: String,
}

impl DisplayModel {
    /// Times of day are shown in the offset `zone` has on each instant.
    pub fn build<Z: Clock + ?Sized>(
        date_key: impl Into<String>,
        day: &Day,
        now: OffsetDateTime,
        zone: &Z,
    ) -> Self {
        let running = day.running_duration(now);

        let entries = day
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| EntryView::build(index, entry, zone))
            .collect();

        Self {
            date_key: date_key.into(),
            current_desc: day.current_desc.clone(),
            current_timer: instant_to_hour(day.current_timer, zone),
            current_total: running.map(format_duration),
            running: running.is_some(),
            entries,
            combined_total: format_duration(day.combined_duration(now)),
        }
    }

    pub fn apply_totals(&mut self, totals: &LiveTotals) {
        self.current_total = Some(totals.current_total.clone());
        self.combined_total = totals.combined_total.clone();
    }
}

impl EntryView {
    fn build<Z: Clock + ?Sized>(index: usize, entry: &Entry, zone: &Z) -> Self {
        Self {
            index,
            desc: entry.desc.clone(),
            begin: instant_to_hour(entry.begin, zone),
            end: instant_to_hour(entry.end, zone),
            total: entry.duration().map(format_duration),
        }
    }
}

/// Totals for the periodic refresh; `None` while no timer runs.
pub fn live_totals(day: &Day, now: OffsetDateTime) -> Option<LiveTotals> {
    let running = day.running_duration(now)?;

    Some(LiveTotals {
        current_total: format_duration(running),
        combined_total: format_duration(day.combined_duration(now)),
    })
}

fn format_duration(duration: Duration) -> String {
    duration_to_hours_minutes(duration.whole_milliseconds() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use time::macros::{datetime, offset};

    fn clock() -> FixedClock {
        FixedClock::new(datetime!(2023-05-15 12:00 +2))
    }

    fn day_with_entries() -> Day {
        let nine = datetime!(2023-05-15 09:00 +2);
        Day {
            entries: vec![
                Entry::new("standup", nine, nine + Duration::minutes(30)),
                Entry::new(
                    "review",
                    nine + Duration::hours(1),
                    nine + Duration::minutes(105),
                ),
            ],
            current_timer: None,
            current_desc: String::new(),
        }
    }

    #[test]
    fn combined_total_of_finished_entries() {
        let day = day_with_entries();
        let model = DisplayModel::build(
            "2023-05-15",
            &day,
            datetime!(2023-05-15 12:00 +2),
            &clock(),
        );

        assert_eq!(model.combined_total, "01:15");
        assert!(!model.running);
        assert_eq!(model.current_timer, None);
        assert_eq!(model.current_total, None);
        assert_eq!(
            model.entries[1],
            EntryView {
                index: 1,
                desc: "review".to_string(),
                begin: Some("10:00".to_string()),
                end: Some("10:45".to_string()),
                total: Some("00:45".to_string()),
            }
        );
    }

    #[test]
    fn running_timer_counts_towards_combined_total() {
        let mut day = day_with_entries();
        day.current_timer = Some(datetime!(2023-05-15 11:00 +2));
        day.current_desc = "coding".to_string();

        let model = DisplayModel::build(
            "2023-05-15",
            &day,
            datetime!(2023-05-15 11:20 +2),
            &clock(),
        );

        assert!(model.running);
        assert_eq!(model.current_desc, "coding");
        assert_eq!(model.current_timer.as_deref(), Some("11:00"));
        assert_eq!(model.current_total.as_deref(), Some("00:20"));
        assert_eq!(model.combined_total, "01:35");
    }

    #[test]
    fn invalid_bounds_render_blank() {
        let mut day = day_with_entries();
        day.entries[0].end = None;

        let model = DisplayModel::build(
            "2023-05-15",
            &day,
            datetime!(2023-05-15 12:00 +2),
            &clock(),
        );

        assert_eq!(model.entries[0].begin.as_deref(), Some("09:00"));
        assert_eq!(model.entries[0].end, None);
        assert_eq!(model.entries[0].total, None);
        assert_eq!(model.combined_total, "00:45");
    }

    #[test]
    fn live_totals_only_while_running() {
        let mut day = day_with_entries();
        let now = datetime!(2023-05-15 12:00 +2);
        assert_eq!(live_totals(&day, now), None);

        day.current_timer = Some(datetime!(2023-05-15 11:00 +2));
        assert_eq!(
            live_totals(&day, now),
            Some(LiveTotals {
                current_total: "01:00".to_string(),
                combined_total: "02:15".to_string(),
            })
        );
    }

    #[test]
    fn summer_entries_keep_their_hours_in_winter() {
        let clock = FixedClock::new(datetime!(2024-01-10 12:00 +1)).with_zone(|date| {
            if (4..=9).contains(&(date.month() as u8)) {
                offset!(+2)
            } else {
                offset!(+1)
            }
        });
        let begin = datetime!(2023-07-03 09:00 +2);
        let day = Day {
            entries: vec![Entry::new("audit", begin, begin + Duration::hours(2))],
            ..Day::default()
        };

        let model = DisplayModel::build("2023-07-03", &day, clock.now(), &clock);

        assert_eq!(model.entries[0].begin.as_deref(), Some("09:00"));
        assert_eq!(model.entries[0].end.as_deref(), Some("11:00"));
    }
}
