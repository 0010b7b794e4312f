//! Sample days for dev mode, so the UI has something to show without
//! touching the real data file.

use time::{Date, Duration, Time};
use worktimer::time_format::date_key;
use worktimer::{AppData, Clock, Day, Entry};

const SAMPLE_DAYS: &[&[(&str, (u8, u8), (u8, u8))]] = &[
    &[
        ("Standup", (9, 0), (9, 15)),
        ("Code review", (9, 15), (10, 40)),
        ("Release prep", (13, 0), (15, 30)),
    ],
    &[
        ("Planning", (8, 30), (9, 30)),
        ("Bug triage", (10, 0), (11, 45)),
    ],
    &[("Onboarding docs", (9, 0), (12, 0))],
];

pub fn sample_data<Z: Clock + ?Sized>(today: Date, zone: &Z) -> AppData {
    SAMPLE_DAYS
        .iter()
        .enumerate()
        .filter_map(|(days_back, entries)| {
            let date = today.checked_sub(Duration::days(days_back as i64))?;
            let entries = entries
                .iter()
                .filter_map(|&(desc, begin, end)| {
                    let at = |(h, m): (u8, u8)| {
                        Time::from_hms(h, m, 0)
                            .ok()
                            .map(|time| zone.assume_local(date.with_time(time)))
                    };
                    Some(Entry::new(desc, at(begin)?, at(end)?))
                })
                .collect();

            Some((
                date_key(date),
                Day {
                    entries,
                    ..Day::default()
                },
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};
    use worktimer::FixedClock;

    #[test]
    fn seeds_today_and_previous_days() {
        let clock = FixedClock::new(datetime!(2023-03-01 12:00 UTC));
        let data = sample_data(date!(2023 - 03 - 01), &clock);

        assert_eq!(
            data.keys().cloned().collect::<Vec<_>>(),
            vec!["2023-02-27", "2023-02-28", "2023-03-01"]
        );
        assert_eq!(data["2023-03-01"].entries.len(), 3);
        assert!(data.values().all(|day| !day.is_running()));
    }
}
