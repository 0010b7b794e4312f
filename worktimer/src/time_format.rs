//! Zero-padded `HH:MM` formatting of instants and durations, and parsing of
//! the inputs the user types back in.

use time::{macros::format_description, Date, OffsetDateTime, Time};

use crate::clock::Clock;

const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;

/// Absolute value of `n`, left-padded with `0` to width 2.
pub fn pad(n: i64) -> String {
    format!("{:02}", n.unsigned_abs())
}

pub fn format_hours_minutes(hours: i64, minutes: i64) -> String {
    format!("{}:{}", pad(hours), pad(minutes))
}

/// Local time of day of `instant`, or `None` when the instant is missing.
pub fn instant_to_hour<Z: Clock + ?Sized>(
    instant: Option<OffsetDateTime>,
    zone: &Z,
) -> Option<String> {
    let local = zone.to_local(instant?);
    Some(format_hours_minutes(
        i64::from(local.hour()),
        i64::from(local.minute()),
    ))
}

/// Formats a duration in milliseconds as `HH:MM`.
///
/// Hours and minutes are derived independently: hours are floored while the
/// remaining minutes are rounded, so a duration less than thirty seconds short
/// of a full hour is shown with `60` minutes.
pub fn duration_to_hours_minutes(ms: i64) -> String {
    let hours = (ms as f64 / MS_PER_HOUR as f64).floor() as i64;
    let minutes = round_half_up((ms % MS_PER_HOUR) as f64 / MS_PER_MINUTE as f64);

    format_hours_minutes(hours, minutes)
}

fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Parses `HH:MM` user input. Returns `None` for anything malformed.
pub fn parse_hours_minutes(input: &str) -> Option<Time> {
    let (hours, minutes) = input.trim().split_once(':')?;
    let hours: u8 = hours.trim().parse().ok()?;
    let minutes: u8 = minutes.trim().parse().ok()?;

    Time::from_hms(hours, minutes, 0).ok()
}

/// Combines the calendar date of the selected day with `HH:MM` input, in the
/// offset the zone has on that date.
pub fn instant_on<Z: Clock + ?Sized>(
    date: Date,
    input: &str,
    zone: &Z,
) -> Option<OffsetDateTime> {
    let time = parse_hours_minutes(input)?;
    Some(zone.assume_local(date.with_time(time)))
}

/// The `YYYY-MM-DD` key a day is stored under.
pub fn date_key(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        date.month() as u8,
        date.day()
    )
}

pub fn parse_date_key(key: &str) -> Option<Date> {
    Date::parse(key.trim(), format_description!("[year]-[month]-[day]")).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use time::macros::{date, datetime, offset};

    fn zone() -> FixedClock {
        FixedClock::new(datetime!(2024-01-10 12:00 +1)).with_zone(|date| {
            if (4..=9).contains(&(date.month() as u8)) {
                offset!(+2)
            } else {
                offset!(+1)
            }
        })
    }

    #[test]
    fn pad_is_two_digits_and_unsigned() {
        assert_eq!(pad(5), "05");
        assert_eq!(pad(-5), "05");
        assert_eq!(pad(0), "00");
        assert_eq!(pad(42), "42");
        assert_eq!(pad(pad(42).parse().unwrap()), "42");
        assert_eq!(pad(123), "123");
    }

    #[test]
    fn formats_hours_and_minutes() {
        assert_eq!(format_hours_minutes(9, 5), "09:05");
        assert_eq!(format_hours_minutes(13, 48), "13:48");
    }

    #[test]
    fn formats_durations() {
        assert_eq!(duration_to_hours_minutes(0), "00:00");
        assert_eq!(duration_to_hours_minutes(3_600_000), "01:00");
        assert_eq!(duration_to_hours_minutes(5_400_000), "01:30");
        assert_eq!(duration_to_hours_minutes(4_500_000), "01:15");
        assert_eq!(duration_to_hours_minutes(29_999), "00:00");
        assert_eq!(duration_to_hours_minutes(30_000), "00:01");
    }

    #[test]
    fn duration_just_below_an_hour_shows_sixty_minutes() {
        assert_eq!(duration_to_hours_minutes(3_599_000), "00:60");
    }

    #[test]
    fn instant_to_hour_uses_local_offset() {
        let instant = datetime!(2023-06-05 11:48:40.642 UTC);
        assert_eq!(
            instant_to_hour(Some(instant), &zone()),
            Some("13:48".to_string())
        );
        assert_eq!(instant_to_hour(None, &zone()), None);
    }

    #[test]
    fn instant_to_hour_uses_offset_of_that_date() {
        let summer = datetime!(2023-07-03 09:00 +2);
        let winter = datetime!(2023-12-04 09:00 +1);
        assert_eq!(
            instant_to_hour(Some(summer), &zone()).as_deref(),
            Some("09:00")
        );
        assert_eq!(
            instant_to_hour(Some(winter), &zone()).as_deref(),
            Some("09:00")
        );
    }

    #[test]
    fn parses_hours_minutes_input() {
        assert_eq!(parse_hours_minutes("09:00"), Time::from_hms(9, 0, 0).ok());
        assert_eq!(parse_hours_minutes(" 7:5 "), Time::from_hms(7, 5, 0).ok());
        assert_eq!(parse_hours_minutes("9"), None);
        assert_eq!(parse_hours_minutes("ab:cd"), None);
        assert_eq!(parse_hours_minutes("24:00"), None);
        assert_eq!(parse_hours_minutes("12:60"), None);
        assert_eq!(parse_hours_minutes(""), None);
    }

    #[test]
    fn instant_on_uses_selected_date() {
        let instant = instant_on(date!(2023 - 05 - 15), "09:00", &zone()).unwrap();
        assert_eq!(instant, datetime!(2023-05-15 09:00 +2));

        let instant = instant_on(date!(2023 - 12 - 04), "09:00", &zone()).unwrap();
        assert_eq!(instant.offset(), offset!(+1));
        assert_eq!(instant_on(date!(2023 - 12 - 04), "9h", &zone()), None);
    }

    #[test]
    fn date_keys() {
        assert_eq!(date_key(date!(2023 - 05 - 15)), "2023-05-15");
        assert_eq!(date_key(date!(2024 - 01 - 01)), "2024-01-01");
        assert_eq!(parse_date_key("2023-05-15"), Some(date!(2023 - 05 - 15)));
        assert_eq!(parse_date_key("2023-02-30"), None);
        assert_eq!(parse_date_key("tomorrow"), None);
    }
}
