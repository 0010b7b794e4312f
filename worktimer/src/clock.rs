use std::sync::Mutex;

use chrono::{Local, TimeZone};
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Source of "now" and of the user's local time zone.
///
/// Offsets are looked up per instant, so a summer entry keeps its summer
/// offset when it is shown or edited in winter.
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;

    /// Offset in effect right now.
    fn offset(&self) -> UtcOffset {
        self.now().offset()
    }

    /// Offset in effect at `at`.
    fn offset_at(&self, _at: OffsetDateTime) -> UtcOffset {
        self.offset()
    }

    /// Offset a local wall-clock time on its own date resolves to.
    fn offset_on(&self, _local: PrimitiveDateTime) -> UtcOffset {
        self.offset()
    }

    fn today(&self) -> Date {
        self.now().date()
    }

    /// `at` expressed in local time.
    fn to_local(&self, at: OffsetDateTime) -> OffsetDateTime {
        at.to_offset(self.offset_at(at))
    }

    /// The instant a local wall-clock time stands for.
    fn assume_local(&self, local: PrimitiveDateTime) -> OffsetDateTime {
        local.assume_offset(self.offset_on(local))
    }
}

/// Wall clock in the system time zone, daylight saving included.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        let now = OffsetDateTime::now_utc();
        now.to_offset(self.offset_at(now))
    }

    /// Falls back to UTC when the zone cannot be determined.
    fn offset_at(&self, at: OffsetDateTime) -> UtcOffset {
        Local
            .timestamp_opt(at.unix_timestamp(), 0)
            .single()
            .and_then(|local| UtcOffset::from_whole_seconds(local.offset().local_minus_utc()).ok())
            .unwrap_or(UtcOffset::UTC)
    }

    fn offset_on(&self, local: PrimitiveDateTime) -> UtcOffset {
        let Some(naive) = to_naive(local) else {
            return UtcOffset::UTC;
        };

        match Local.from_local_datetime(&naive).earliest() {
            Some(resolved) => UtcOffset::from_whole_seconds(resolved.offset().local_minus_utc())
                .unwrap_or(UtcOffset::UTC),
            // Inside a forward transition: keep the offset from before it,
            // which moves the time past the gap.
            None => self.offset_at(local.assume_utc() - Duration::days(1)),
        }
    }
}

fn to_naive(local: PrimitiveDateTime) -> Option<chrono::NaiveDateTime> {
    chrono::NaiveDate::from_ymd_opt(local.year(), local.month() as u32, local.day() as u32)?
        .and_hms_opt(
            local.hour() as u32,
            local.minute() as u32,
            local.second() as u32,
        )
}

/// A clock that only moves when told to.
///
/// Without a zone rule every instant uses the offset of `now`.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<OffsetDateTime>,
    zone: Option<fn(Date) -> UtcOffset>,
}

impl FixedClock {
    pub fn new(now: OffsetDateTime) -> Self {
        Self {
            now: Mutex::new(now),
            zone: None,
        }
    }

    /// Picks the offset by calendar date, like a zone with daylight saving.
    pub fn with_zone(mut self, zone: fn(Date) -> UtcOffset) -> Self {
        self.zone = Some(zone);
        self
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock poisoned");
        *now += by;
    }

    pub fn set(&self, to: OffsetDateTime) {
        *self.now.lock().expect("clock lock poisoned") = to;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        let now = *self.now.lock().expect("clock lock poisoned");
        match self.zone {
            Some(zone) => now.to_offset(zone(now.date())),
            None => now,
        }
    }

    fn offset_at(&self, at: OffsetDateTime) -> UtcOffset {
        match self.zone {
            Some(zone) => zone(at.date()),
            None => self.offset(),
        }
    }

    fn offset_on(&self, local: PrimitiveDateTime) -> UtcOffset {
        match self.zone {
            Some(zone) => zone(local.date()),
            None => self.offset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime, offset};

    /// Central European rules, simplified to whole months.
    fn cet(date: Date) -> UtcOffset {
        if (4..=9).contains(&(date.month() as u8)) {
            offset!(+2)
        } else {
            offset!(+1)
        }
    }

    #[test]
    fn fixed_clock_advances() {
        let clock = FixedClock::new(datetime!(2023-05-15 23:59 +2));
        assert_eq!(clock.today(), date!(2023 - 05 - 15));
        assert_eq!(clock.offset(), offset!(+2));

        clock.advance(Duration::minutes(2));
        assert_eq!(clock.today(), date!(2023 - 05 - 16));
    }

    #[test]
    fn zone_offset_follows_the_instant() {
        let clock = FixedClock::new(datetime!(2024-01-10 12:00 +1)).with_zone(cet);

        assert_eq!(clock.offset(), offset!(+1));
        assert_eq!(
            clock.to_local(datetime!(2023-07-03 07:00 UTC)),
            datetime!(2023-07-03 09:00 +2)
        );
        assert_eq!(
            clock.assume_local(datetime!(2023-07-03 09:00)),
            datetime!(2023-07-03 09:00 +2)
        );
    }

    #[test]
    fn system_clock_agrees_with_itself() {
        let clock = SystemClock::new();
        let now = clock.now();
        assert_eq!(now.offset(), clock.offset_at(now));

        // Mid-January is clear of any daylight saving transition.
        let at = datetime!(2023-01-15 12:00 UTC);
        let local = clock.to_local(at);
        let wall = PrimitiveDateTime::new(local.date(), local.time());
        assert_eq!(clock.assume_local(wall), at);
    }
}
