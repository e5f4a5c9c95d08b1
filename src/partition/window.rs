//! Calendar day windows

use crate::error::{Error, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Width of every window
pub const SECONDS_PER_DAY: i64 = 86_400;

/// One calendar day as a half-open UTC time range
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayWindow {
    day: NaiveDate,
}

impl DayWindow {
    /// Window covering `day`
    pub fn new(day: NaiveDate) -> Self {
        Self { day }
    }

    /// The calendar day
    pub fn day(&self) -> NaiveDate {
        self.day
    }

    /// Inclusive start (midnight UTC)
    pub fn start(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.day.and_time(NaiveTime::MIN), Utc)
    }

    /// Exclusive end (next midnight UTC)
    pub fn end(&self) -> DateTime<Utc> {
        self.start() + Duration::seconds(SECONDS_PER_DAY)
    }

    /// Start as epoch seconds, the `since` query value
    pub fn since(&self) -> i64 {
        self.start().timestamp()
    }

    /// End as epoch seconds, the `until` query value
    pub fn until(&self) -> i64 {
        self.since() + SECONDS_PER_DAY
    }
}

impl std::fmt::Display for DayWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.day.format("%Y-%m-%d"))
    }
}

/// Ascending day windows from a start date through the day containing `now`.
///
/// Both ends are inclusive: today is produced even though it has only
/// partially elapsed. A start date after today yields nothing.
#[derive(Debug, Clone)]
pub struct DayWindows {
    next: Option<NaiveDate>,
    last: NaiveDate,
}

impl DayWindows {
    /// Windows from `start` through the UTC day containing `now`
    pub fn between(start: NaiveDate, now: DateTime<Utc>) -> Self {
        Self {
            next: Some(start),
            last: now.date_naive(),
        }
    }

    fn remaining(&self) -> usize {
        match self.next {
            Some(next) if next <= self.last => {
                usize::try_from((self.last - next).num_days() + 1).unwrap_or(usize::MAX)
            }
            _ => 0,
        }
    }
}

impl Iterator for DayWindows {
    type Item = DayWindow;

    fn next(&mut self) -> Option<DayWindow> {
        let day = self.next.filter(|day| *day <= self.last)?;
        self.next = day.succ_opt();
        Some(DayWindow::new(day))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DayWindows {}

/// Parse the configured start date.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, naive datetimes and RFC 3339; only
/// the UTC calendar date is kept.
pub fn parse_start_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc).date_naive());
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }

    Err(Error::invalid_value(
        "start_date",
        format!("unrecognised date '{s}', expected YYYY-MM-DD"),
    ))
}
