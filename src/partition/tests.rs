//! Tests for day-window partitioning

use super::*;
use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use test_case::test_case;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// DayWindow Tests
// ============================================================================

#[test]
fn test_day_window_bounds() {
    let window = DayWindow::new(date(2020, 1, 1));

    assert_eq!(window.since(), 1_577_836_800);
    assert_eq!(window.until(), 1_577_836_800 + SECONDS_PER_DAY);
    assert_eq!(window.start(), Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
    assert_eq!(window.end(), Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap());
    assert_eq!(window.to_string(), "2020-01-01");
}

// ============================================================================
// DayWindows Tests
// ============================================================================

#[test]
fn test_three_day_range() {
    let now = Utc.with_ymd_and_hms(2020, 1, 3, 10, 0, 0).unwrap();
    let windows: Vec<DayWindow> = DayWindows::between(date(2020, 1, 1), now).collect();

    assert_eq!(
        windows,
        vec![
            DayWindow::new(date(2020, 1, 1)),
            DayWindow::new(date(2020, 1, 2)),
            DayWindow::new(date(2020, 1, 3)),
        ]
    );
    assert_eq!(windows[0].since(), 1_577_836_800);
    assert_eq!(windows[2].until(), 1_578_096_000);
}

#[test_case(date(2020, 1, 1), date(2020, 1, 1) ; "same day")]
#[test_case(date(2020, 1, 1), date(2020, 1, 31) ; "one month")]
#[test_case(date(2020, 2, 20), date(2020, 3, 5) ; "across leap day")]
#[test_case(date(2019, 12, 30), date(2021, 1, 2) ; "across years")]
fn test_windows_are_contiguous_and_complete(start: NaiveDate, today: NaiveDate) {
    let now = Utc.from_utc_datetime(&today.and_hms_opt(23, 59, 59).unwrap());
    let iter = DayWindows::between(start, now);
    let expected_len = usize::try_from((today - start).num_days() + 1).unwrap();

    assert_eq!(iter.len(), expected_len);

    let windows: Vec<DayWindow> = iter.collect();
    assert_eq!(windows.len(), expected_len);
    assert_eq!(windows.first().unwrap().day(), start);
    assert_eq!(windows.last().unwrap().day(), today);

    for window in &windows {
        assert_eq!(window.until() - window.since(), SECONDS_PER_DAY);
    }
    for pair in windows.windows(2) {
        assert!(pair[0] < pair[1]);
        assert_eq!(pair[0].until(), pair[1].since());
    }
}

#[test]
fn test_today_included_at_midnight() {
    let now = Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap();
    let days: Vec<NaiveDate> = DayWindows::between(date(2020, 1, 1), now)
        .map(|w| w.day())
        .collect();

    assert_eq!(days, vec![date(2020, 1, 1), date(2020, 1, 2)]);
}

#[test]
fn test_start_after_today_is_empty() {
    let now = Utc.with_ymd_and_hms(2020, 1, 3, 10, 0, 0).unwrap();
    let mut windows = DayWindows::between(date(2020, 2, 1), now);

    assert_eq!(windows.len(), 0);
    assert!(windows.next().is_none());
}

#[test]
fn test_exhausted_iterator_stays_empty() {
    let now = Utc.with_ymd_and_hms(2020, 1, 1, 10, 0, 0).unwrap();
    let mut windows = DayWindows::between(date(2020, 1, 1), now);

    assert!(windows.next().is_some());
    assert!(windows.next().is_none());
    assert!(windows.next().is_none());
    assert_eq!(windows.len(), 0);
}

// ============================================================================
// Start Date Parsing Tests
// ============================================================================

#[test_case("2020-01-01" ; "iso date")]
#[test_case(" 2020-01-01 " ; "padded")]
#[test_case("2020/01/01" ; "slashes")]
#[test_case("2020-01-01T00:00:00Z" ; "rfc3339 utc")]
#[test_case("2020-01-01T08:30:00+02:00" ; "rfc3339 offset")]
#[test_case("2020-01-01T12:00:00" ; "naive datetime")]
#[test_case("2020-01-01 12:00:00" ; "naive datetime with space")]
fn test_parse_start_date(input: &str) {
    assert_eq!(parse_start_date(input).unwrap(), date(2020, 1, 1));
}

#[test]
fn test_parse_start_date_offset_crosses_midnight() {
    assert_eq!(
        parse_start_date("2020-01-02T01:00:00+02:00").unwrap(),
        date(2020, 1, 1)
    );
}

#[test_case("" ; "empty")]
#[test_case("yesterday" ; "word")]
#[test_case("2020-13-01" ; "bad month")]
#[test_case("01-01-2020" ; "day first")]
fn test_parse_start_date_rejects(input: &str) {
    let err = parse_start_date(input).unwrap_err();
    assert!(err.is_configuration());
}
