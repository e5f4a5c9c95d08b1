//! Day-window partitioning
//!
//! The intervention report is fetched one calendar day at a time.
//!
//! # Overview
//!
//! - `DayWindow` - a half-open `[00:00, 00:00 + 1 day)` UTC range
//! - `DayWindows` - every window from a start date through the day containing "now"
//! - `parse_start_date` - accepts the date formats the config allows

mod window;

pub use window::{parse_start_date, DayWindow, DayWindows, SECONDS_PER_DAY};

#[cfg(test)]
mod tests;
