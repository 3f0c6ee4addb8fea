//! Remaining-time clock formatting

use std::time::Duration;

use chrono::{NaiveTime, TimeDelta};

/// Format a remaining time as `HH:MM:SS.SS`.
///
/// The value is laid out as a time of day counted from midnight UTC, so it
/// wraps after 24 hours. Hundredths are truncated, not rounded.
pub fn format_clock(remaining: Duration) -> String {
    let midnight = NaiveTime::default();
    let offset = TimeDelta::from_std(remaining).unwrap_or(TimeDelta::zero());
    let (time, _) = midnight.overflowing_add_signed(offset);
    let hundredths = remaining.subsec_millis() / 10;
    format!("{}.{:02}", time.format("%H:%M:%S"), hundredths)
}
