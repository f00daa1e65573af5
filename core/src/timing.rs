//! Day arithmetic, rounding and display helpers shared by the accumulator
//! and the monthly tracker.

use crate::types::{MonthLabel, MILLIS_PER_DAY};
use chrono::{DateTime, Months, NaiveDate, Utc};

/// Whole days between two instants, ignoring direction. Partial days are
/// truncated.
pub fn whole_days_between(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    (a - b).num_days().abs()
}

/// Milliseconds from `from` to `to`.
pub fn millis_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_milliseconds()
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `count / total` as a percentage string with at most one decimal,
/// e.g. `30%` or `33.3%`.
pub fn format_percentage(count: usize, total: usize) -> String {
    if total == 0 {
        return format_percent_value(0.0);
    }
    format_percent_value(count as f64 / total as f64 * 100.0)
}

/// Round to one decimal and drop the decimal point for whole numbers.
pub fn format_percent_value(percent: f64) -> String {
    let rounded = round1(percent);
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}%")
    } else {
        format!("{rounded:.1}%")
    }
}

/// Average of `total_ms` over `count` entries, in whole days.
/// `None` when nothing contributed.
pub fn average_days(total_ms: i64, count: usize) -> Option<i64> {
    if count == 0 {
        return None;
    }
    let average_ms = total_ms as f64 / count as f64;
    Some((average_ms / MILLIS_PER_DAY as f64).abs().round() as i64)
}

pub fn format_days(days: i64) -> String {
    format!("{days} days")
}

pub fn month_label(date: NaiveDate) -> MonthLabel {
    date.format("%Y-%m").to_string()
}

/// The date `n` calendar months after `start`, clamped to the end of
/// shorter months (Jan 31 + 1 month = Feb 28/29).
pub fn nth_month_from(start: NaiveDate, n: u32) -> Option<NaiveDate> {
    start.checked_add_months(Months::new(n))
}
