use chrono::{Datelike, Duration, NaiveDate};

use crate::analytics::models::TimePeriod;

/// Maps a date to its period key.
///
/// - daily: `YYYY-MM-DD`
/// - weekly: the Sunday that starts the week, `YYYY-MM-DD`
/// - monthly: `YYYY-MM`
///
/// Every period-based view groups by this key, so keys are comparable across
/// views. Lexicographic order of keys is chronological order.
pub fn bucket_key(date: NaiveDate, period: TimePeriod) -> String {
    match period {
        TimePeriod::Daily => date.format("%Y-%m-%d").to_string(),
        TimePeriod::Weekly => week_start(date).format("%Y-%m-%d").to_string(),
        TimePeriod::Monthly => date.format("%Y-%m").to_string(),
    }
}

/// Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}
