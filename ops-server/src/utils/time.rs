//! Time helpers — business timezone conversion
//!
//! All civil-date → timestamp conversion happens at the API/aggregation
//! layer; repositories only receive `i64` Unix millis. Analytics period
//! boundaries are computed in the configured business timezone and converted
//! to UTC millis before querying — getting this wrong shifts every number by
//! the timezone offset.

use chrono::{Datelike, Duration, NaiveDate};
use chrono_tz::Tz;

use shared::{AppError, AppResult};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Date + h/m/s → Unix millis in the business timezone.
///
/// DST gap fallback: if the local time does not exist, fall back to UTC.
pub fn date_hms_to_millis(date: NaiveDate, hour: u32, min: u32, sec: u32, tz: Tz) -> i64 {
    let naive = date.and_hms_opt(hour, min, sec).unwrap();
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// Start of day (00:00:00) → Unix millis in the business timezone
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    date_hms_to_millis(date, 0, 0, 0, tz)
}

/// End of day → next day 00:00:00 Unix millis.
///
/// Callers use the `< end` (exclusive) convention.
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    date_hms_to_millis(next_day, 0, 0, 0, tz)
}

/// Current civil date in the business timezone for a given UTC millis instant
pub fn civil_date_at(now_millis: i64, tz: Tz) -> NaiveDate {
    chrono::DateTime::from_timestamp_millis(now_millis)
        .unwrap_or_else(chrono::Utc::now)
        .with_timezone(&tz)
        .date_naive()
}

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the month before the one containing `date`
pub fn prev_month_start(date: NaiveDate) -> NaiveDate {
    let first = month_start(date);
    month_start(first - Duration::days(1))
}
