use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::core::types::FieldValue;

const NAIVE_DATETIME_LAYOUTS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
];

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Converts fractional epoch seconds back to a UTC datetime.
#[must_use]
pub fn unix_seconds_to_datetime(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis((seconds * 1000.0).round() as i64)
}

/// Parses a time text into a UTC datetime.
///
/// Accepts RFC 3339, naive `YYYY-MM-DD HH:MM:SS[.fff]` (read as UTC) and bare
/// `YYYY-MM-DD` dates (midnight UTC).
#[must_use]
pub fn parse_time_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    for layout in NAIVE_DATETIME_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, layout) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Resolves a time field to epoch milliseconds.
///
/// Numbers are taken as epoch milliseconds already.
#[must_use]
pub fn field_to_epoch_millis(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Number(millis) if millis.is_finite() => Some(*millis),
        FieldValue::Text(text) => parse_time_text(text).map(datetime_to_unix_millis),
        FieldValue::Time(time) => Some(datetime_to_unix_millis(*time)),
        _ => None,
    }
}
