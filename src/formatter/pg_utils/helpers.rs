//! Helper functions for rendering PostgreSQL values as text
//!
//! Date and time values use a space between date and time, and six
//! fractional digits only when the value has a sub-second part.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde_json::{Number, Value as JsonValue};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";
const TIME_FORMAT_FRACTION: &str = "%H:%M:%S%.6f";

fn time_format<T: Timelike>(value: &T) -> &'static str {
    if value.nanosecond() == 0 {
        TIME_FORMAT
    } else {
        TIME_FORMAT_FRACTION
    }
}

/// Format a date as `YYYY-MM-DD`
pub fn date_to_string(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Format a time as `HH:MM:SS[.ffffff]`
pub fn time_to_string(time: &NaiveTime) -> String {
    time.format(time_format(time)).to_string()
}

/// Format a time with zone as `HH:MM:SS[.ffffff]+HH:MM`
pub fn timetz_to_string(time: &NaiveTime, offset: &FixedOffset) -> String {
    format!("{}{}", time_to_string(time), offset_to_string(offset))
}

/// Format `24:00:00`, with the zone when there is one
pub fn end_of_day_to_string(offset: Option<&FixedOffset>) -> String {
    match offset {
        Some(offset) => format!("{}{}", super::parse::END_OF_DAY, offset_to_string(offset)),
        None => super::parse::END_OF_DAY.to_string(),
    }
}

/// Format a zone offset as `±HH:MM`, adding `:SS` only when nonzero
pub fn offset_to_string(offset: &FixedOffset) -> String {
    let total = offset.local_minus_utc();
    let sign = if total < 0 { '-' } else { '+' };
    let total = total.unsigned_abs();
    let (hours, minutes, seconds) = (total / 3600, total / 60 % 60, total % 60);
    if seconds == 0 {
        format!("{sign}{hours:02}:{minutes:02}")
    } else {
        format!("{sign}{hours:02}:{minutes:02}:{seconds:02}")
    }
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS[.ffffff]`
pub fn timestamp_to_string(ts: &NaiveDateTime) -> String {
    format!(
        "{} {}",
        ts.format(DATE_FORMAT),
        ts.format(time_format(ts))
    )
}

/// Format a zoned timestamp as `YYYY-MM-DD HH:MM:SS[.ffffff]±HH:MM`,
/// keeping the wall-clock time of its own zone
pub fn timestamptz_to_string(ts: &DateTime<FixedOffset>) -> String {
    format!(
        "{}{}",
        timestamp_to_string(&ts.naive_local()),
        offset_to_string(ts.offset())
    )
}

/// Format binary data the way the server prints `bytea` (hex output)
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    format!("\\x{}", hex::encode(bytes))
}

/// Convert a float to JSON; non-finite values become their SQL spelling
pub fn float_to_json(value: f64) -> JsonValue {
    match Number::from_f64(value) {
        Some(n) => JsonValue::Number(n),
        None if value.is_nan() => JsonValue::String("NaN".to_string()),
        None if value.is_sign_positive() => JsonValue::String("Infinity".to_string()),
        None => JsonValue::String("-Infinity".to_string()),
    }
}

/// Convert decimal text to a JSON number when no precision is lost,
/// otherwise keep the text
pub fn numeric_to_json(text: &str) -> JsonValue {
    if let Ok(n) = text.parse::<i64>() {
        return JsonValue::Number(n.into());
    }
    if let Ok(n) = text.parse::<u64>() {
        return JsonValue::Number(n.into());
    }

    if let Ok(value) = text.parse::<f64>() {
        if value.is_finite() && trim_decimal(&value.to_string()) == trim_decimal(text) {
            if let Some(n) = Number::from_f64(value) {
                return JsonValue::Number(n);
            }
        }
    }

    JsonValue::String(text.to_string())
}

/// Drop trailing fractional zeros (and a dangling point)
fn trim_decimal(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
