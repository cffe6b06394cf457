//! Conversion of decoded PostgreSQL values to JSON

use serde_json::{Map, Value as JsonValue};

use super::PgValue;
use super::helpers::*;

/// Converts [`PgValue`]s to JSON
///
/// Values with a native JSON form map onto it directly. Date/time values,
/// which JSON has no type for, are rendered as their human-readable string
/// form; the remaining non-native types (uuid, bytea, large numerics, and
/// anything kept as server text) become strings as well.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonConverter;

impl JsonConverter {
    pub fn new() -> Self {
        Self
    }

    /// Convert a single value
    pub fn convert(&self, value: &PgValue) -> JsonValue {
        match value {
            PgValue::Null => JsonValue::Null,
            PgValue::Bool(b) => JsonValue::Bool(*b),
            PgValue::Int(n) => JsonValue::Number((*n).into()),
            PgValue::Float(f) => float_to_json(*f),
            PgValue::Numeric(text) => numeric_to_json(text),
            PgValue::Text(s) => JsonValue::String(s.clone()),
            PgValue::Json(v) => v.clone(),
            PgValue::Uuid(u) => JsonValue::String(u.hyphenated().to_string()),
            PgValue::Bytes(b) => JsonValue::String(bytes_to_hex(b)),
            PgValue::Array(items) => JsonValue::Array(items.iter().map(|v| self.convert(v)).collect()),
            temporal => JsonValue::String(self.convert_datetime(temporal)),
        }
    }

    /// String form of a date/time value
    ///
    /// Non-temporal values fall back to their JSON text.
    pub fn convert_datetime(&self, value: &PgValue) -> String {
        match value {
            PgValue::Date(d) => date_to_string(d),
            PgValue::Time(t) => time_to_string(t),
            PgValue::TimeTz(t, offset) => timetz_to_string(t, offset),
            PgValue::Timestamp(ts) => timestamp_to_string(ts),
            PgValue::TimestampTz(ts) => timestamptz_to_string(ts),
            PgValue::EndOfDay(offset) => end_of_day_to_string(offset.as_ref()),
            PgValue::Infinite { negative: false } => "infinity".to_string(),
            PgValue::Infinite { negative: true } => "-infinity".to_string(),
            PgValue::Interval(text) => text.clone(),
            other => self.convert(other).to_string(),
        }
    }

    /// Build one JSON object from parallel column names and values
    ///
    /// Objects keep column order. A repeated column name keeps the
    /// position of its first occurrence and the value of its last.
    pub fn convert_row(&self, columns: &[String], values: &[PgValue]) -> Map<String, JsonValue> {
        let mut object = Map::with_capacity(columns.len());
        for (name, value) in columns.iter().zip(values) {
            object.insert(name.clone(), self.convert(value));
        }
        object
    }
}
