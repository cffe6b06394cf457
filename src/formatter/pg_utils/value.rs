//! Typed representation of a single PostgreSQL column value

use std::error::Error;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use tokio_postgres::types::{Kind, Type};
use uuid::Uuid;

use super::parse::{self, ArrayLiteral, TimeOfDay};

type BoxError = Box<dyn Error + Sync + Send>;

/// A decoded column value
///
/// Every variant has a JSON rendering; see [`super::JsonConverter`].
#[derive(Debug, Clone, PartialEq)]
pub enum PgValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Decimal text as PostgreSQL prints it, including `NaN` and `Infinity`
    Numeric(String),
    /// Character data, and the server's text form of any type without a
    /// dedicated rule (`inet`, `money`, `xml`, ranges, ...)
    Text(String),
    Json(serde_json::Value),
    Uuid(Uuid),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    TimeTz(NaiveTime, FixedOffset),
    /// `24:00:00`, optionally with a zone for `timetz`
    EndOfDay(Option<FixedOffset>),
    Timestamp(NaiveDateTime),
    /// Wall-clock time in the session time zone together with its offset
    TimestampTz(DateTime<FixedOffset>),
    /// `infinity` / `-infinity` dates and timestamps
    Infinite { negative: bool },
    /// Interval as the server prints it under the session `IntervalStyle`
    Interval(String),
    Array(Vec<PgValue>),
}

impl PgValue {
    /// Build a value from its text form
    ///
    /// `None` is SQL NULL. Types without a dedicated rule keep the server's
    /// text; date/time text in an unexpected shape (BC dates, for example)
    /// is kept verbatim as well.
    pub fn from_text(ty: &Type, text: Option<&str>) -> Result<Self, BoxError> {
        match text {
            None => Ok(PgValue::Null),
            Some(text) => Self::parse(ty, text),
        }
    }

    fn parse(ty: &Type, text: &str) -> Result<Self, BoxError> {
        let value = match *ty {
            Type::BOOL => match text {
                "t" => PgValue::Bool(true),
                "f" => PgValue::Bool(false),
                other => return Err(format!("invalid boolean \"{other}\"").into()),
            },
            Type::INT2 | Type::INT4 | Type::INT8 | Type::OID => PgValue::Int(text.parse()?),
            Type::FLOAT4 | Type::FLOAT8 => PgValue::Float(parse_float(text)?),
            Type::NUMERIC => PgValue::Numeric(text.to_string()),
            Type::JSON | Type::JSONB => PgValue::Json(serde_json::from_str(text)?),
            Type::UUID => PgValue::Uuid(Uuid::parse_str(text)?),
            Type::BYTEA => text
                .strip_prefix("\\x")
                .and_then(|digits| hex::decode(digits).ok())
                .map_or_else(|| PgValue::Text(text.to_string()), PgValue::Bytes),
            Type::DATE => temporal(text, |t| parse::date(t).map(PgValue::Date)),
            Type::TIME => temporal(text, |t| {
                parse::time(t).map(|time| match time {
                    TimeOfDay::Time(time) => PgValue::Time(time),
                    TimeOfDay::EndOfDay => PgValue::EndOfDay(None),
                })
            }),
            Type::TIMETZ => temporal(text, |t| {
                parse::timetz(t).map(|(time, offset)| match time {
                    TimeOfDay::Time(time) => PgValue::TimeTz(time, offset),
                    TimeOfDay::EndOfDay => PgValue::EndOfDay(Some(offset)),
                })
            }),
            Type::TIMESTAMP => temporal(text, |t| parse::timestamp(t).map(PgValue::Timestamp)),
            Type::TIMESTAMPTZ => {
                temporal(text, |t| parse::timestamptz(t).map(PgValue::TimestampTz))
            }
            Type::INTERVAL => PgValue::Interval(text.to_string()),
            _ => match ty.kind() {
                Kind::Array(member) => {
                    let delimiter = if *member == Type::BOX { ';' } else { ',' };
                    PgValue::Array(array_values(member, parse::array(text, delimiter)?)?)
                }
                Kind::Domain(base) => Self::parse(base, text)?,
                _ => PgValue::Text(text.to_string()),
            },
        };
        Ok(value)
    }
}

fn parse_float(text: &str) -> Result<f64, BoxError> {
    match text {
        "NaN" => Ok(f64::NAN),
        "Infinity" => Ok(f64::INFINITY),
        "-Infinity" => Ok(f64::NEG_INFINITY),
        _ => Ok(text.parse()?),
    }
}

fn temporal(text: &str, build: impl FnOnce(&str) -> Option<PgValue>) -> PgValue {
    if let Some(negative) = parse::infinity(text) {
        return PgValue::Infinite { negative };
    }
    build(text).unwrap_or_else(|| PgValue::Text(text.to_string()))
}

fn array_values(member: &Type, items: Vec<ArrayLiteral>) -> Result<Vec<PgValue>, BoxError> {
    items
        .into_iter()
        .map(|item| match item {
            ArrayLiteral::Null => Ok(PgValue::Null),
            ArrayLiteral::Element(text) => PgValue::parse(member, &text),
            ArrayLiteral::Array(nested) => Ok(PgValue::Array(array_values(member, nested)?)),
        })
        .collect()
}
