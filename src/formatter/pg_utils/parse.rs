//! Parsers for the server's text output format
//!
//! Values arrive exactly as the server prints them with `DateStyle` set to
//! `ISO`. Only the pieces that need structure are parsed here: times and
//! zone offsets, and array literals.

use std::error::Error;
use std::iter::Peekable;
use std::str::Chars;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

type BoxError = Box<dyn Error + Sync + Send>;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";

/// The time of day `24:00:00`, which the server accepts but chrono cannot hold
pub const END_OF_DAY: &str = "24:00:00";

/// A time-of-day as printed by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Time(NaiveTime),
    EndOfDay,
}

/// `Some(negative)` for the `infinity` / `-infinity` date and timestamp forms
pub fn infinity(text: &str) -> Option<bool> {
    match text {
        "infinity" => Some(false),
        "-infinity" => Some(true),
        _ => None,
    }
}

pub fn date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

/// `HH:MM:SS[.f]`, including `24:00:00`
pub fn time(text: &str) -> Option<TimeOfDay> {
    if let Some(fraction) = text.strip_prefix(END_OF_DAY) {
        let zero_fraction = fraction.is_empty()
            || fraction
                .strip_prefix('.')
                .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b == b'0'));
        return zero_fraction.then_some(TimeOfDay::EndOfDay);
    }
    NaiveTime::parse_from_str(text, TIME_FORMAT)
        .ok()
        .map(TimeOfDay::Time)
}

/// `HH:MM:SS[.f]±HH[:MM[:SS]]`
pub fn timetz(text: &str) -> Option<(TimeOfDay, FixedOffset)> {
    let (time_text, offset_text) = split_offset(text)?;
    Some((time(time_text)?, offset(offset_text)?))
}

pub fn timestamp(text: &str) -> Option<NaiveDateTime> {
    let (date_text, time_text) = text.split_once(' ')?;
    let date = date(date_text)?;
    match time(time_text)? {
        TimeOfDay::Time(time) => Some(date.and_time(time)),
        TimeOfDay::EndOfDay => None,
    }
}

/// A timestamp in the session time zone, `YYYY-MM-DD HH:MM:SS[.f]±HH[:MM[:SS]]`
pub fn timestamptz(text: &str) -> Option<DateTime<FixedOffset>> {
    let (date_text, rest) = text.split_once(' ')?;
    let (time_text, offset_text) = split_offset(rest)?;
    let local = timestamp(&format!("{date_text} {time_text}"))?;
    local.and_local_timezone(offset(offset_text)?).single()
}

fn split_offset(text: &str) -> Option<(&str, &str)> {
    let idx = text.find(['+', '-'])?;
    Some(text.split_at(idx))
}

/// Zone offset as the server prints it: `+03`, `+05:30`, `-00:44:30`
pub fn offset(text: &str) -> Option<FixedOffset> {
    let (sign, digits) = match text.split_at_checked(1)? {
        ("+", digits) => (1, digits),
        ("-", digits) => (-1, digits),
        _ => return None,
    };

    let mut seconds = 0;
    let mut parts = 0;
    for (part, scale) in digits.split(':').zip([3600, 60, 1]) {
        if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        seconds += part.parse::<i32>().ok()? * scale;
        parts += 1;
    }
    if parts == 0 || digits.split(':').count() != parts {
        return None;
    }

    FixedOffset::east_opt(sign * seconds)
}

/// One element of a parsed array literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayLiteral {
    Null,
    Element(String),
    Array(Vec<ArrayLiteral>),
}

/// Parse an array literal such as `{1,NULL,"a b"}` or `[0:1]={{1},{2}}`
///
/// Nested braces become nested arrays. `delimiter` is `,` for every
/// built-in element type except `box`.
pub fn array(text: &str, delimiter: char) -> Result<Vec<ArrayLiteral>, BoxError> {
    // Non-default lower bounds are printed as a `[l:u]=` prefix
    let body = if text.starts_with('[') {
        text.split_once('=')
            .map(|(_, body)| body)
            .ok_or("malformed array bounds")?
    } else {
        text
    };

    let mut parser = ArrayParser {
        chars: body.chars().peekable(),
        delimiter,
    };
    let items = parser.array()?;
    if parser.chars.next().is_some() {
        return Err("junk after closing right brace".into());
    }
    Ok(items)
}

struct ArrayParser<'a> {
    chars: Peekable<Chars<'a>>,
    delimiter: char,
}

impl ArrayParser<'_> {
    fn array(&mut self) -> Result<Vec<ArrayLiteral>, BoxError> {
        if self.chars.next() != Some('{') {
            return Err("array value must start with \"{\"".into());
        }

        let mut items = Vec::new();
        if self.chars.next_if_eq(&'}').is_some() {
            return Ok(items);
        }

        loop {
            items.push(self.item()?);
            match self.chars.next() {
                Some('}') => return Ok(items),
                Some(c) if c == self.delimiter => {}
                _ => return Err("malformed array literal".into()),
            }
        }
    }

    fn item(&mut self) -> Result<ArrayLiteral, BoxError> {
        match self.chars.peek() {
            Some('{') => Ok(ArrayLiteral::Array(self.array()?)),
            Some('"') => {
                self.chars.next();
                let mut value = String::new();
                loop {
                    match self.chars.next() {
                        Some('"') => return Ok(ArrayLiteral::Element(value)),
                        Some('\\') => value.push(self.chars.next().ok_or("unexpected end of array")?),
                        Some(c) => value.push(c),
                        None => return Err("unexpected end of array".into()),
                    }
                }
            }
            _ => {
                let mut value = String::new();
                while let Some(&c) = self.chars.peek() {
                    if c == self.delimiter || c == '}' {
                        break;
                    }
                    value.push(c);
                    self.chars.next();
                }
                if value.is_empty() {
                    Err("malformed array literal".into())
                } else if value.eq_ignore_ascii_case("NULL") {
                    Ok(ArrayLiteral::Null)
                } else {
                    Ok(ArrayLiteral::Element(value))
                }
            }
        }
    }
}
