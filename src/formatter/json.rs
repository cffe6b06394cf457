//! JSON formatting for query results
//!
//! This module renders a result set as a JSON array of row objects:
//! - Pretty-printed output with a configurable indent, or compact output
//! - Non-ASCII characters escaped as `\uXXXX` unless raw UTF-8 is requested
//! - PostgreSQL type conversion to standard JSON types
//! - Column order preserved inside each object

use std::io;

use serde::Serialize;
use serde_json::Value as JsonValue;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};

use super::pg_utils::JsonConverter;
use crate::error::{PgMockError, Result};
use crate::executor::ResultSet;

/// JSON formatter with pretty printing support
pub struct JsonFormatter {
    /// Enable pretty printing
    pretty: bool,

    /// Indentation level
    indent: usize,

    /// Escape every non-ASCII character
    ascii: bool,

    /// Converter for PostgreSQL values to JSON
    converter: JsonConverter,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    ///
    /// # Arguments
    /// * `pretty` - Enable pretty printing
    /// * `indent` - Spaces per indentation level when pretty
    /// * `ascii` - Escape non-ASCII characters
    ///
    /// # Returns
    /// * `Self` - New formatter
    pub fn new(pretty: bool, indent: usize, ascii: bool) -> Self {
        Self {
            pretty,
            indent,
            ascii,
            converter: JsonConverter::new(),
        }
    }

    /// Format a result set as a JSON array
    ///
    /// # Arguments
    /// * `result` - Rows to format
    ///
    /// # Returns
    /// * `Result<String>` - JSON document without a trailing newline
    pub fn format(&self, result: &ResultSet) -> Result<String> {
        let rows: Vec<JsonValue> = result
            .rows
            .iter()
            .map(|row| JsonValue::Object(self.converter.convert_row(&result.columns, row)))
            .collect();

        if self.pretty {
            let indent = " ".repeat(self.indent);
            self.write(&rows, PrettyFormatter::with_indent(indent.as_bytes()))
        } else {
            self.write(&rows, CompactFormatter)
        }
    }

    /// Serialize `value` with `formatter`, escaping non-ASCII if configured
    fn write<T: Serialize, F: Formatter>(&self, value: &T, formatter: F) -> Result<String> {
        let mut buf = Vec::new();
        if self.ascii {
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, AsciiFormatter(formatter));
            value.serialize(&mut ser)?;
        } else {
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
            value.serialize(&mut ser)?;
        }
        String::from_utf8(buf).map_err(|e| PgMockError::Generic(e.to_string()))
    }
}

/// Wraps another formatter and writes non-ASCII string content as
/// lowercase `\uXXXX` escapes, using surrogate pairs above U+FFFF
struct AsciiFormatter<F>(F);

impl<F: Formatter> Formatter for AsciiFormatter<F> {
    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (idx, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..idx])?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = idx + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }

    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.0.begin_object_key(writer, first)
    }

    fn end_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_key(writer)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_value(writer)
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new(true, 4, true)
    }
}
