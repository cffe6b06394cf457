//! PostgreSQL value conversion utilities
//!
//! Rows arrive from the server in text format. This module:
//! - Parses each column into a typed [`PgValue`] according to the column
//!   type reported when the statement was prepared
//! - Keeps the server's text for types without a dedicated rule
//! - Converts those values to JSON, rendering date/time values as strings

mod converter;
mod helpers;
mod parse;
mod value;

pub use converter::JsonConverter;
pub use value::PgValue;

#[cfg(test)]
mod tests;
