//! Statement execution for pg-mock-mapping
//!
//! [`QueryExporter`] runs one caller-supplied statement inside a scoped
//! session and decodes every returned row into typed values:
//! - The statement is prepared first to learn its column types; statements
//!   without a result set are rejected before execution
//! - It then runs over the simple query protocol, so every value arrives in
//!   the server's own text form (session time zone, interval style)
//! - Rows are fetched in server order and decoded column by column
//! - The session is closed on every path before results are returned

mod result;

pub use result::ResultSet;

use std::time::Instant;

use futures::FutureExt;
use tokio_postgres::{Column, SimpleQueryMessage, SimpleQueryRow};
use tracing::{debug, trace};

use crate::config::Config;
use crate::connection::{Session, with_session};
use crate::error::{ExecutionError, PgMockError, Result};
use crate::formatter::{Formatter, PgValue};

/// Runs a query and renders its result set as JSON
pub struct QueryExporter {
    /// Effective configuration
    config: Config,

    /// Output formatter
    formatter: Formatter,
}

impl QueryExporter {
    /// Create an exporter
    ///
    /// # Arguments
    /// * `config` - Effective configuration (connection and display)
    pub fn new(config: Config) -> Self {
        let formatter = Formatter::from_config(&config.display);
        Self { config, formatter }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Execute `query` verbatim and collect its rows
    ///
    /// # Arguments
    /// * `query` - A single SQL statement
    ///
    /// # Returns
    /// * `Result<ResultSet>` - Decoded rows or the first failure
    pub async fn fetch(&self, query: &str) -> Result<ResultSet> {
        let query = query.to_string();
        with_session(&self.config.connection, move |session| {
            fetch_rows(session, query).boxed()
        })
        .await
    }

    /// Execute `query` and render the rows as one JSON document
    ///
    /// The whole document is built before returning, so a failure never
    /// leaves partial output behind.
    pub async fn export(&self, query: &str) -> Result<String> {
        let result = self.fetch(query).await?;
        self.formatter.format(&result)
    }
}

async fn fetch_rows(session: &Session, query: String) -> Result<ResultSet> {
    let started = Instant::now();
    let client = session.client();

    debug!("Executing: {}", query);
    let statement = client.prepare(&query).await?;
    let columns = statement.columns();

    if columns.is_empty() {
        return Err(ExecutionError::NoResults.into());
    }
    for column in columns {
        trace!("Column {}: {}", column.name(), column.type_());
    }

    let mut result = ResultSet {
        columns: columns.iter().map(|c| c.name().to_string()).collect(),
        rows: Vec::new(),
    };
    for message in client.simple_query(&query).await? {
        if let SimpleQueryMessage::Row(row) = message {
            result.rows.push(decode_row(&row, columns)?);
        }
    }

    debug!(
        "Fetched {} row(s) in {} ms",
        result.len(),
        started.elapsed().as_millis()
    );

    Ok(result)
}

/// Decode one text-format row using the prepared column types
fn decode_row(row: &SimpleQueryRow, columns: &[Column]) -> Result<Vec<PgValue>> {
    if row.len() != columns.len() {
        return Err(PgMockError::Generic(format!(
            "expected {} columns, the server returned {}",
            columns.len(),
            row.len()
        )));
    }

    columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let text = row.try_get(idx)?;
            PgValue::from_text(column.type_(), text).map_err(|e| {
                PgMockError::from(ExecutionError::Decode {
                    column: column.name().to_string(),
                    message: e.to_string(),
                })
            })
        })
        .collect()
}
