//! Output formatting for pg-mock-mapping
//!
//! This module turns an executed result set into the text written to stdout:
//! - Decoding of PostgreSQL column values ([`pg_utils`])
//! - JSON rendering, pretty-printed or compact ([`json`])

pub mod json;
pub mod pg_utils;

pub use json::JsonFormatter;
pub use pg_utils::{JsonConverter, PgValue};

use crate::config::DisplayConfig;
use crate::error::Result;
use crate::executor::ResultSet;

/// Main formatter for query results
pub struct Formatter {
    json: JsonFormatter,
}

impl Formatter {
    /// Create a formatter from display settings
    ///
    /// # Arguments
    /// * `config` - Display configuration
    ///
    /// # Returns
    /// * `Self` - New formatter instance
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self {
            json: JsonFormatter::new(config.pretty, config.indent, config.ascii),
        }
    }

    /// Render the result set as one JSON document
    ///
    /// The returned text has no trailing newline.
    pub fn format(&self, result: &ResultSet) -> Result<String> {
        self.json.format(result)
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::from_config(&DisplayConfig::default())
    }
}
