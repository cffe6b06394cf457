//! Execution result types

use crate::formatter::PgValue;

/// Rows returned by a statement
///
/// `rows[i][j]` is the value of column `columns[j]` in the i-th row, in the
/// order the server returned them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    /// Column names in select-list order
    pub columns: Vec<String>,

    /// Decoded row values
    pub rows: Vec<Vec<PgValue>>,
}

impl ResultSet {
    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
