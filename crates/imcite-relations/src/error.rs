//! Errors for relation table validation

use thiserror::Error;

/// Errors that can occur while validating or accessing relation tables
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelationError {
    /// A table is missing required columns. Lists every absent column at
    /// once so a malformed input is diagnosed in a single pass.
    #[error("table {table} is missing required columns: {}", columns.join(", "))]
    MissingColumns { table: String, columns: Vec<String> },

    #[error("corpus has no {0} table attached")]
    MissingTable(&'static str),

    #[error("column {column} of table {table} has {actual} values, expected {expected}")]
    ColumnLength {
        table: String,
        column: String,
        expected: usize,
        actual: usize,
    },
}

/// Result type for relation operations
pub type RelationResult<T> = Result<T, RelationError>;
