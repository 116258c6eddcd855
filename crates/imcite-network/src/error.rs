//! Errors for derived network construction

use imcite_relations::RelationError;
use thiserror::Error;

/// Errors that can occur while building derived sparse structures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// Two matrices were combined but their shapes disagree.
    #[error("matrix shape mismatch: expected {expected_rows}x{expected_cols}, got {actual_rows}x{actual_cols}")]
    ShapeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        actual_rows: usize,
        actual_cols: usize,
    },

    /// An index map does not match the axis length of the matrix it addresses.
    #[error("index map for the {axis} axis has {map_len} ids, matrix axis has {axis_len}")]
    AxisMismatch {
        axis: &'static str,
        map_len: usize,
        axis_len: usize,
    },

    /// Relation table validation failure
    #[error(transparent)]
    Relation(#[from] RelationError),
}

/// Result type for network operations
pub type NetworkResult<T> = Result<T, NetworkError>;
