//! Errors for the metric engines

use imcite_network::NetworkError;
use imcite_relations::{Id, RelationError, Year};
use thiserror::Error;

/// Errors that can occur while computing bibliometric indicators
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MetricError {
    /// Relation table validation failure
    #[error(transparent)]
    Relation(#[from] RelationError),

    /// Derived network construction failure
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// A focus publication has no author assignments, so there is no author
    /// axis to allocate credit over.
    #[error("publication {0} has no author assignments")]
    NoAuthors(Id),

    /// A precomputed distance table was built for the wrong mode.
    #[error("precomputed distance table is {table}, but {requested} scoring was requested")]
    TemporalMismatch {
        table: &'static str,
        requested: &'static str,
    },

    /// A precomputed distance table names a field absent from the field
    /// assignments; it was computed over a different field universe.
    #[error("precomputed distance table names unknown field {0}")]
    UnknownField(Id),

    /// Temporal scoring needs a distance matrix for every year implied by the
    /// citation edges; zero-padding a missing year would silently skew scores.
    #[error("precomputed distance table is missing years: {}",
        .years.iter().map(|y| y.to_string()).collect::<Vec<_>>().join(", "))]
    MissingYears { years: Vec<Year> },

    /// The requested computation is deliberately not implemented.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
}

impl MetricError {
    /// A temporality mismatch between a precomputed table and the request.
    pub(crate) fn temporal_mismatch(table_temporal: bool) -> Self {
        let (table, requested) = if table_temporal {
            ("temporal", "static")
        } else {
            ("static", "temporal")
        };
        MetricError::TemporalMismatch { table, requested }
    }
}

/// Result type for metric computations
pub type MetricResult<T> = Result<T, MetricError>;
