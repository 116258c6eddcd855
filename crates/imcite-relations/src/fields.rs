//! Field assignments for publications

use serde::{Deserialize, Serialize};

use crate::columns;
use crate::error::{RelationError, RelationResult};
use crate::id::Id;

const TABLE: &str = "fields";

/// Publication-to-field assignments, one row per (publication, field).
///
/// A publication may map to zero, one, or many fields. Fractional weights are
/// optional; when attached, each row carries the raw weight and normalization
/// is the consuming engine's choice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldTable {
    publications: Vec<Id>,
    fields: Vec<Id>,
    weights: Option<Vec<f64>>,
}

impl FieldTable {
    /// Create an empty table without the weight column.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field assignment.
    pub fn push(&mut self, publication: impl Into<Id>, field: impl Into<Id>) {
        self.publications.push(publication.into());
        self.fields.push(field.into());
    }

    /// Attach fractional weights, one value per assignment.
    pub fn with_weights(mut self, weights: Vec<f64>) -> RelationResult<Self> {
        if weights.len() != self.publications.len() {
            return Err(RelationError::ColumnLength {
                table: TABLE.to_string(),
                column: columns::FIELD_WEIGHT.to_string(),
                expected: self.publications.len(),
                actual: weights.len(),
            });
        }
        self.weights = Some(weights);
        Ok(self)
    }

    /// Number of assignments.
    pub fn len(&self) -> usize {
        self.publications.len()
    }

    /// Whether the table has no assignments.
    pub fn is_empty(&self) -> bool {
        self.publications.is_empty()
    }

    /// Publication ids, one per assignment.
    pub fn publications(&self) -> &[Id] {
        &self.publications
    }

    /// Field ids, one per assignment.
    pub fn fields(&self) -> &[Id] {
        &self.fields
    }

    /// Fractional weights, if attached.
    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    /// Iterate (publication, field) pairs in row order.
    pub fn assignments(&self) -> impl Iterator<Item = (&Id, &Id)> {
        self.publications.iter().zip(self.fields.iter())
    }

    /// Columns present in this table.
    pub fn columns(&self) -> Vec<&'static str> {
        let mut present = vec![columns::PUBLICATION_ID, columns::FIELD_ID];
        if self.weights.is_some() {
            present.push(columns::FIELD_WEIGHT);
        }
        present
    }

    /// Fail with one error naming every requested column that is absent.
    pub fn require_columns(&self, requested: &[&str]) -> RelationResult<()> {
        columns::require(TABLE, &self.columns(), requested)
    }
}
