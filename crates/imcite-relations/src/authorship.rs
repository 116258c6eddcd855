//! Author assignments for publications

use serde::{Deserialize, Serialize};

use crate::columns;
use crate::error::{RelationError, RelationResult};
use crate::id::Id;

const TABLE: &str = "authorships";

/// Publication-to-author assignments, one row per (publication, author).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorshipTable {
    publications: Vec<Id>,
    authors: Vec<Id>,
    sequence: Option<Vec<u32>>,
}

impl AuthorshipTable {
    /// Create an empty table without the sequence column.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an author assignment.
    pub fn push(&mut self, publication: impl Into<Id>, author: impl Into<Id>) {
        self.publications.push(publication.into());
        self.authors.push(author.into());
    }

    /// Attach byline positions, one value per assignment.
    pub fn with_sequence(mut self, sequence: Vec<u32>) -> RelationResult<Self> {
        if sequence.len() != self.publications.len() {
            return Err(RelationError::ColumnLength {
                table: TABLE.to_string(),
                column: columns::AUTHOR_SEQUENCE.to_string(),
                expected: self.publications.len(),
                actual: sequence.len(),
            });
        }
        self.sequence = Some(sequence);
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

    /// Iterate (publication, author) pairs in row order.
    pub fn assignments(&self) -> impl Iterator<Item = (&Id, &Id)> {
        self.publications.iter().zip(self.authors.iter())
    }

    /// Byline positions, if attached.
    pub fn sequence(&self) -> Option<&[u32]> {
        self.sequence.as_deref()
    }

    /// The authors assigned to one publication, in row order, duplicates kept.
    pub fn authors_of<'a>(&'a self, publication: &'a Id) -> impl Iterator<Item = &'a Id> {
        self.assignments()
            .filter(move |(p, _)| *p == publication)
            .map(|(_, a)| a)
    }

    /// Columns present in this table.
    pub fn columns(&self) -> Vec<&'static str> {
        let mut present = vec![columns::PUBLICATION_ID, columns::AUTHOR_ID];
        if self.sequence.is_some() {
            present.push(columns::AUTHOR_SEQUENCE);
        }
        present
    }

    /// Fail with one error naming every requested column that is absent.
    pub fn require_columns(&self, requested: &[&str]) -> RelationResult<()> {
        columns::require(TABLE, &self.columns(), requested)
    }
}
