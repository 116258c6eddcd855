//! Publication attribute records

use serde::{Deserialize, Serialize};

use crate::columns;
use crate::error::RelationResult;
use crate::id::{Id, Year};

const TABLE: &str = "publications";

/// Per-publication attributes: year and venue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublicationTable {
    publications: Vec<Id>,
    years: Vec<Year>,
    journals: Vec<Id>,
}

impl PublicationTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a publication record.
    pub fn push(&mut self, publication: impl Into<Id>, year: Year, journal: impl Into<Id>) {
        self.publications.push(publication.into());
        self.years.push(year);
        self.journals.push(journal.into());
    }

    /// Number of publications.
    pub fn len(&self) -> usize {
        self.publications.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.publications.is_empty()
    }

    /// Publication ids in row order.
    pub fn publications(&self) -> &[Id] {
        &self.publications
    }

    /// Publication years in row order.
    pub fn years(&self) -> &[Year] {
        &self.years
    }

    /// Journal ids in row order.
    pub fn journals(&self) -> &[Id] {
        &self.journals
    }

    /// Columns present in this table.
    pub fn columns(&self) -> Vec<&'static str> {
        vec![columns::PUBLICATION_ID, columns::YEAR, columns::JOURNAL_ID]
    }

    /// Fail with one error naming every requested column that is absent.
    pub fn require_columns(&self, requested: &[&str]) -> RelationResult<()> {
        columns::require(TABLE, &self.columns(), requested)
    }
}
