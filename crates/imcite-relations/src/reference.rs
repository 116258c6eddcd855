//! Citation edges between publications

use serde::{Deserialize, Serialize};

use crate::columns;
use crate::error::{RelationError, RelationResult};
use crate::id::{Id, Year};

const TABLE: &str = "references";

/// Directed citation edges: each row records one citing publication referring
/// to one cited publication.
///
/// The year columns are optional and attached wholesale with
/// [`with_citing_years`](Self::with_citing_years) /
/// [`with_cited_years`](Self::with_cited_years); temporal engines require the
/// relevant column up front via [`require_columns`](Self::require_columns).
/// Duplicate rows are kept as stored; engines that need distinct-edge
/// semantics deduplicate themselves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceTable {
    citing: Vec<Id>,
    cited: Vec<Id>,
    citing_year: Option<Vec<Year>>,
    cited_year: Option<Vec<Year>>,
}

impl ReferenceTable {
    /// Create an empty table without year columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a citation edge.
    pub fn push(&mut self, citing: impl Into<Id>, cited: impl Into<Id>) {
        self.citing.push(citing.into());
        self.cited.push(cited.into());
    }

    /// Attach the citing-side year column, one value per edge.
    pub fn with_citing_years(mut self, years: Vec<Year>) -> RelationResult<Self> {
        if years.len() != self.citing.len() {
            return Err(RelationError::ColumnLength {
                table: TABLE.to_string(),
                column: columns::CITING_YEAR.to_string(),
                expected: self.citing.len(),
                actual: years.len(),
            });
        }
        self.citing_year = Some(years);
        Ok(self)
    }

    /// Attach the cited-side year column, one value per edge.
    pub fn with_cited_years(mut self, years: Vec<Year>) -> RelationResult<Self> {
        if years.len() != self.citing.len() {
            return Err(RelationError::ColumnLength {
                table: TABLE.to_string(),
                column: columns::CITED_YEAR.to_string(),
                expected: self.citing.len(),
                actual: years.len(),
            });
        }
        self.cited_year = Some(years);
        Ok(self)
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.citing.len()
    }

    /// Whether the table has no edges.
    pub fn is_empty(&self) -> bool {
        self.citing.is_empty()
    }

    /// Citing publication ids, one per edge.
    pub fn citing(&self) -> &[Id] {
        &self.citing
    }

    /// Cited publication ids, one per edge.
    pub fn cited(&self) -> &[Id] {
        &self.cited
    }

    /// Citing-side years, if attached.
    pub fn citing_years(&self) -> Option<&[Year]> {
        self.citing_year.as_deref()
    }

    /// Cited-side years, if attached.
    pub fn cited_years(&self) -> Option<&[Year]> {
        self.cited_year.as_deref()
    }

    /// Iterate (citing, cited) pairs in row order.
    pub fn edges(&self) -> impl Iterator<Item = (&Id, &Id)> {
        self.citing.iter().zip(self.cited.iter())
    }

    /// Columns present in this table.
    pub fn columns(&self) -> Vec<&'static str> {
        let mut present = vec![columns::CITING_PUBLICATION_ID, columns::CITED_PUBLICATION_ID];
        if self.citing_year.is_some() {
            present.push(columns::CITING_YEAR);
        }
        if self.cited_year.is_some() {
            present.push(columns::CITED_YEAR);
        }
        present
    }

    /// Fail with one error naming every requested column that is absent.
    pub fn require_columns(&self, requested: &[&str]) -> RelationResult<()> {
        columns::require(TABLE, &self.columns(), requested)
    }
}
