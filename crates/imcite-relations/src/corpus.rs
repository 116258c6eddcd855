//! The corpus context passed into every engine call

use serde::{Deserialize, Serialize};

use crate::authorship::AuthorshipTable;
use crate::error::{RelationError, RelationResult};
use crate::fields::FieldTable;
use crate::publications::PublicationTable;
use crate::reference::ReferenceTable;

/// An immutable snapshot of the relation tables one computation runs against.
///
/// Engines take a `&CitationCorpus` explicitly; there is no ambient store.
/// Only the tables an engine actually reads need to be attached, and asking
/// for an absent one fails fast with [`RelationError::MissingTable`] before
/// any computation starts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CitationCorpus {
    references: Option<ReferenceTable>,
    authorships: Option<AuthorshipTable>,
    fields: Option<FieldTable>,
    publications: Option<PublicationTable>,
}

impl CitationCorpus {
    /// Create an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach citation edges.
    pub fn with_references(mut self, table: ReferenceTable) -> Self {
        self.references = Some(table);
        self
    }

    /// Attach author assignments.
    pub fn with_authorships(mut self, table: AuthorshipTable) -> Self {
        self.authorships = Some(table);
        self
    }

    /// Attach field assignments.
    pub fn with_fields(mut self, table: FieldTable) -> Self {
        self.fields = Some(table);
        self
    }

    /// Attach publication attributes.
    pub fn with_publications(mut self, table: PublicationTable) -> Self {
        self.publications = Some(table);
        self
    }

    /// The citation edges, or `MissingTable`.
    pub fn references(&self) -> RelationResult<&ReferenceTable> {
        self.references
            .as_ref()
            .ok_or(RelationError::MissingTable("references"))
    }

    /// The author assignments, or `MissingTable`.
    pub fn authorships(&self) -> RelationResult<&AuthorshipTable> {
        self.authorships
            .as_ref()
            .ok_or(RelationError::MissingTable("authorships"))
    }

    /// The field assignments, or `MissingTable`.
    pub fn fields(&self) -> RelationResult<&FieldTable> {
        self.fields
            .as_ref()
            .ok_or(RelationError::MissingTable("fields"))
    }

    /// The publication attributes, or `MissingTable`.
    pub fn publications(&self) -> RelationResult<&PublicationTable> {
        self.publications
            .as_ref()
            .ok_or(RelationError::MissingTable("publications"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_table_fails_fast() {
        let corpus = CitationCorpus::new();
        let err = corpus.references().unwrap_err();
        assert_eq!(err, RelationError::MissingTable("references"));
    }

    #[test]
    fn test_attached_table_is_returned() {
        let mut refs = ReferenceTable::new();
        refs.push(1i64, 2i64);
        let corpus = CitationCorpus::new().with_references(refs);
        assert_eq!(corpus.references().unwrap().len(), 1);
        assert!(corpus.authorships().is_err());
    }
}
