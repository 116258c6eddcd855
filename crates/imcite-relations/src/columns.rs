//! Canonical column names for the relation tables
//!
//! Engines request columns by these names and schema errors report them, so
//! callers see the same vocabulary on the way in and on the way out.

pub const CITING_PUBLICATION_ID: &str = "CitingPublicationId";
pub const CITED_PUBLICATION_ID: &str = "CitedPublicationId";
pub const CITING_YEAR: &str = "CitingYear";
pub const CITED_YEAR: &str = "CitedYear";
pub const PUBLICATION_ID: &str = "PublicationId";
pub const AUTHOR_ID: &str = "AuthorId";
pub const AUTHOR_SEQUENCE: &str = "AuthorSequence";
pub const FIELD_ID: &str = "FieldId";
pub const FIELD_WEIGHT: &str = "FieldWeight";
pub const YEAR: &str = "Year";
pub const JOURNAL_ID: &str = "JournalId";

use crate::error::{RelationError, RelationResult};

/// Check `requested` against the columns actually present, collecting every
/// absent name into a single `MissingColumns` error.
pub(crate) fn require(
    table: &str,
    present: &[&'static str],
    requested: &[&str],
) -> RelationResult<()> {
    let missing: Vec<String> = requested
        .iter()
        .filter(|&&name| !present.iter().any(|&p| p == name))
        .map(|name| name.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(RelationError::MissingColumns {
            table: table.to_string(),
            columns: missing,
        })
    }
}
