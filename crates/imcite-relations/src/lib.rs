//! imcite-relations - Typed relation tables for citation-network analytics
//!
//! The data-interchange boundary of the imcite crates. Upstream ingestion
//! (parsing, harvesting, disambiguation) is someone else's job; this crate
//! models the normalized tables those collaborators hand over:
//!
//! - **ReferenceTable**: directed citation edges, optionally dated
//! - **AuthorshipTable**: publication-to-author assignments
//! - **FieldTable**: publication-to-field assignments, optionally weighted
//! - **PublicationTable**: per-publication year and venue attributes
//!
//! Tables validate their schema up front: [`require_columns`] failures name
//! every absent column in one error. The [`CitationCorpus`] bundles the
//! tables a computation runs against, and [`IndexMap`] provides the
//! deterministic id-to-matrix-index compaction every derived structure is
//! built on.
//!
//! [`require_columns`]: ReferenceTable::require_columns

pub mod authorship;
pub mod columns;
pub mod corpus;
pub mod error;
pub mod fields;
pub mod id;
pub mod index;
pub mod publications;
pub mod reference;

pub use authorship::AuthorshipTable;
pub use corpus::CitationCorpus;
pub use error::{RelationError, RelationResult};
pub use fields::FieldTable;
pub use id::{Id, Year};
pub use index::IndexMap;
pub use publications::PublicationTable;
pub use reference::ReferenceTable;
