//! imcite-metrics - Derived bibliometric indicators
//!
//! The four metric engines of the imcite workspace, each a synchronous batch
//! computation over a [`CitationCorpus`] snapshot:
//!
//! - **Credit allocation** ([`credit`]): Shen-Barabási collective credit
//!   split among a publication's co-authors through its ego co-citation
//!   network, static or cumulative per year
//! - **Disruption index** ([`disruption`]): the CD index over grouped
//!   citation adjacency, undefined (not erroneous) for publications lacking
//!   references or citers
//! - **Field distance** ([`distance`]): field-by-field citation flow
//!   accumulated in bounded batches, reduced to pairwise distances under a
//!   configurable metric
//! - **Rao-Stirling interdisciplinarity** ([`rao`]): 0.5 * vᵀDv over
//!   normalized field memberships and a computed or caller-supplied,
//!   shape-validated distance matrix
//!
//! Novelty/conventionality scoring ([`novelty`]) is deliberately
//! unsupported and reports itself as such. Long-running engines accept an
//! optional [`progress`] callback that never affects results.
//!
//! [`CitationCorpus`]: imcite_relations::CitationCorpus

pub mod credit;
pub mod disruption;
pub mod distance;
pub mod error;
pub mod novelty;
pub mod progress;
pub mod rao;

pub use credit::{credit_share, credit_share_by_year, CreditOptions, CreditShare, TemporalCreditShare};
pub use disruption::{disruption_indices, DisruptionScore};
pub use distance::{
    field_citation_distance, field_citation_distance_by_year, CitationDirection, DistanceMetric,
    FieldDistanceOptions, FieldDistanceRecord, FieldDistanceTable,
};
pub use error::{MetricError, MetricResult};
pub use novelty::{novelty_conventionality, NoveltyScore};
pub use progress::{Progress, ProgressSink};
pub use rao::{rao_stirling, rao_stirling_by_year, RaoStirlingOptions, RaoStirlingScore};
