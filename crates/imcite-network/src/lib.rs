//! imcite-network - Derived sparse citation structures
//!
//! Builds the intermediate representations the metric engines run on:
//!
//! - **CooMatrix / SymmetricMatrix**: coordinate sparse matrices with
//!   accumulate-on-insert semantics, deterministic iteration, and dense
//!   export for the final linear algebra
//! - **Bipartite builder**: (source, target, weight) rows projected onto a
//!   matrix through a pair of [`IndexMap`]s, with an accumulate-into form
//!   for memory-bounded batch processing
//! - **Co-citation builder**: symmetric networks counting distinct shared
//!   citers, in whole-graph, cited-set, and single-publication ego modes,
//!   statically or partitioned by citing year
//!
//! Everything here is ephemeral: structures are built per computation from a
//! [`ReferenceTable`] snapshot and discarded when the caller is done.
//!
//! [`IndexMap`]: imcite_relations::IndexMap
//! [`ReferenceTable`]: imcite_relations::ReferenceTable

pub mod bipartite;
pub mod cocitation;
pub mod error;
pub mod sparse;

pub use bipartite::{bipartite_accumulate, bipartite_matrix};
pub use cocitation::{
    citers_of, cocitation_network, cocitation_network_by_year, CocitationFocus, CocitationNetwork,
    TemporalCocitationNetwork,
};
pub use error::{NetworkError, NetworkResult};
pub use sparse::{CooMatrix, SymmetricMatrix};
