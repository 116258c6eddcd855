//! Co-citation networks over cited publications
//!
//! Two publications are co-cited when the same citing publication refers to
//! both; the edge weight counts how many *distinct* citers do so, and the
//! diagonal carries each publication's direct citation count. Duplicate
//! (citing, cited) rows in the input collapse to presence before projection.

use std::collections::{BTreeMap, BTreeSet};

use imcite_relations::{columns, Id, IndexMap, ReferenceTable, Year};

use crate::bipartite::bipartite_matrix;
use crate::error::NetworkResult;
use crate::sparse::SymmetricMatrix;

/// Which part of the citation graph a co-citation network covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CocitationFocus {
    /// Co-citation among all cited publications appearing with any citer.
    All,
    /// Restricted to edges whose cited publication is in the given set.
    Cited(BTreeSet<Id>),
    /// Restricted to edges reachable through citers of one focus publication,
    /// bounding the network to that publication's egonet.
    Ego(Id),
}

/// A co-citation network: symmetric weights over the cited-publication axis.
#[derive(Debug, Clone)]
pub struct CocitationNetwork {
    cited: IndexMap,
    weights: SymmetricMatrix,
}

impl CocitationNetwork {
    /// The compact-index map for the cited axis.
    pub fn cited(&self) -> &IndexMap {
        &self.cited
    }

    /// The symmetric co-citation weights, addressed by compact index.
    pub fn weights(&self) -> &SymmetricMatrix {
        &self.weights
    }

    /// Whether the network has no nodes (a focus with no citers), as opposed
    /// to a populated network whose entries happen to be zero.
    pub fn is_empty(&self) -> bool {
        self.cited.is_empty()
    }

    /// Co-citation weight between two publications, if both are in the network.
    pub fn weight_between(&self, a: &Id, b: &Id) -> Option<f64> {
        let i = self.cited.index_of(a)?;
        let j = self.cited.index_of(b)?;
        Some(self.weights.get(i, j))
    }
}

/// A co-citation network partitioned by citing year.
///
/// All years share one cited-axis index map, so per-year matrices are
/// shape-aligned and rows can be compared across years directly.
#[derive(Debug, Clone)]
pub struct TemporalCocitationNetwork {
    cited: IndexMap,
    by_year: BTreeMap<Year, SymmetricMatrix>,
}

impl TemporalCocitationNetwork {
    /// The compact-index map for the cited axis, shared across years.
    pub fn cited(&self) -> &IndexMap {
        &self.cited
    }

    /// Years with at least one co-citation edge, ascending.
    pub fn years(&self) -> impl Iterator<Item = Year> + '_ {
        self.by_year.keys().copied()
    }

    /// The co-citation weights induced by citers of one year.
    pub fn for_year(&self, year: Year) -> Option<&SymmetricMatrix> {
        self.by_year.get(&year)
    }

    /// Whether the network has no nodes.
    pub fn is_empty(&self) -> bool {
        self.cited.is_empty()
    }
}

/// Build a co-citation network from citation edges.
pub fn cocitation_network(
    references: &ReferenceTable,
    focus: &CocitationFocus,
) -> NetworkResult<CocitationNetwork> {
    references.require_columns(&[columns::CITING_PUBLICATION_ID, columns::CITED_PUBLICATION_ID])?;
    let pairs = distinct_pairs(references, focus);
    let citing = IndexMap::from_ids(pairs.iter().map(|(citing, _)| citing.clone()));
    let cited = IndexMap::from_ids(pairs.iter().map(|(_, cited)| cited.clone()));
    let presence = bipartite_matrix(
        pairs.iter().map(|(a, b)| (a, b, 1.0)),
        &citing,
        &cited,
    );
    Ok(CocitationNetwork {
        weights: presence.project_columns(),
        cited,
    })
}

/// Build one co-citation network per citing year.
pub fn cocitation_network_by_year(
    references: &ReferenceTable,
    focus: &CocitationFocus,
) -> NetworkResult<TemporalCocitationNetwork> {
    references.require_columns(&[
        columns::CITING_PUBLICATION_ID,
        columns::CITED_PUBLICATION_ID,
        columns::CITING_YEAR,
    ])?;
    let triples = distinct_dated_pairs(references, focus);
    let cited = IndexMap::from_ids(triples.iter().map(|(_, _, cited)| cited.clone()));
    let mut by_year: BTreeMap<Year, SymmetricMatrix> = BTreeMap::new();
    let mut years: BTreeSet<Year> = triples.iter().map(|&(year, _, _)| year).collect();
    while let Some(year) = years.pop_first() {
        let year_pairs: Vec<(&Id, &Id)> = triples
            .iter()
            .filter(|&&(y, _, _)| y == year)
            .map(|(_, citing, cited)| (citing, cited))
            .collect();
        let citing = IndexMap::from_ids(year_pairs.iter().map(|(c, _)| (*c).clone()));
        let presence = bipartite_matrix(
            year_pairs.iter().map(|&(a, b)| (a, b, 1.0)),
            &citing,
            &cited,
        );
        by_year.insert(year, presence.project_columns());
    }
    Ok(TemporalCocitationNetwork { cited, by_year })
}

/// Distinct citers of one publication.
pub fn citers_of(references: &ReferenceTable, publication: &Id) -> BTreeSet<Id> {
    references
        .edges()
        .filter(|(_, cited)| *cited == publication)
        .map(|(citing, _)| citing.clone())
        .collect()
}

fn distinct_pairs(references: &ReferenceTable, focus: &CocitationFocus) -> BTreeSet<(Id, Id)> {
    let keep = edge_filter(references, focus);
    references
        .edges()
        .filter(|(citing, cited)| keep.admits(citing, cited))
        .map(|(citing, cited)| (citing.clone(), cited.clone()))
        .collect()
}

fn distinct_dated_pairs(
    references: &ReferenceTable,
    focus: &CocitationFocus,
) -> BTreeSet<(Year, Id, Id)> {
    let keep = edge_filter(references, focus);
    let years = references.citing_years().unwrap_or(&[]);
    references
        .edges()
        .zip(years.iter())
        .filter(|((citing, cited), _)| keep.admits(citing, cited))
        .map(|((citing, cited), &year)| (year, citing.clone(), cited.clone()))
        .collect()
}

enum EdgeFilter {
    All,
    CitedIn(BTreeSet<Id>),
    CitingIn(BTreeSet<Id>),
}

impl EdgeFilter {
    fn admits(&self, citing: &Id, cited: &Id) -> bool {
        match self {
            EdgeFilter::All => true,
            EdgeFilter::CitedIn(set) => set.contains(cited),
            EdgeFilter::CitingIn(set) => set.contains(citing),
        }
    }
}

fn edge_filter(references: &ReferenceTable, focus: &CocitationFocus) -> EdgeFilter {
    match focus {
        CocitationFocus::All => EdgeFilter::All,
        CocitationFocus::Cited(set) => EdgeFilter::CitedIn(set.clone()),
        CocitationFocus::Ego(publication) => {
            EdgeFilter::CitingIn(citers_of(references, publication))
        }
    }
}
