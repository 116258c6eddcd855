//! Collective credit allocation among co-authors
//!
//! Shen & Barabási's scheme: a focus publication's accrued citations are
//! split among its authors, and an author is additionally credited for
//! citations accrued by other publications they co-authored that are co-cited
//! alongside the focus publication. The allocation runs entirely inside the
//! focus publication's ego co-citation network, so its cost is bounded by
//! that publication's own neighborhood.

use std::collections::{BTreeMap, BTreeSet};

use imcite_network::cocitation::{
    cocitation_network, cocitation_network_by_year, CocitationFocus,
};
use imcite_relations::{columns, AuthorshipTable, CitationCorpus, Id, IndexMap, Year};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{MetricError, MetricResult};

/// Options for credit allocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditOptions {
    normed: bool,
}

impl CreditOptions {
    /// Create options with defaults: raw (unnormalized) credit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize shares so they sum to 1 across the focus authors.
    pub fn with_normed(mut self, normed: bool) -> Self {
        self.normed = normed;
        self
    }

    /// Whether shares are normalized.
    pub fn normed(&self) -> bool {
        self.normed
    }
}

/// Per-author credit for one focus publication.
///
/// A share of `None` means the allocation is undefined for that author: the
/// focus publication has no citers, or normalization had a zero total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditShare {
    authors: IndexMap,
    shares: Vec<Option<f64>>,
}

impl CreditShare {
    /// The author-to-index map aligning `shares` to author ids.
    pub fn authors(&self) -> &IndexMap {
        &self.authors
    }

    /// Shares in author index order.
    pub fn shares(&self) -> &[Option<f64>] {
        &self.shares
    }

    /// The share of one author, if they are a focus author.
    pub fn share_of(&self, author: &Id) -> Option<Option<f64>> {
        self.authors.index_of(author).map(|i| self.shares[i])
    }
}

/// Per-author, per-year cumulative credit for one focus publication.
///
/// Shares are author-major: `shares()[author][year_index]`. The credit flow
/// is cumulative over years, so later years reflect all citations up to and
/// including them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalCreditShare {
    authors: IndexMap,
    years: Vec<Year>,
    shares: Vec<Vec<Option<f64>>>,
}

impl TemporalCreditShare {
    /// The author-to-index map aligning `shares` to author ids.
    pub fn authors(&self) -> &IndexMap {
        &self.authors
    }

    /// Citing years with at least one citer, ascending.
    pub fn years(&self) -> &[Year] {
        &self.years
    }

    /// Shares in author index order, one row of per-year values per author.
    pub fn shares(&self) -> &[Vec<Option<f64>>] {
        &self.shares
    }

    /// One author's per-year shares, if they are a focus author.
    pub fn shares_of(&self, author: &Id) -> Option<&[Option<f64>]> {
        self.authors
            .index_of(author)
            .map(|i| self.shares[i].as_slice())
    }
}

/// Allocate a focus publication's citation credit among its authors.
pub fn credit_share(
    corpus: &CitationCorpus,
    focus: &Id,
    options: &CreditOptions,
) -> MetricResult<CreditShare> {
    let references = corpus.references()?;
    let authorships = corpus.authorships()?;

    let bylines = authors_by_publication(authorships);
    let authors = focus_authors(&bylines, focus)?;
    if authors.len() == 1 {
        return Ok(CreditShare { authors, shares: vec![Some(1.0)] });
    }

    let network = cocitation_network(references, &CocitationFocus::Ego(focus.clone()))?;
    let (Some(focus_col), false) = (network.cited().index_of(focus), network.is_empty()) else {
        let shares = vec![None; authors.len()];
        return Ok(CreditShare { authors, shares });
    };

    let allocation = allocation_matrix(&bylines, &authors, network.cited());

    // the co-citation row gives credit flowing through co-cited works; the
    // diagonal is replaced by the focus publication's own citer count
    let n = network.cited().len();
    let mut flow = Array1::zeros(n);
    for q in 0..n {
        flow[q] = network.weights().get(focus_col, q);
    }
    flow[focus_col] = distinct_citers(references, focus).len() as f64;

    let credit = allocation.dot(&flow);
    Ok(CreditShare {
        shares: finalize(credit.as_slice().unwrap_or(&[]), options.normed),
        authors,
    })
}

/// Allocate credit cumulatively per citing year.
pub fn credit_share_by_year(
    corpus: &CitationCorpus,
    focus: &Id,
    options: &CreditOptions,
) -> MetricResult<TemporalCreditShare> {
    let references = corpus.references()?;
    let authorships = corpus.authorships()?;
    references.require_columns(&[columns::CITING_YEAR])?;

    let bylines = authors_by_publication(authorships);
    let authors = focus_authors(&bylines, focus)?;
    let citers_by_year = citers_by_year(references, focus);
    let years: Vec<Year> = citers_by_year.keys().copied().collect();

    if authors.len() == 1 {
        let shares = vec![vec![Some(1.0); years.len()]];
        return Ok(TemporalCreditShare { authors, years, shares });
    }

    let network = cocitation_network_by_year(references, &CocitationFocus::Ego(focus.clone()))?;
    let (Some(focus_col), false) = (network.cited().index_of(focus), network.is_empty()) else {
        let shares = vec![Vec::new(); authors.len()];
        return Ok(TemporalCreditShare { authors, years: Vec::new(), shares });
    };

    let allocation = allocation_matrix(&bylines, &authors, network.cited());

    // one flow vector per year, then a running sum so each year's credit
    // reflects all citations accrued so far
    let n = network.cited().len();
    let mut flows = Array2::zeros((years.len(), n));
    for (row, &year) in years.iter().enumerate() {
        if let Some(weights) = network.for_year(year) {
            for q in 0..n {
                flows[[row, q]] = weights.get(focus_col, q);
            }
        }
        flows[[row, focus_col]] = citers_by_year
            .get(&year)
            .map(|citers| citers.len() as f64)
            .unwrap_or(0.0);
    }
    for row in 1..years.len() {
        for q in 0..n {
            flows[[row, q]] += flows[[row - 1, q]];
        }
    }

    let mut shares = vec![Vec::with_capacity(years.len()); authors.len()];
    for row in 0..years.len() {
        let credit = allocation.dot(&flows.row(row));
        let year_shares = finalize(credit.as_slice().unwrap_or(&[]), options.normed);
        for (author, share) in year_shares.into_iter().enumerate() {
            shares[author].push(share);
        }
    }
    Ok(TemporalCreditShare { authors, years, shares })
}

/// Group the authorship table by publication in a single pass, so byline
/// lookups during allocation are map reads instead of table scans.
fn authors_by_publication(authorships: &AuthorshipTable) -> BTreeMap<&Id, BTreeSet<&Id>> {
    let mut bylines: BTreeMap<&Id, BTreeSet<&Id>> = BTreeMap::new();
    for (publication, author) in authorships.assignments() {
        bylines.entry(publication).or_default().insert(author);
    }
    bylines
}

fn focus_authors(bylines: &BTreeMap<&Id, BTreeSet<&Id>>, focus: &Id) -> MetricResult<IndexMap> {
    let authors = match bylines.get(focus) {
        Some(byline) => IndexMap::from_ids(byline.iter().map(|author| (*author).clone())),
        None => return Err(MetricError::NoAuthors(focus.clone())),
    };
    Ok(authors)
}

/// One row per focus author, one column per co-cited publication; an entry is
/// the author's fractional share 1/|authors of that publication|.
fn allocation_matrix(
    bylines: &BTreeMap<&Id, BTreeSet<&Id>>,
    authors: &IndexMap,
    cocited: &IndexMap,
) -> Array2<f64> {
    let mut allocation = Array2::zeros((authors.len(), cocited.len()));
    for (col, publication) in cocited.ids().enumerate() {
        let Some(byline) = bylines.get(publication) else {
            continue;
        };
        let fraction = 1.0 / byline.len() as f64;
        for &author in byline {
            if let Some(row) = authors.index_of(author) {
                allocation[[row, col]] = fraction;
            }
        }
    }
    allocation
}

fn distinct_citers(references: &imcite_relations::ReferenceTable, focus: &Id) -> BTreeSet<Id> {
    imcite_network::citers_of(references, focus)
}

fn citers_by_year(
    references: &imcite_relations::ReferenceTable,
    focus: &Id,
) -> BTreeMap<Year, BTreeSet<Id>> {
    let years = references.citing_years().unwrap_or(&[]);
    let mut by_year: BTreeMap<Year, BTreeSet<Id>> = BTreeMap::new();
    for ((citing, cited), &year) in references.edges().zip(years.iter()) {
        if cited == focus {
            by_year.entry(year).or_default().insert(citing.clone());
        }
    }
    by_year
}

fn finalize(credit: &[f64], normed: bool) -> Vec<Option<f64>> {
    if !normed {
        return credit.iter().map(|&c| Some(c)).collect();
    }
    let total: f64 = credit.iter().sum();
    if total > 0.0 {
        credit.iter().map(|&c| Some(c / total)).collect()
    } else {
        vec![None; credit.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imcite_relations::ReferenceTable;

    const TOL: f64 = 1e-9;

    // focus P by {a1, a2}; co-cited Q by {a1, a3}; five distinct citers of P,
    // two of which also cite Q
    fn scenario() -> CitationCorpus {
        let mut refs = ReferenceTable::new();
        for citer in ["c1", "c2", "c3", "c4", "c5"] {
            refs.push(citer, "P");
        }
        refs.push("c1", "Q");
        refs.push("c2", "Q");
        let mut authorships = AuthorshipTable::new();
        authorships.push("P", "a1");
        authorships.push("P", "a2");
        authorships.push("Q", "a1");
        authorships.push("Q", "a3");
        CitationCorpus::new()
            .with_references(refs)
            .with_authorships(authorships)
    }

    #[test]
    fn test_raw_credit_scenario() {
        let shares = credit_share(&scenario(), &Id::from("P"), &CreditOptions::new()).unwrap();
        // a1 = 0.5*5 + 0.5*2, a2 = 0.5*5
        assert!((shares.share_of(&Id::from("a1")).unwrap().unwrap() - 3.5).abs() < TOL);
        assert!((shares.share_of(&Id::from("a2")).unwrap().unwrap() - 2.5).abs() < TOL);
    }

    #[test]
    fn test_normed_credit_sums_to_one() {
        let options = CreditOptions::new().with_normed(true);
        let shares = credit_share(&scenario(), &Id::from("P"), &options).unwrap();
        let a1 = shares.share_of(&Id::from("a1")).unwrap().unwrap();
        let a2 = shares.share_of(&Id::from("a2")).unwrap().unwrap();
        assert!((a1 - 3.5 / 6.0).abs() < TOL);
        assert!((a2 - 2.5 / 6.0).abs() < TOL);
        assert!((a1 + a2 - 1.0).abs() < TOL);
    }

    #[test]
    fn test_single_author_gets_exactly_one() {
        let mut refs = ReferenceTable::new();
        refs.push("c1", "P");
        let mut authorships = AuthorshipTable::new();
        authorships.push("P", "a1");
        let corpus = CitationCorpus::new()
            .with_references(refs)
            .with_authorships(authorships);
        let shares = credit_share(&corpus, &Id::from("P"), &CreditOptions::new()).unwrap();
        assert_eq!(shares.shares(), &[Some(1.0)]);
    }

    #[test]
    fn test_no_citers_is_undefined_per_author() {
        let mut refs = ReferenceTable::new();
        refs.push("P", "R"); // P cites something but nobody cites P
        let mut authorships = AuthorshipTable::new();
        authorships.push("P", "a1");
        authorships.push("P", "a2");
        let corpus = CitationCorpus::new()
            .with_references(refs)
            .with_authorships(authorships);
        let shares = credit_share(&corpus, &Id::from("P"), &CreditOptions::new()).unwrap();
        assert_eq!(shares.shares(), &[None, None]);
    }

    #[test]
    fn test_no_authors_fails_fast() {
        let corpus = scenario();
        let err = credit_share(&corpus, &Id::from("Q2"), &CreditOptions::new()).unwrap_err();
        assert!(matches!(err, MetricError::NoAuthors(_)));
    }

    #[test]
    fn test_temporal_flow_is_cumulative() {
        let mut refs = ReferenceTable::new();
        for citer in ["c1", "c2", "c3", "c4", "c5"] {
            refs.push(citer, "P");
        }
        refs.push("c1", "Q");
        refs.push("c2", "Q");
        // c1, c2 cite in 2000; c3..c5 in 2001
        let refs = refs
            .with_citing_years(vec![2000, 2000, 2001, 2001, 2001, 2000, 2000])
            .unwrap();
        let mut authorships = AuthorshipTable::new();
        authorships.push("P", "a1");
        authorships.push("P", "a2");
        authorships.push("Q", "a1");
        authorships.push("Q", "a3");
        let corpus = CitationCorpus::new()
            .with_references(refs)
            .with_authorships(authorships);

        let shares =
            credit_share_by_year(&corpus, &Id::from("P"), &CreditOptions::new()).unwrap();
        assert_eq!(shares.years(), &[2000, 2001]);
        let a1 = shares.shares_of(&Id::from("a1")).unwrap();
        let a2 = shares.shares_of(&Id::from("a2")).unwrap();
        // 2000: two citers of P, both co-citing Q -> a1 = 0.5*2 + 0.5*2 = 2.0
        assert!((a1[0].unwrap() - 2.0).abs() < TOL);
        assert!((a2[0].unwrap() - 1.0).abs() < TOL);
        // 2001 cumulative: five citers, co-citation still 2
        assert!((a1[1].unwrap() - 3.5).abs() < TOL);
        assert!((a2[1].unwrap() - 2.5).abs() < TOL);
    }

    #[test]
    fn test_temporal_single_author_is_one_per_year() {
        let mut refs = ReferenceTable::new();
        refs.push("c1", "P");
        refs.push("c2", "P");
        let refs = refs.with_citing_years(vec![1999, 2005]).unwrap();
        let mut authorships = AuthorshipTable::new();
        authorships.push("P", "solo");
        let corpus = CitationCorpus::new()
            .with_references(refs)
            .with_authorships(authorships);
        let shares =
            credit_share_by_year(&corpus, &Id::from("P"), &CreditOptions::new()).unwrap();
        assert_eq!(shares.years(), &[1999, 2005]);
        assert_eq!(shares.shares(), &[vec![Some(1.0), Some(1.0)]]);
    }

    #[test]
    fn test_temporal_requires_citing_year_column() {
        let err =
            credit_share_by_year(&scenario(), &Id::from("P"), &CreditOptions::new()).unwrap_err();
        assert!(err.to_string().contains("CitingYear"));
    }
}
