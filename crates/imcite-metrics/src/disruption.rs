//! CD disruption index
//!
//! Funk & Owen-Smith's dynamic network measure, popularized by Wu, Wang &
//! Evans: a publication disrupts when its citers bypass its references, and
//! consolidates when they keep citing them alongside it.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use imcite_relations::{CitationCorpus, Id};
use serde::{Deserialize, Serialize};

use crate::error::MetricResult;
use crate::progress::{report, ProgressSink};

/// How often the progress callback fires during a batch evaluation.
const PROGRESS_INTERVAL: usize = 1000;

/// One focus publication's disruption index.
///
/// `score` is `None` when the index is undefined: the publication has no
/// references or no citers. Defined scores lie in [-1, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisruptionScore {
    pub publication: Id,
    pub score: Option<f64>,
}

/// Evaluate the CD index for a batch of focus publications.
///
/// Adjacency is grouped once up front, so each evaluation costs only its own
/// reference and citer sets. With no explicit focus list, every publication
/// appearing as cited is scored; an explicit list is honored row for row,
/// with publications absent from the tables reported as undefined.
pub fn disruption_indices(
    corpus: &CitationCorpus,
    focus: Option<&[Id]>,
    progress: Option<ProgressSink<'_>>,
) -> MetricResult<Vec<DisruptionScore>> {
    let references = corpus.references()?;

    // duplicate rows collapse here: R, C, and the citer pool are all sets
    let mut cites: BTreeMap<&Id, BTreeSet<&Id>> = BTreeMap::new();
    let mut cited_by: BTreeMap<&Id, BTreeSet<&Id>> = BTreeMap::new();
    for (citing, cited) in references.edges() {
        cites.entry(citing).or_default().insert(cited);
        cited_by.entry(cited).or_default().insert(citing);
    }

    let focus_ids: Vec<&Id> = match focus {
        Some(ids) => ids.iter().collect(),
        None => cited_by.keys().copied().collect(),
    };
    let total = focus_ids.len();

    let mut scores = Vec::with_capacity(total);
    for (done, publication) in focus_ids.into_iter().enumerate() {
        scores.push(DisruptionScore {
            publication: publication.clone(),
            score: evaluate(publication, &cites, &cited_by),
        });
        if (done + 1) % PROGRESS_INTERVAL == 0 {
            report(progress, done + 1, Some(total));
        }
    }
    report(progress, total, Some(total));
    Ok(scores)
}

fn evaluate(
    focus: &Id,
    cites: &BTreeMap<&Id, BTreeSet<&Id>>,
    cited_by: &BTreeMap<&Id, BTreeSet<&Id>>,
) -> Option<f64> {
    let focus_refs = cites.get(focus).filter(|r| !r.is_empty())?;
    let citers_of_focus = cited_by.get(focus).filter(|c| !c.is_empty())?;

    // citers of any reference, counted once per distinct citer
    let mut reference_citers: HashSet<&Id> = HashSet::new();
    for reference in focus_refs {
        if let Some(citers) = cited_by.get(reference) {
            reference_citers.extend(citers.iter().copied());
        }
    }

    let nj = citers_of_focus
        .iter()
        .filter(|citer| reference_citers.contains(**citer))
        .count();
    let ni = citers_of_focus.len() - nj;
    let nk = reference_citers.len() - nj;

    // unreachable with R and C both non-empty, but never divide by zero
    let denominator = ni + nj + nk;
    if denominator == 0 {
        return None;
    }
    Some((ni as f64 - nj as f64) / denominator as f64)
}
