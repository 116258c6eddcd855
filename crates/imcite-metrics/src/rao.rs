//! Rao-Stirling interdisciplinarity
//!
//! Scores each publication by how spread its references (or citations) are
//! across fields, weighted by inter-field distance: 0.5 * vᵀDv over the
//! publication's L1-normalized field-membership vector v and the symmetric
//! field distance matrix D. The distance matrix comes from the field
//! distance engine or from a caller-supplied precomputed table, which is
//! validated for shape before any scoring.

use std::collections::BTreeSet;

use imcite_network::bipartite_matrix;
use imcite_relations::{columns, CitationCorpus, Id, IndexMap, Year};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::distance::{
    field_citation_distance, field_citation_distance_by_year, field_contributions, rows_by_year,
    CitationDirection, DistanceMetric, FieldDistanceOptions, FieldDistanceRecord,
    FieldDistanceTable,
};
use crate::error::{MetricError, MetricResult};
use crate::progress::{report, ProgressSink};

/// Options for the Rao-Stirling computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaoStirlingOptions {
    normalize: bool,
    direction: CitationDirection,
    metric: DistanceMetric,
    focus: Option<Vec<Id>>,
}

impl Default for RaoStirlingOptions {
    fn default() -> Self {
        Self {
            normalize: true,
            direction: CitationDirection::default(),
            metric: DistanceMetric::default(),
            focus: None,
        }
    }
}

impl RaoStirlingOptions {
    /// Create options with defaults: normalized contributions, reference
    /// direction, cosine metric, all source publications scored.
    pub fn new() -> Self {
        Self::default()
    }

    /// Split each publication's field contribution so it sums to 1.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Choose the citation direction.
    pub fn with_direction(mut self, direction: CitationDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Choose the metric used when the distance table is computed here.
    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Restrict scoring to the given source publications.
    pub fn with_focus(mut self, focus: Vec<Id>) -> Self {
        self.focus = Some(focus);
        self
    }

    fn distance_options(&self) -> FieldDistanceOptions {
        FieldDistanceOptions::new()
            .with_normalize(self.normalize)
            .with_direction(self.direction)
            .with_metric(self.metric)
    }
}

/// One publication's Rao-Stirling score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaoStirlingScore {
    pub publication: Id,
    pub year: Option<Year>,
    pub score: f64,
}

/// Score interdisciplinarity statically over the whole edge set.
///
/// Only publications with at least one field-mapped edge in the chosen
/// direction produce a score; a publication whose references all map to one
/// field scores 0 by the zero self-distance of D.
pub fn rao_stirling(
    corpus: &CitationCorpus,
    options: &RaoStirlingOptions,
    distance: Option<&FieldDistanceTable>,
    progress: Option<ProgressSink<'_>>,
) -> MetricResult<Vec<RaoStirlingScore>> {
    let references = corpus.references()?;
    let fields = corpus.fields()?;
    references.require_columns(&[columns::CITING_PUBLICATION_ID, columns::CITED_PUBLICATION_ID])?;
    fields.require_columns(&[columns::PUBLICATION_ID, columns::FIELD_ID])?;

    let field_index = IndexMap::from_ids(fields.fields().iter().cloned());
    let dense = match distance {
        Some(table) => {
            // a static table must not carry dated records either
            if table.is_temporal() || table.records().iter().any(|r| r.year.is_some()) {
                return Err(MetricError::temporal_mismatch(true));
            }
            densify(table.records().iter(), &field_index)?
        }
        None => {
            let table = field_citation_distance(corpus, &options.distance_options(), progress)?;
            densify(table.records().iter(), &field_index)?
        }
    };

    let contributions = field_contributions(fields, options.normalize);
    let focus: Option<BTreeSet<&Id>> = options.focus.as_ref().map(|ids| ids.iter().collect());

    let scores = score_rows(
        references,
        0..references.len(),
        options.direction,
        focus.as_ref(),
        &contributions,
        &field_index,
        &dense,
        None,
    );
    report(progress, 1, Some(1));
    Ok(scores)
}

/// Score interdisciplinarity per year, using that year's distance matrix.
pub fn rao_stirling_by_year(
    corpus: &CitationCorpus,
    options: &RaoStirlingOptions,
    distance: Option<&FieldDistanceTable>,
    progress: Option<ProgressSink<'_>>,
) -> MetricResult<Vec<RaoStirlingScore>> {
    let references = corpus.references()?;
    let fields = corpus.fields()?;
    references.require_columns(&[
        columns::CITING_PUBLICATION_ID,
        columns::CITED_PUBLICATION_ID,
        options.direction.year_column(),
    ])?;
    fields.require_columns(&[columns::PUBLICATION_ID, columns::FIELD_ID])?;

    let field_index = IndexMap::from_ids(fields.fields().iter().cloned());
    let contributions = field_contributions(fields, options.normalize);
    let focus: Option<BTreeSet<&Id>> = options.focus.as_ref().map(|ids| ids.iter().collect());

    // years implied by the (focus-restricted) edges of the chosen direction
    let citing = references.citing();
    let cited = references.cited();
    let mut rows_per_year = rows_by_year(references, options.direction);
    rows_per_year.retain(|_, rows| {
        rows.retain(|&row| {
            let (source, _) = options.direction.source_target(&citing[row], &cited[row]);
            focus.as_ref().map(|set| set.contains(source)).unwrap_or(true)
        });
        !rows.is_empty()
    });
    let years: Vec<Year> = rows_per_year.keys().copied().collect();

    let supplied = match distance {
        Some(table) => {
            if !table.is_temporal() {
                return Err(MetricError::temporal_mismatch(false));
            }
            validate_temporal_table(table, &field_index, &years)?;
            Some(table)
        }
        None => None,
    };
    let computed = match supplied {
        Some(_) => None,
        None => Some(field_citation_distance_by_year(
            corpus,
            &options.distance_options(),
            progress,
        )?),
    };
    let table = supplied.or(computed.as_ref());

    let mut scores = Vec::new();
    let total_years = years.len();
    for (done, &year) in years.iter().enumerate() {
        let records = table
            .map(|t| t.records())
            .unwrap_or(&[])
            .iter()
            .filter(|r| r.year == Some(year));
        let dense = densify(records, &field_index)?;
        scores.extend(score_rows(
            references,
            rows_per_year[&year].iter().copied(),
            options.direction,
            focus.as_ref(),
            &contributions,
            &field_index,
            &dense,
            Some(year),
        ));
        report(progress, done + 1, Some(total_years));
    }
    Ok(scores)
}

/// A caller-supplied temporal table must cover every implied year and only
/// name known fields; extra years are simply not read.
fn validate_temporal_table(
    table: &FieldDistanceTable,
    field_index: &IndexMap,
    years: &[Year],
) -> MetricResult<()> {
    for record in table.records() {
        for field in [&record.i_field, &record.j_field] {
            if !field_index.contains(field) {
                return Err(MetricError::UnknownField(field.clone()));
            }
        }
    }
    let covered: BTreeSet<Year> = table.records().iter().filter_map(|r| r.year).collect();
    let missing: Vec<Year> = years
        .iter()
        .copied()
        .filter(|year| !covered.contains(year))
        .collect();
    if !missing.is_empty() {
        return Err(MetricError::MissingYears { years: missing });
    }
    Ok(())
}

/// Symmetrize upper-triangle records into a dense matrix with zero diagonal.
fn densify<'a, I>(records: I, field_index: &IndexMap) -> MetricResult<Array2<f64>>
where
    I: Iterator<Item = &'a FieldDistanceRecord>,
{
    let n = field_index.len();
    let mut dense = Array2::zeros((n, n));
    for record in records {
        let i = field_index
            .index_of(&record.i_field)
            .ok_or_else(|| MetricError::UnknownField(record.i_field.clone()))?;
        let j = field_index
            .index_of(&record.j_field)
            .ok_or_else(|| MetricError::UnknownField(record.j_field.clone()))?;
        dense[[i, j]] = record.distance;
        dense[[j, i]] = record.distance;
    }
    Ok(dense)
}

/// Build the membership matrix for the given edge rows and evaluate the
/// quadratic form per source publication.
#[allow(clippy::too_many_arguments)]
fn score_rows<I>(
    references: &imcite_relations::ReferenceTable,
    rows: I,
    direction: CitationDirection,
    focus: Option<&BTreeSet<&Id>>,
    contributions: &std::collections::BTreeMap<Id, Vec<(Id, f64)>>,
    field_index: &IndexMap,
    distance: &Array2<f64>,
    year: Option<Year>,
) -> Vec<RaoStirlingScore>
where
    I: IntoIterator<Item = usize>,
{
    let citing = references.citing();
    let cited = references.cited();

    // join each edge to the target side's field contributions; sources with
    // no field-mapped edge drop out of the membership axis entirely
    let mut memberships: Vec<(&Id, &Id, f64)> = Vec::new();
    for row in rows {
        let (source, target) = direction.source_target(&citing[row], &cited[row]);
        if let Some(set) = focus {
            if !set.contains(source) {
                continue;
            }
        }
        let Some(target_fields) = contributions.get(target) else {
            continue;
        };
        for (field, share) in target_fields {
            memberships.push((source, field, *share));
        }
    }

    let publication_index =
        IndexMap::from_ids(memberships.iter().map(|(source, _, _)| (*source).clone()));
    let membership = bipartite_matrix(
        memberships.iter().map(|&(s, f, w)| (s, f, w)),
        &publication_index,
        field_index,
    );

    let mut scores = Vec::with_capacity(publication_index.len());
    for (row, publication) in publication_index.ids().enumerate() {
        let entries: Vec<(usize, f64)> = membership.row(row).collect();
        let total: f64 = entries.iter().map(|(_, v)| v).sum();
        if total <= 0.0 {
            continue;
        }
        let mut quadratic = 0.0;
        for &(field_a, value_a) in &entries {
            for &(field_b, value_b) in &entries {
                quadratic += (value_a / total) * (value_b / total) * distance[[field_a, field_b]];
            }
        }
        scores.push(RaoStirlingScore {
            publication: publication.clone(),
            year,
            score: 0.5 * quadratic,
        });
    }
    scores
}
