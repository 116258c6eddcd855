//! Inter-field citation distance
//!
//! How far apart two fields sit, measured from how often work in one cites
//! work in the other. Citation edges are joined to each side's field
//! contributions, accumulated into a field-by-field flow matrix, and the flow
//! vectors are compared pairwise under a configurable metric. The
//! accumulation walks the edge table in bounded-size sequential batches so a
//! multi-million-row input never has to be resident at once.

use std::collections::BTreeMap;

use imcite_network::{bipartite_accumulate, CooMatrix};
use imcite_relations::{columns, CitationCorpus, FieldTable, Id, IndexMap, ReferenceTable, Year};
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::error::MetricResult;
use crate::progress::{report, ProgressSink};

/// Distances this close to zero are treated as identical flow vectors and
/// not emitted.
const ZERO_DISTANCE_TOL: f64 = 1e-12;

/// Which side of a citation edge defines a publication's field exposure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CitationDirection {
    /// Fields are defined by what a publication cites.
    #[default]
    References,
    /// Fields are defined by what cites a publication.
    Citations,
}

impl CitationDirection {
    /// The year column that partitions temporal computations.
    pub fn year_column(&self) -> &'static str {
        match self {
            CitationDirection::References => columns::CITING_YEAR,
            CitationDirection::Citations => columns::CITED_YEAR,
        }
    }

    pub(crate) fn source_target<'a>(&self, citing: &'a Id, cited: &'a Id) -> (&'a Id, &'a Id) {
        match self {
            CitationDirection::References => (citing, cited),
            CitationDirection::Citations => (cited, citing),
        }
    }
}

/// Metric comparing two field citation-flow vectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceMetric {
    /// 1 minus the cosine of the angle between the vectors.
    #[default]
    Cosine,
    /// L2 norm of the difference.
    Euclidean,
    /// L1 norm of the difference.
    L1,
}

/// Options for the field distance computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDistanceOptions {
    normalize: bool,
    direction: CitationDirection,
    metric: DistanceMetric,
    batch_size: usize,
}

impl Default for FieldDistanceOptions {
    fn default() -> Self {
        Self {
            normalize: true,
            direction: CitationDirection::default(),
            metric: DistanceMetric::default(),
            batch_size: 1_000_000,
        }
    }
}

impl FieldDistanceOptions {
    /// Create options with defaults: normalized contributions, reference
    /// direction, cosine metric, one-million-row batches.
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

    /// Choose the distance metric.
    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Rows per accumulation batch. Must be at least 1.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Whether contributions are normalized per publication.
    pub fn normalize(&self) -> bool {
        self.normalize
    }

    /// The citation direction.
    pub fn direction(&self) -> CitationDirection {
        self.direction
    }

    /// The distance metric.
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Rows per accumulation batch.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

/// One inter-field distance, upper triangle only (i < j by field id order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDistanceRecord {
    pub i_field: Id,
    pub j_field: Id,
    pub year: Option<Year>,
    pub distance: f64,
}

/// The output table of the field distance engine.
///
/// Only non-zero upper-triangle pairs are stored; absent pairs are zero by
/// contract, and the full symmetric matrix is recovered on densification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDistanceTable {
    records: Vec<FieldDistanceRecord>,
    temporal: bool,
}

impl FieldDistanceTable {
    /// Wrap caller-supplied records, e.g. a distance table computed in an
    /// earlier run.
    pub fn from_records(records: Vec<FieldDistanceRecord>, temporal: bool) -> Self {
        Self { records, temporal }
    }

    /// The distance records.
    pub fn records(&self) -> &[FieldDistanceRecord] {
        &self.records
    }

    /// Whether the table carries per-year distances.
    pub fn is_temporal(&self) -> bool {
        self.temporal
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The distance between two fields (symmetric lookup), if recorded.
    pub fn distance_between(&self, a: &Id, b: &Id, year: Option<Year>) -> Option<f64> {
        self.records
            .iter()
            .find(|r| {
                r.year == year
                    && ((r.i_field == *a && r.j_field == *b)
                        || (r.i_field == *b && r.j_field == *a))
            })
            .map(|r| r.distance)
    }
}

/// Compute a static field distance table over the whole edge set.
pub fn field_citation_distance(
    corpus: &CitationCorpus,
    options: &FieldDistanceOptions,
    progress: Option<ProgressSink<'_>>,
) -> MetricResult<FieldDistanceTable> {
    let references = corpus.references()?;
    let fields = corpus.fields()?;
    references.require_columns(&[columns::CITING_PUBLICATION_ID, columns::CITED_PUBLICATION_ID])?;
    fields.require_columns(&[columns::PUBLICATION_ID, columns::FIELD_ID])?;

    let field_index = IndexMap::from_ids(fields.fields().iter().cloned());
    let contributions = field_contributions(fields, options.normalize);

    let total = references.len();
    let total_batches = total.div_ceil(options.batch_size);
    let mut flow = CooMatrix::new(field_index.len(), field_index.len());
    for (batch, start) in (0..total).step_by(options.batch_size).enumerate() {
        let end = (start + options.batch_size).min(total);
        accumulate_batch(
            &mut flow,
            start..end,
            references,
            &field_index,
            &contributions,
            options.direction,
        )?;
        report(progress, batch + 1, Some(total_batches));
    }

    let mut records = Vec::new();
    emit_distances(&flow.to_dense(), &field_index, None, options.metric, &mut records);
    Ok(FieldDistanceTable { records, temporal: false })
}

/// Compute one field distance table per year of the chosen direction.
pub fn field_citation_distance_by_year(
    corpus: &CitationCorpus,
    options: &FieldDistanceOptions,
    progress: Option<ProgressSink<'_>>,
) -> MetricResult<FieldDistanceTable> {
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
    let by_year = rows_by_year(references, options.direction);
    let total_years = by_year.len();

    let mut records = Vec::new();
    for (done, (&year, rows)) in by_year.iter().enumerate() {
        let flow = accumulate_flow(references, rows, &field_index, &contributions, options)?;
        emit_distances(
            &flow.to_dense(),
            &field_index,
            Some(year),
            options.metric,
            &mut records,
        );
        report(progress, done + 1, Some(total_years));
    }
    Ok(FieldDistanceTable { records, temporal: true })
}

/// Per-publication field contributions: (field id, contribution) per
/// assignment row. With normalization, explicit weights are scaled to sum to
/// 1 (a zero weight sum contributes nothing) and unweighted assignments
/// contribute 1/m over m distinct fields; without it, the raw weight (or 1).
pub(crate) fn field_contributions(
    fields: &FieldTable,
    normalize: bool,
) -> BTreeMap<Id, Vec<(Id, f64)>> {
    let weights = fields.weights();
    let mut per_publication: BTreeMap<Id, Vec<(Id, f64)>> = BTreeMap::new();
    for (row, (publication, field)) in fields.assignments().enumerate() {
        let weight = weights.map(|w| w[row]).unwrap_or(1.0);
        per_publication
            .entry(publication.clone())
            .or_default()
            .push((field.clone(), weight));
    }
    if !normalize {
        return per_publication;
    }
    per_publication
        .into_iter()
        .filter_map(|(publication, mut assigned)| {
            if weights.is_some() {
                let total: f64 = assigned.iter().map(|(_, w)| w).sum();
                if total <= 0.0 {
                    return None;
                }
                for (_, weight) in &mut assigned {
                    *weight /= total;
                }
            } else {
                let distinct = assigned
                    .iter()
                    .map(|(field, _)| field)
                    .collect::<std::collections::BTreeSet<_>>()
                    .len();
                for (_, weight) in &mut assigned {
                    *weight = 1.0 / distinct as f64;
                }
            }
            Some((publication, assigned))
        })
        .collect()
}

pub(crate) fn rows_by_year(
    references: &ReferenceTable,
    direction: CitationDirection,
) -> BTreeMap<Year, Vec<usize>> {
    let years = match direction {
        CitationDirection::References => references.citing_years(),
        CitationDirection::Citations => references.cited_years(),
    }
    .unwrap_or(&[]);
    let mut by_year: BTreeMap<Year, Vec<usize>> = BTreeMap::new();
    for (row, &year) in years.iter().enumerate() {
        by_year.entry(year).or_default().push(row);
    }
    by_year
}

/// Accumulate the weighted (source field, target field) pairs of the given
/// edge rows into one field-by-field flow matrix, batch by batch.
fn accumulate_flow(
    references: &ReferenceTable,
    rows: &[usize],
    field_index: &IndexMap,
    contributions: &BTreeMap<Id, Vec<(Id, f64)>>,
    options: &FieldDistanceOptions,
) -> MetricResult<CooMatrix> {
    let mut flow = CooMatrix::new(field_index.len(), field_index.len());
    for chunk in rows.chunks(options.batch_size) {
        accumulate_batch(
            &mut flow,
            chunk.iter().copied(),
            references,
            field_index,
            contributions,
            options.direction,
        )?;
    }
    Ok(flow)
}

/// Accumulate one batch of edge rows into the flow matrix.
fn accumulate_batch<I>(
    flow: &mut CooMatrix,
    rows: I,
    references: &ReferenceTable,
    field_index: &IndexMap,
    contributions: &BTreeMap<Id, Vec<(Id, f64)>>,
    direction: CitationDirection,
) -> MetricResult<()>
where
    I: IntoIterator<Item = usize>,
{
    let citing = references.citing();
    let cited = references.cited();
    let mut weighted: Vec<(&Id, &Id, f64)> = Vec::new();
    for row in rows {
        let (source, target) = direction.source_target(&citing[row], &cited[row]);
        // edges lacking field information on either side are dropped
        let (Some(source_fields), Some(target_fields)) =
            (contributions.get(source), contributions.get(target))
        else {
            continue;
        };
        for (source_field, source_share) in source_fields {
            for (target_field, target_share) in target_fields {
                weighted.push((source_field, target_field, source_share * target_share));
            }
        }
    }
    bipartite_accumulate(flow, weighted, field_index, field_index)?;
    Ok(())
}

fn emit_distances(
    flow: &Array2<f64>,
    field_index: &IndexMap,
    year: Option<Year>,
    metric: DistanceMetric,
    records: &mut Vec<FieldDistanceRecord>,
) {
    for (i, i_field) in field_index.ids().enumerate() {
        for (j, j_field) in field_index.ids().enumerate().skip(i + 1) {
            let distance = row_distance(flow.row(i), flow.row(j), metric);
            if distance > ZERO_DISTANCE_TOL {
                records.push(FieldDistanceRecord {
                    i_field: i_field.clone(),
                    j_field: j_field.clone(),
                    year,
                    distance,
                });
            }
        }
    }
}

/// Distance between two flow vectors. Cosine treats a zero-norm vector as
/// maximally distant (similarity 0) instead of dividing by zero.
pub(crate) fn row_distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>, metric: DistanceMetric) -> f64 {
    match metric {
        DistanceMetric::Cosine => {
            let norm_a = a.dot(&a).sqrt();
            let norm_b = b.dot(&b).sqrt();
            if norm_a <= 0.0 || norm_b <= 0.0 {
                return 1.0;
            }
            (1.0 - a.dot(&b) / (norm_a * norm_b)).max(0.0)
        }
        DistanceMetric::Euclidean => {
            let mut sum = 0.0;
            for (&x, &y) in a.iter().zip(b.iter()) {
                sum += (x - y) * (x - y);
            }
            sum.sqrt()
        }
        DistanceMetric::L1 => a
            .iter()
            .zip(b.iter())
            .map(|(&x, &y)| (x - y).abs())
            .sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_cosine_orthogonal_and_identical() {
        let a = array![1.0, 0.0];
        let b = array![0.0, 2.0];
        assert!((row_distance(a.view(), b.view(), DistanceMetric::Cosine) - 1.0).abs() < 1e-12);
        assert!(row_distance(a.view(), a.view(), DistanceMetric::Cosine) < 1e-12);
    }

    #[test]
    fn test_cosine_zero_norm_guard() {
        let zero = array![0.0, 0.0];
        let a = array![1.0, 1.0];
        assert_eq!(row_distance(zero.view(), a.view(), DistanceMetric::Cosine), 1.0);
        assert_eq!(row_distance(zero.view(), zero.view(), DistanceMetric::Cosine), 1.0);
    }

    #[test]
    fn test_euclidean_and_l1() {
        let a = array![0.0, 3.0];
        let b = array![4.0, 0.0];
        assert!((row_distance(a.view(), b.view(), DistanceMetric::Euclidean) - 5.0).abs() < 1e-12);
        assert!((row_distance(a.view(), b.view(), DistanceMetric::L1) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_unweighted_contributions_split_over_distinct_fields() {
        let mut fields = FieldTable::new();
        fields.push("P", 100i64);
        fields.push("P", 101i64);
        fields.push("Q", 100i64);
        let contributions = field_contributions(&fields, true);
        let p = &contributions[&Id::from("P")];
        assert_eq!(p.len(), 2);
        assert!((p[0].1 - 0.5).abs() < 1e-12);
        assert!((contributions[&Id::from("Q")][0].1 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_contributions_scale_to_unit_sum() {
        let mut fields = FieldTable::new();
        fields.push("P", 100i64);
        fields.push("P", 101i64);
        fields.push("Z", 102i64);
        let fields = fields.with_weights(vec![3.0, 1.0, 0.0]).unwrap();
        let contributions = field_contributions(&fields, true);
        let p = &contributions[&Id::from("P")];
        assert!((p[0].1 - 0.75).abs() < 1e-12);
        assert!((p[1].1 - 0.25).abs() < 1e-12);
        // a zero weight sum is degenerate and contributes nothing
        assert!(!contributions.contains_key(&Id::from("Z")));
    }

    #[test]
    fn test_unnormalized_contributions_keep_raw_weights() {
        let mut fields = FieldTable::new();
        fields.push("P", 100i64);
        fields.push("P", 101i64);
        let contributions = field_contributions(&fields, false);
        let p = &contributions[&Id::from("P")];
        assert_eq!(p[0].1, 1.0);
        assert_eq!(p[1].1, 1.0);
    }
}
