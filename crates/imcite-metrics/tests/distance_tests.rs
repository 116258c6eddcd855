//! Field citation distance integration tests

mod common;

use common::{dated_references, disjoint_field_corpus, field_assignments, references};
use imcite_metrics::{
    field_citation_distance, field_citation_distance_by_year, CitationDirection, DistanceMetric,
    FieldDistanceOptions,
};
use imcite_relations::{CitationCorpus, Id};
use rstest::rstest;

const TOL: f64 = 1e-9;

// === Static distances ===

#[test]
fn test_disjoint_fields_are_maximally_distant_under_cosine() {
    let table =
        field_citation_distance(&disjoint_field_corpus(), &FieldDistanceOptions::new(), None)
            .unwrap();
    assert!(!table.is_temporal());
    assert_eq!(table.len(), 1);
    let record = &table.records()[0];
    assert_eq!(record.i_field, Id::from(1i64));
    assert_eq!(record.j_field, Id::from(2i64));
    assert_eq!(record.year, None);
    assert!((record.distance - 1.0).abs() < TOL);
}

#[test]
fn test_identical_flow_vectors_are_not_emitted() {
    // every publication sits in both fields, so the two flow rows coincide
    let refs = references(&[("p1", "p2"), ("p2", "p1")]);
    let fields = field_assignments(&[("p1", 1), ("p1", 2), ("p2", 1), ("p2", 2)]);
    let corpus = CitationCorpus::new().with_references(refs).with_fields(fields);
    let table = field_citation_distance(&corpus, &FieldDistanceOptions::new(), None).unwrap();
    assert!(table.is_empty());
}

#[rstest]
#[case(DistanceMetric::Euclidean, 2.0 * std::f64::consts::SQRT_2)]
#[case(DistanceMetric::L1, 4.0)]
fn test_alternative_metrics(#[case] metric: DistanceMetric, #[case] expected: f64) {
    // flow matrix is diag(2, 2), so the rows are (2,0) and (0,2)
    let options = FieldDistanceOptions::new().with_metric(metric);
    let table = field_citation_distance(&disjoint_field_corpus(), &options, None).unwrap();
    assert_eq!(table.len(), 1);
    assert!((table.records()[0].distance - expected).abs() < TOL);
}

#[test]
fn test_symmetric_lookup_and_no_self_pairs() {
    let table =
        field_citation_distance(&disjoint_field_corpus(), &FieldDistanceOptions::new(), None)
            .unwrap();
    let one = Id::from(1i64);
    let two = Id::from(2i64);
    assert_eq!(
        table.distance_between(&one, &two, None),
        table.distance_between(&two, &one, None)
    );
    assert_eq!(table.distance_between(&one, &one, None), None);
    for record in table.records() {
        assert!(record.i_field < record.j_field);
    }
}

// === Batched accumulation ===

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
fn test_batch_size_never_changes_the_result(#[case] batch_size: usize) {
    let refs = references(&[
        ("p1", "p2"),
        ("p1", "q1"),
        ("p2", "q2"),
        ("q1", "q2"),
        ("q2", "p1"),
    ]);
    let fields = field_assignments(&[("p1", 1), ("p2", 1), ("q1", 2), ("q2", 2), ("q2", 3)]);
    let corpus = CitationCorpus::new().with_references(refs).with_fields(fields);

    let unbatched =
        field_citation_distance(&corpus, &FieldDistanceOptions::new(), None).unwrap();
    let batched = field_citation_distance(
        &corpus,
        &FieldDistanceOptions::new().with_batch_size(batch_size),
        None,
    )
    .unwrap();
    assert_eq!(unbatched, batched);
}

#[test]
fn test_batch_progress_is_observational() {
    let corpus = disjoint_field_corpus();
    let options = FieldDistanceOptions::new().with_batch_size(1);
    let seen = std::cell::RefCell::new(Vec::new());
    let sink = |p: imcite_metrics::Progress| seen.borrow_mut().push(p);
    let with_progress = field_citation_distance(&corpus, &options, Some(&sink)).unwrap();
    let without_progress = field_citation_distance(&corpus, &options, None).unwrap();
    assert_eq!(with_progress, without_progress);
    // four edges, one per batch
    assert_eq!(seen.borrow().len(), 4);
}

#[test]
fn test_partial_final_batch_is_accumulated() {
    let refs = references(&[
        ("p1", "p2"),
        ("p1", "q1"),
        ("p2", "q2"),
        ("q1", "q2"),
        ("q2", "p1"),
    ]);
    let fields = field_assignments(&[("p1", 1), ("p2", 1), ("q1", 2), ("q2", 2)]);
    let corpus = CitationCorpus::new().with_references(refs).with_fields(fields);

    // five edges in batches of two: the last batch holds a single row
    let options = FieldDistanceOptions::new().with_batch_size(2);
    let seen = std::cell::RefCell::new(Vec::new());
    let sink = |p: imcite_metrics::Progress| seen.borrow_mut().push(p);
    let batched = field_citation_distance(&corpus, &options, Some(&sink)).unwrap();
    assert_eq!(seen.borrow().len(), 3);
    assert_eq!(seen.borrow().last().map(|p| p.completed), Some(3));

    let unbatched =
        field_citation_distance(&corpus, &FieldDistanceOptions::new(), None).unwrap();
    assert_eq!(batched, unbatched);
}

// === Temporal distances ===

#[test]
fn test_temporal_partitions_by_citing_year() {
    let refs = dated_references(&[
        // 2000: strictly within-field flow
        ("p1", "p2", 2000),
        ("q1", "q2", 2000),
        // 2001: field 1 starts citing field 2
        ("p1", "q1", 2001),
        ("p1", "p2", 2001),
        ("q1", "q2", 2001),
    ]);
    let fields = field_assignments(&[("p1", 1), ("p2", 1), ("q1", 2), ("q2", 2)]);
    let corpus = CitationCorpus::new().with_references(refs).with_fields(fields);

    let table =
        field_citation_distance_by_year(&corpus, &FieldDistanceOptions::new(), None).unwrap();
    assert!(table.is_temporal());
    let one = Id::from(1i64);
    let two = Id::from(2i64);
    assert!((table.distance_between(&one, &two, Some(2000)).unwrap() - 1.0).abs() < TOL);
    // 2001 flow: field 1 row (1, 1), field 2 row (0, 1)
    let expected = 1.0 - 1.0 / std::f64::consts::SQRT_2;
    assert!((table.distance_between(&one, &two, Some(2001)).unwrap() - expected).abs() < TOL);
}

#[test]
fn test_temporal_requires_the_direction_year_column() {
    let err = field_citation_distance_by_year(
        &disjoint_field_corpus(),
        &FieldDistanceOptions::new(),
        None,
    )
    .unwrap_err();
    assert!(err.to_string().contains("CitingYear"));

    let err = field_citation_distance_by_year(
        &disjoint_field_corpus(),
        &FieldDistanceOptions::new().with_direction(CitationDirection::Citations),
        None,
    )
    .unwrap_err();
    assert!(err.to_string().contains("CitedYear"));
}

// === Schema errors ===

#[test]
fn test_missing_fields_table_fails_fast() {
    let corpus = CitationCorpus::new().with_references(references(&[("a", "b")]));
    let err = field_citation_distance(&corpus, &FieldDistanceOptions::new(), None).unwrap_err();
    assert!(err.to_string().contains("fields"));
}

#[test]
fn test_edges_without_field_information_are_dropped() {
    // q1 and q2 carry no field assignment, so their edges contribute nothing
    let refs = references(&[("p1", "p2"), ("q1", "q2"), ("p1", "q1")]);
    let fields = field_assignments(&[("p1", 1), ("p2", 2)]);
    let corpus = CitationCorpus::new().with_references(refs).with_fields(fields);
    let table = field_citation_distance(&corpus, &FieldDistanceOptions::new(), None).unwrap();
    // only p1 -> p2 survives: flow row 1 = (0, 1), row 2 = (0, 0)
    assert_eq!(table.len(), 1);
    assert!((table.records()[0].distance - 1.0).abs() < TOL);
}
