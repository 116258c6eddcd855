//! Shared fixture corpus for the metric integration tests
#![allow(dead_code)] // each test binary uses its own subset of the fixtures

use imcite_relations::{
    AuthorshipTable, CitationCorpus, FieldTable, Id, ReferenceTable, Year,
};

/// Build a reference table from (citing, cited) pairs.
pub fn references(edges: &[(&str, &str)]) -> ReferenceTable {
    let mut table = ReferenceTable::new();
    for &(citing, cited) in edges {
        table.push(citing, cited);
    }
    table
}

/// Build a reference table from (citing, cited, citing year) triples.
pub fn dated_references(edges: &[(&str, &str, Year)]) -> ReferenceTable {
    let mut table = ReferenceTable::new();
    for &(citing, cited, _) in edges {
        table.push(citing, cited);
    }
    table
        .with_citing_years(edges.iter().map(|&(_, _, year)| year).collect())
        .expect("year per edge")
}

/// Build an authorship table from (publication, author) pairs.
pub fn authorships(rows: &[(&str, &str)]) -> AuthorshipTable {
    let mut table = AuthorshipTable::new();
    for &(publication, author) in rows {
        table.push(publication, author);
    }
    table
}

/// Build an unweighted field table from (publication, field) pairs.
pub fn field_assignments(rows: &[(&str, i64)]) -> FieldTable {
    let mut table = FieldTable::new();
    for &(publication, field) in rows {
        table.push(publication, field);
    }
    table
}

pub fn id(value: &str) -> Id {
    Id::from(value)
}

/// The worked credit-allocation scenario: focus P by {a1, a2}, co-cited Q by
/// {a1, a3}, five distinct citers of P of which two also cite Q.
pub fn credit_scenario() -> CitationCorpus {
    let refs = references(&[
        ("c1", "P"),
        ("c2", "P"),
        ("c3", "P"),
        ("c4", "P"),
        ("c5", "P"),
        ("c1", "Q"),
        ("c2", "Q"),
    ]);
    let authors = authorships(&[("P", "a1"), ("P", "a2"), ("Q", "a1"), ("Q", "a3")]);
    CitationCorpus::new()
        .with_references(refs)
        .with_authorships(authors)
}

/// Two-field corpus with strictly within-field citation flow: publications in
/// field 1 cite only field 1, field 2 cites only field 2.
pub fn disjoint_field_corpus() -> CitationCorpus {
    let refs = references(&[("p1", "p2"), ("p2", "p1"), ("q1", "q2"), ("q2", "q1")]);
    let fields = field_assignments(&[("p1", 1), ("p2", 1), ("q1", 2), ("q2", 2)]);
    CitationCorpus::new()
        .with_references(refs)
        .with_fields(fields)
}
