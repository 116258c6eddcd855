//! Coordinate sparse matrices with accumulate-on-insert semantics
//!
//! The shared intermediate representation of every derived structure in the
//! engine. Entries are kept in a sorted map keyed by (row, col), so insertion
//! of a duplicate coordinate accumulates instead of overwriting, iteration is
//! deterministic row-major, and per-row scans are range queries. Dense export
//! goes through [`ndarray::Array2`] for the final distance/allocation math.

use std::collections::BTreeMap;

use ndarray::Array2;

use crate::error::{NetworkError, NetworkResult};

/// A sparse matrix in coordinate form.
///
/// Out-of-range coordinates are a programming error, not input data: callers
/// map ids through an `IndexMap` first and drop anything unmapped.
#[derive(Debug, Clone, PartialEq)]
pub struct CooMatrix {
    rows: usize,
    cols: usize,
    entries: BTreeMap<(usize, usize), f64>,
}

impl CooMatrix {
    /// Create an all-zero matrix of the given shape.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            entries: BTreeMap::new(),
        }
    }

    /// Shape as (rows, cols).
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of explicitly stored entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entry has been stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add `value` at (row, col), accumulating with any existing entry.
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        debug_assert!(row < self.rows && col < self.cols);
        *self.entries.entry((row, col)).or_insert(0.0) += value;
    }

    /// The value at (row, col); zero if no entry is stored.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.entries.get(&(row, col)).copied().unwrap_or(0.0)
    }

    /// Iterate stored entries in row-major order as (row, col, value).
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.entries.iter().map(|(&(r, c), &v)| (r, c, v))
    }

    /// Iterate the stored entries of one row as (col, value).
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries
            .range((row, 0)..(row + 1, 0))
            .map(|(&(_, c), &v)| (c, v))
    }

    /// Add every entry of `other` into this matrix. Shapes must match.
    pub fn add_assign(&mut self, other: &CooMatrix) -> NetworkResult<()> {
        if self.shape() != other.shape() {
            return Err(NetworkError::ShapeMismatch {
                expected_rows: self.rows,
                expected_cols: self.cols,
                actual_rows: other.rows,
                actual_cols: other.cols,
            });
        }
        for (r, c, v) in other.iter() {
            self.add(r, c, v);
        }
        Ok(())
    }

    /// Project the columns onto each other: the symmetric matrix BᵀB.
    ///
    /// For a citing-by-cited presence matrix this is exactly the co-citation
    /// network: entry (i, j) counts the citers shared by columns i and j, and
    /// the diagonal carries each column's direct citation count.
    pub fn project_columns(&self) -> SymmetricMatrix {
        let mut projected = SymmetricMatrix::new(self.cols);
        let mut row_entries: Vec<(usize, f64)> = Vec::new();
        let mut current_row = usize::MAX;
        let flush = |entries: &[(usize, f64)], out: &mut SymmetricMatrix| {
            for (a, &(ci, vi)) in entries.iter().enumerate() {
                for &(cj, vj) in &entries[a..] {
                    out.add(ci, cj, vi * vj);
                }
            }
        };
        for (r, c, v) in self.iter() {
            if r != current_row {
                flush(&row_entries, &mut projected);
                row_entries.clear();
                current_row = r;
            }
            row_entries.push((c, v));
        }
        flush(&row_entries, &mut projected);
        projected
    }

    /// Materialize as a dense array.
    pub fn to_dense(&self) -> Array2<f64> {
        let mut dense = Array2::zeros((self.rows, self.cols));
        for (r, c, v) in self.iter() {
            dense[[r, c]] = v;
        }
        dense
    }
}

/// A symmetric square matrix storing each unordered pair once.
///
/// Entries are keyed (lo, hi) with lo <= hi; reads materialize both triangles,
/// so `get(i, j)` always equals `get(j, i)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetricMatrix {
    n: usize,
    entries: BTreeMap<(usize, usize), f64>,
}

impl SymmetricMatrix {
    /// Create an all-zero symmetric matrix over `n` nodes.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            entries: BTreeMap::new(),
        }
    }

    /// Number of nodes on each axis.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Whether the matrix has no nodes at all (distinct from all-zero).
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Number of stored unordered pairs.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Add `value` at the unordered pair (i, j), accumulating.
    pub fn add(&mut self, i: usize, j: usize, value: f64) {
        debug_assert!(i < self.n && j < self.n);
        let key = if i <= j { (i, j) } else { (j, i) };
        *self.entries.entry(key).or_insert(0.0) += value;
    }

    /// The value at (i, j); zero if the pair is not stored.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        let key = if i <= j { (i, j) } else { (j, i) };
        self.entries.get(&key).copied().unwrap_or(0.0)
    }

    /// Iterate stored pairs once each as (lo, hi, value) with lo <= hi.
    pub fn iter_upper(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.entries.iter().map(|(&(i, j), &v)| (i, j, v))
    }

    /// The full row `i`, both triangles materialized, as (col, value).
    pub fn row(&self, i: usize) -> Vec<(usize, f64)> {
        let mut out: Vec<(usize, f64)> = self
            .entries
            .iter()
            .filter_map(|(&(lo, hi), &v)| {
                if lo == i {
                    Some((hi, v))
                } else if hi == i {
                    Some((lo, v))
                } else {
                    None
                }
            })
            .collect();
        out.sort_by_key(|&(c, _)| c);
        out
    }
}
