//! Bipartite projection of relation rows onto a sparse matrix

use imcite_relations::{Id, IndexMap};

use crate::error::{NetworkError, NetworkResult};
use crate::sparse::CooMatrix;

/// Build a sparse matrix from (source, target, weight) rows.
///
/// The shape is given by the two index maps. Duplicate (source, target) pairs
/// accumulate; rows whose source or target id is absent from its index map
/// are dropped, not erred. Deterministic for a fixed pair of index maps.
pub fn bipartite_matrix<'a, I>(rows: I, source_index: &IndexMap, target_index: &IndexMap) -> CooMatrix
where
    I: IntoIterator<Item = (&'a Id, &'a Id, f64)>,
{
    let mut matrix = CooMatrix::new(source_index.len(), target_index.len());
    accumulate_rows(&mut matrix, rows, source_index, target_index);
    matrix
}

/// Add (source, target, weight) rows into an existing accumulator matrix.
///
/// The batched field-distance accumulation adds each batch's contribution
/// into one running matrix; the accumulator shape must match the index maps.
pub fn bipartite_accumulate<'a, I>(
    accumulator: &mut CooMatrix,
    rows: I,
    source_index: &IndexMap,
    target_index: &IndexMap,
) -> NetworkResult<()>
where
    I: IntoIterator<Item = (&'a Id, &'a Id, f64)>,
{
    let (rows_len, cols_len) = accumulator.shape();
    if rows_len != source_index.len() {
        return Err(NetworkError::AxisMismatch {
            axis: "source",
            map_len: source_index.len(),
            axis_len: rows_len,
        });
    }
    if cols_len != target_index.len() {
        return Err(NetworkError::AxisMismatch {
            axis: "target",
            map_len: target_index.len(),
            axis_len: cols_len,
        });
    }
    accumulate_rows(accumulator, rows, source_index, target_index);
    Ok(())
}

fn accumulate_rows<'a, I>(
    matrix: &mut CooMatrix,
    rows: I,
    source_index: &IndexMap,
    target_index: &IndexMap,
) where
    I: IntoIterator<Item = (&'a Id, &'a Id, f64)>,
{
    for (source, target, weight) in rows {
        let (Some(r), Some(c)) = (source_index.index_of(source), target_index.index_of(target))
        else {
            continue;
        };
        matrix.add(r, c, weight);
    }
}
