//! Compact index maps from identifiers to matrix positions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::Id;

/// A bijection between dataset identifiers and compact zero-based indices.
///
/// Every derived matrix in the engine is addressed by compact indices, not raw
/// ids. An `IndexMap` is built once per computation from the distinct ids that
/// participate, in sorted order, so the same input set always compacts to the
/// same layout. It is ephemeral: nothing caches one across engine calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexMap {
    forward: BTreeMap<Id, usize>,
    reverse: Vec<Id>,
}

impl IndexMap {
    /// Build an index map from identifiers, deduplicating and sorting them.
    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = Id>,
    {
        let distinct: BTreeMap<Id, ()> = ids.into_iter().map(|id| (id, ())).collect();
        let reverse: Vec<Id> = distinct.into_keys().collect();
        let forward = reverse
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();
        Self { forward, reverse }
    }

    /// The compact index of an identifier, if it participates.
    pub fn index_of(&self, id: &Id) -> Option<usize> {
        self.forward.get(id).copied()
    }

    /// The identifier at a compact index.
    pub fn id_at(&self, index: usize) -> Option<&Id> {
        self.reverse.get(index)
    }

    /// Whether an identifier participates in this map.
    pub fn contains(&self, id: &Id) -> bool {
        self.forward.contains_key(id)
    }

    /// Number of distinct identifiers.
    pub fn len(&self) -> usize {
        self.reverse.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }

    /// Iterate identifiers in index order.
    pub fn ids(&self) -> impl Iterator<Item = &Id> {
        self.reverse.iter()
    }
}
