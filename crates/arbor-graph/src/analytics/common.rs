//! Shared per-run graph loading for analytics kernels.
//!
//! Kernels operate on dense arrays rather than on the store directly: the
//! vertex set is collected once per run, each vertex gets a dense index,
//! and adjacency is materialized as index lists. This keeps the iteration
//! loops free of storage reads and lets synchronous kernels double-buffer
//! plain `Vec`s.

use std::collections::HashMap;

use arbor_core::VertexId;
use arbor_storage::Transaction;

use crate::index::AdjacencyIndex;
use crate::store::{GraphResult, VertexStore};

/// The vertex set of one kernel run, in ascending external identifier order.
pub(crate) struct VertexTable {
    /// External identifiers, position-aligned with `ids`.
    pub vids: Vec<u64>,
    /// Internal vertex IDs, position-aligned with `vids`.
    pub ids: Vec<VertexId>,
    /// Dense index by internal ID.
    index: HashMap<VertexId, usize>,
}

impl VertexTable {
    /// Load all vertices through the external identifier index.
    ///
    /// The scan order makes position 0 the vertex with the smallest
    /// external identifier.
    pub fn load<T: Transaction>(tx: &T) -> GraphResult<Self> {
        let mut vids = Vec::new();
        let mut ids = Vec::new();
        VertexStore::for_each_by_vid(tx, |vid, id| {
            vids.push(vid);
            ids.push(id);
            true
        })?;

        let index = ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        Ok(Self { vids, ids, index })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Find the dense position of an external identifier.
    pub fn position_of_vid(&self, vid: u64) -> Option<usize> {
        // vids is sorted ascending, courtesy of the index scan order
        self.vids.binary_search(&vid).ok()
    }

    /// Materialize outgoing adjacency as dense index lists.
    pub fn out_neighbor_lists<T: Transaction>(&self, tx: &T) -> GraphResult<Vec<Vec<usize>>> {
        let mut lists = vec![Vec::new(); self.len()];
        for (i, &id) in self.ids.iter().enumerate() {
            for neighbor in AdjacencyIndex::out_neighbors(tx, id)? {
                if let Some(&j) = self.index.get(&neighbor) {
                    lists[i].push(j);
                }
            }
        }
        Ok(lists)
    }

    /// Materialize incoming adjacency as dense index lists.
    pub fn in_neighbor_lists<T: Transaction>(&self, tx: &T) -> GraphResult<Vec<Vec<usize>>> {
        let mut lists = vec![Vec::new(); self.len()];
        for (i, &id) in self.ids.iter().enumerate() {
            for neighbor in AdjacencyIndex::in_neighbors(tx, id)? {
                if let Some(&j) = self.index.get(&neighbor) {
                    lists[i].push(j);
                }
            }
        }
        Ok(lists)
    }
}
