//! Adjacency list index for graph traversal.
//!
//! This module provides efficient neighbor queries for both outgoing and
//! incoming edges using composite key prefix scans.

use std::ops::Bound;

use arbor_core::encoding::keys::{
    decode_id_value, encode_edge_by_source_prefix, encode_edge_by_target_prefix,
};
use arbor_core::VertexId;
use arbor_storage::{Cursor, Transaction};

use crate::store::{GraphError, GraphResult, TABLE_EDGES_IN, TABLE_EDGES_OUT};

/// Which edges to follow when traversing from a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Follow edges where the vertex is the source.
    Outgoing,
    /// Follow edges where the vertex is the target.
    Incoming,
    /// Follow edges in both directions.
    Both,
}

/// Adjacency list index for efficient neighbor lookups.
///
/// `AdjacencyIndex` provides traversal operations by using composite keys
/// that enable prefix-based range scans.
///
/// # Key Format
///
/// Outgoing index: `[prefix][source_id][edge_id]`, value = target ID
/// Incoming index: `[prefix][target_id][edge_id]`, value = source ID
///
/// Because the opposite endpoint is stored as the index value, neighbor
/// queries never need to read edge records. A scan for "all neighbors of
/// vertex X" is O(k) where k is the number of matching edges.
pub struct AdjacencyIndex;

impl AdjacencyIndex {
    /// Get all outgoing neighbors of a vertex.
    ///
    /// A vertex with parallel edges to the same neighbor appears once per
    /// edge in the result.
    pub fn out_neighbors<T: Transaction>(tx: &T, source: VertexId) -> GraphResult<Vec<VertexId>> {
        let prefix = encode_edge_by_source_prefix(source);
        Self::scan_neighbors(tx, TABLE_EDGES_OUT, &prefix)
    }

    /// Get all incoming neighbors of a vertex.
    pub fn in_neighbors<T: Transaction>(tx: &T, target: VertexId) -> GraphResult<Vec<VertexId>> {
        let prefix = encode_edge_by_target_prefix(target);
        Self::scan_neighbors(tx, TABLE_EDGES_IN, &prefix)
    }

    /// Get the neighbors of a vertex in the given direction.
    ///
    /// For [`Direction::Both`], outgoing neighbors come first, then
    /// incoming. A bidirectional edge pair contributes the neighbor twice.
    pub fn neighbors<T: Transaction>(
        tx: &T,
        vertex: VertexId,
        direction: Direction,
    ) -> GraphResult<Vec<VertexId>> {
        match direction {
            Direction::Outgoing => Self::out_neighbors(tx, vertex),
            Direction::Incoming => Self::in_neighbors(tx, vertex),
            Direction::Both => {
                let mut all = Self::out_neighbors(tx, vertex)?;
                all.extend(Self::in_neighbors(tx, vertex)?);
                Ok(all)
            }
        }
    }

    /// Count outgoing edges from a vertex.
    ///
    /// This is the vertex's out-degree.
    pub fn count_outgoing<T: Transaction>(tx: &T, source: VertexId) -> GraphResult<usize> {
        let prefix = encode_edge_by_source_prefix(source);
        let mut cursor = Self::prefix_cursor(tx, TABLE_EDGES_OUT, &prefix)?;

        let mut count = 0;
        while cursor.next()?.is_some() {
            count += 1;
        }

        Ok(count)
    }

    /// Check if a vertex has any outgoing edges.
    pub fn has_outgoing<T: Transaction>(tx: &T, source: VertexId) -> GraphResult<bool> {
        let prefix = encode_edge_by_source_prefix(source);
        let mut cursor = Self::prefix_cursor(tx, TABLE_EDGES_OUT, &prefix)?;
        Ok(cursor.next()?.is_some())
    }

    /// Compute the exclusive upper bound for a prefix scan.
    ///
    /// Trailing `0xFF` bytes are dropped and the last incrementable byte is
    /// bumped, so the bound always sorts above every key carrying the
    /// prefix. Returns `None` when every byte is `0xFF`, in which case no
    /// finite bound exists and the scan must run unbounded.
    fn increment_prefix(prefix: &[u8]) -> Option<Vec<u8>> {
        let mut end_prefix = prefix.to_vec();
        while let Some(last) = end_prefix.last_mut() {
            if *last < 255 {
                *last += 1;
                return Some(end_prefix);
            }
            end_prefix.pop();
        }
        None
    }

    /// Open a cursor bounded to keys carrying the given prefix.
    fn prefix_cursor<'t, T: Transaction>(
        tx: &'t T,
        table: &str,
        prefix: &[u8],
    ) -> GraphResult<T::Cursor<'t>> {
        let cursor = match Self::increment_prefix(prefix) {
            Some(end_prefix) => tx.range(
                table,
                Bound::Included(prefix),
                Bound::Excluded(end_prefix.as_slice()),
            )?,
            None => tx.range(table, Bound::Included(prefix), Bound::Unbounded)?,
        };
        Ok(cursor)
    }

    /// Scan neighbor IDs from an index table with a prefix.
    fn scan_neighbors<T: Transaction>(
        tx: &T,
        table: &str,
        prefix: &[u8],
    ) -> GraphResult<Vec<VertexId>> {
        let mut cursor = Self::prefix_cursor(tx, table, prefix)?;

        let mut ids = Vec::new();
        while let Some((_, value)) = cursor.next()? {
            let neighbor = decode_id_value(&value).ok_or_else(|| {
                GraphError::Encoding("malformed adjacency index entry".to_string())
            })?;
            ids.push(VertexId::new(neighbor));
        }

        Ok(ids)
    }
}
