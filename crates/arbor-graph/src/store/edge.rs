//! Edge storage operations.
//!
//! This module provides CRUD operations for edges in the graph.

use std::ops::Bound;

use arbor_core::encoding::keys::{
    encode_edge_by_source_key, encode_edge_by_target_key, encode_edge_key, encode_id_value,
    PREFIX_EDGE,
};
use arbor_core::encoding::{Decoder, Encoder};
use arbor_core::{Edge, EdgeId, VertexId};
use arbor_storage::{Cursor, Transaction};

use super::error::{GraphError, GraphResult};
use super::vertex::VertexStore;
use super::IdGenerator;

/// Table name for edge data.
pub const TABLE_EDGES: &str = "edges";

/// Table name for edges indexed by source vertex.
pub const TABLE_EDGES_OUT: &str = "edges_out";

/// Table name for edges indexed by target vertex.
pub const TABLE_EDGES_IN: &str = "edges_in";

/// Edge storage operations.
///
/// `EdgeStore` provides transactional CRUD operations for graph edges.
/// All operations work within a transaction context for ACID guarantees.
///
/// # Indexes
///
/// Each edge is indexed by its source vertex (for outgoing traversals) and
/// its target vertex (for incoming traversals). The index entries store the
/// opposite endpoint as their value, so traversals can resolve neighbors
/// without decoding edge records.
///
/// Edges are directed. An undirected graph stores each relation as a pair
/// of edges, one per direction.
///
/// # Example
///
/// ```ignore
/// use arbor_graph::store::{EdgeStore, VertexStore, IdGenerator};
///
/// let gen = IdGenerator::new();
/// let edge = EdgeStore::create(&mut tx, &gen, alice.id, bob.id, |id| {
///     Edge::new(id, alice.id, bob.id)
/// })?;
/// ```
pub struct EdgeStore;

impl EdgeStore {
    /// Create a new edge in the store.
    ///
    /// # Arguments
    ///
    /// * `tx` - The transaction to use
    /// * `id_gen` - The ID generator
    /// * `source` - The source vertex ID
    /// * `target` - The target vertex ID
    /// * `builder` - A function that builds the edge given an ID
    ///
    /// # Returns
    ///
    /// The created edge with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertexReference`] if source or target
    /// doesn't exist.
    pub fn create<T: Transaction, F>(
        tx: &mut T,
        id_gen: &IdGenerator,
        source: VertexId,
        target: VertexId,
        builder: F,
    ) -> GraphResult<Edge>
    where
        F: FnOnce(EdgeId) -> Edge,
    {
        // Verify source and target exist
        if !VertexStore::exists(tx, source)? {
            return Err(GraphError::InvalidVertexReference(source));
        }
        if !VertexStore::exists(tx, target)? {
            return Err(GraphError::InvalidVertexReference(target));
        }

        let id = id_gen.next_edge_id();
        let edge = builder(id);

        Self::store_edge(tx, &edge)?;
        Ok(edge)
    }

    /// Internal helper to store an edge and its adjacency index entries.
    fn store_edge<T: Transaction>(tx: &mut T, edge: &Edge) -> GraphResult<()> {
        // Store the edge data
        let key = encode_edge_key(edge.id);
        let value = edge.encode()?;
        tx.put(TABLE_EDGES, &key, &value)?;

        // Index both directions, storing the opposite endpoint as the value
        let out_key = encode_edge_by_source_key(edge.source, edge.id);
        tx.put(TABLE_EDGES_OUT, &out_key, &encode_id_value(edge.target.as_u64()))?;

        let in_key = encode_edge_by_target_key(edge.target, edge.id);
        tx.put(TABLE_EDGES_IN, &in_key, &encode_id_value(edge.source.as_u64()))?;

        Ok(())
    }

    /// Get an edge by ID.
    ///
    /// # Returns
    ///
    /// The edge if found, or `None` if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge cannot be decoded.
    pub fn get<T: Transaction>(tx: &T, id: EdgeId) -> GraphResult<Option<Edge>> {
        let key = encode_edge_key(id);
        match tx.get(TABLE_EDGES, &key)? {
            Some(value) => {
                let edge = Edge::decode(&value)?;
                Ok(Some(edge))
            }
            None => Ok(None),
        }
    }

    /// Get an edge by ID, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EdgeNotFound`] if the edge doesn't exist.
    pub fn get_or_error<T: Transaction>(tx: &T, id: EdgeId) -> GraphResult<Edge> {
        Self::get(tx, id)?.ok_or(GraphError::EdgeNotFound(id))
    }

    /// Check if an edge exists.
    pub fn exists<T: Transaction>(tx: &T, id: EdgeId) -> GraphResult<bool> {
        let key = encode_edge_key(id);
        Ok(tx.get(TABLE_EDGES, &key)?.is_some())
    }

    /// Count all edges in the store.
    pub fn count<T: Transaction>(tx: &T) -> GraphResult<usize> {
        let start = [PREFIX_EDGE];
        let end = [PREFIX_EDGE + 1];

        let cursor_result = tx.range(
            TABLE_EDGES,
            Bound::Included(start.as_slice()),
            Bound::Excluded(end.as_slice()),
        );

        // Handle table not existing (empty store)
        let mut cursor = match cursor_result {
            Ok(c) => c,
            Err(arbor_storage::StorageError::TableNotFound(_)) => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut count = 0;
        while cursor.next()?.is_some() {
            count += 1;
        }

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Note: Integration tests with actual storage backend are in the tests/ directory

    #[test]
    fn table_names_are_valid() {
        assert!(!TABLE_EDGES.is_empty());
        assert!(!TABLE_EDGES_OUT.is_empty());
        assert!(!TABLE_EDGES_IN.is_empty());
        assert_ne!(TABLE_EDGES_OUT, TABLE_EDGES_IN);
    }
}
