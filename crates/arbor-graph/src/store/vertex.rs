//! Vertex storage operations.
//!
//! This module provides CRUD operations for vertices in the graph, plus the
//! external identifier index that maps dataset vertex IDs to internal IDs.

use std::ops::Bound;

use arbor_core::encoding::keys::{
    decode_id_value, decode_vid_index_key, encode_id_value, encode_vertex_key,
    encode_vid_index_key, PREFIX_VERTEX, PREFIX_VID_INDEX,
};
use arbor_core::encoding::{Decoder, Encoder};
use arbor_core::{Value, Vertex, VertexId};
use arbor_storage::{Cursor, Transaction};

use super::error::{GraphError, GraphResult};
use super::IdGenerator;

/// Table name for vertex data.
pub const TABLE_VERTICES: &str = "vertices";

/// Table name for the external identifier index.
pub const TABLE_VERTEX_IDS: &str = "vertex_ids";

/// Vertex storage operations.
///
/// `VertexStore` provides transactional CRUD operations for graph vertices.
/// All operations work within a transaction context for ACID guarantees.
///
/// Every vertex carries an external identifier (the `vid` from the source
/// dataset) alongside its internal ID. The external identifier index lets
/// callers resolve dataset IDs to stored vertices, and because its keys are
/// big-endian, a forward scan visits vertices in ascending external ID order.
///
/// # Example
///
/// ```ignore
/// use arbor_graph::store::{VertexStore, IdGenerator};
///
/// // Create a vertex for dataset ID 42
/// let gen = IdGenerator::new();
/// let vertex = VertexStore::create(&mut tx, &gen, 42, |id| Vertex::new(id, 42))?;
///
/// // Resolve it back by its dataset ID
/// let retrieved = VertexStore::resolve_vid(&tx, 42)?;
/// assert_eq!(retrieved.id, vertex.id);
/// ```
pub struct VertexStore;

impl VertexStore {
    /// Create a new vertex in the store.
    ///
    /// The provided function receives a new unique internal ID and should
    /// return the vertex to store. The vertex is indexed under the given
    /// external identifier.
    ///
    /// # Arguments
    ///
    /// * `tx` - The transaction to use
    /// * `id_gen` - The ID generator
    /// * `vid` - The external identifier for this vertex
    /// * `builder` - A function that builds the vertex given an ID
    ///
    /// # Returns
    ///
    /// The created vertex with its assigned internal ID.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexAlreadyExists`] if a vertex with this
    /// external identifier already exists.
    pub fn create<T: Transaction, F>(
        tx: &mut T,
        id_gen: &IdGenerator,
        vid: u64,
        builder: F,
    ) -> GraphResult<Vertex>
    where
        F: FnOnce(VertexId) -> Vertex,
    {
        let vid_key = encode_vid_index_key(vid);
        if tx.get(TABLE_VERTEX_IDS, &vid_key)?.is_some() {
            return Err(GraphError::VertexAlreadyExists(vid));
        }

        let id = id_gen.next_vertex_id();
        let vertex = builder(id);

        // Encode and store the vertex
        let key = encode_vertex_key(id);
        let value = vertex.encode()?;
        tx.put(TABLE_VERTICES, &key, &value)?;

        // Index the external identifier
        tx.put(TABLE_VERTEX_IDS, &vid_key, &encode_id_value(id.as_u64()))?;

        Ok(vertex)
    }

    /// Get a vertex by internal ID.
    ///
    /// # Returns
    ///
    /// The vertex if found, or `None` if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex cannot be decoded.
    pub fn get<T: Transaction>(tx: &T, id: VertexId) -> GraphResult<Option<Vertex>> {
        let key = encode_vertex_key(id);
        match tx.get(TABLE_VERTICES, &key)? {
            Some(value) => {
                let vertex = Vertex::decode(&value)?;
                Ok(Some(vertex))
            }
            None => Ok(None),
        }
    }

    /// Look up the internal ID for an external identifier.
    ///
    /// # Returns
    ///
    /// The internal vertex ID if a vertex with this external identifier
    /// exists, or `None` otherwise.
    pub fn lookup_vid<T: Transaction>(tx: &T, vid: u64) -> GraphResult<Option<VertexId>> {
        let key = encode_vid_index_key(vid);
        match tx.get(TABLE_VERTEX_IDS, &key)? {
            Some(value) => {
                let id = decode_id_value(&value).ok_or_else(|| {
                    GraphError::Encoding(format!("malformed vertex ID index entry for vid {vid}"))
                })?;
                Ok(Some(VertexId::new(id)))
            }
            None => Ok(None),
        }
    }

    /// Resolve an external identifier to its vertex.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] if no vertex carries this
    /// external identifier.
    pub fn resolve_vid<T: Transaction>(tx: &T, vid: u64) -> GraphResult<Vertex> {
        let id = Self::lookup_vid(tx, vid)?.ok_or(GraphError::VertexNotFound(vid))?;
        Self::get(tx, id)?.ok_or(GraphError::VertexNotFound(vid))
    }

    /// Check if a vertex exists.
    pub fn exists<T: Transaction>(tx: &T, id: VertexId) -> GraphResult<bool> {
        let key = encode_vertex_key(id);
        Ok(tx.get(TABLE_VERTICES, &key)?.is_some())
    }

    /// Update an existing vertex.
    ///
    /// This replaces the entire vertex record. The external identifier is
    /// immutable; attempting to change it is an error.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertexReference`] if the vertex doesn't
    /// exist.
    pub fn update<T: Transaction>(tx: &mut T, vertex: &Vertex) -> GraphResult<()> {
        let key = encode_vertex_key(vertex.id);

        let old_value =
            tx.get(TABLE_VERTICES, &key)?.ok_or(GraphError::InvalidVertexReference(vertex.id))?;
        let old_vertex = Vertex::decode(&old_value)?;
        if old_vertex.vid != vertex.vid {
            return Err(GraphError::Internal(format!(
                "external identifier is immutable: vertex {:?} has vid {}, update carries {}",
                vertex.id, old_vertex.vid, vertex.vid
            )));
        }

        let value = vertex.encode()?;
        tx.put(TABLE_VERTICES, &key, &value)?;
        Ok(())
    }

    /// Set a single property on a vertex.
    ///
    /// Reads the vertex, sets the property, and writes it back.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertexReference`] if the vertex doesn't
    /// exist.
    pub fn set_property<T: Transaction>(
        tx: &mut T,
        id: VertexId,
        name: &str,
        value: Value,
    ) -> GraphResult<()> {
        let key = encode_vertex_key(id);
        let old_value = tx.get(TABLE_VERTICES, &key)?.ok_or(GraphError::InvalidVertexReference(id))?;
        let mut vertex = Vertex::decode(&old_value)?;
        vertex.set_property(name, value);
        let encoded = vertex.encode()?;
        tx.put(TABLE_VERTICES, &key, &encoded)?;
        Ok(())
    }

    /// Count all vertices in the store.
    pub fn count<T: Transaction>(tx: &T) -> GraphResult<usize> {
        let start = [PREFIX_VERTEX];
        let end = [PREFIX_VERTEX + 1];

        let cursor_result = tx.range(
            TABLE_VERTICES,
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

    /// Iterate over all vertices in internal ID order.
    ///
    /// # Arguments
    ///
    /// * `tx` - The transaction to use
    /// * `f` - A function to call for each vertex. Return `false` to stop iteration.
    ///
    /// # Errors
    ///
    /// Returns an error if iteration fails or if any vertex cannot be decoded.
    pub fn for_each<T: Transaction, F>(tx: &T, mut f: F) -> GraphResult<()>
    where
        F: FnMut(&Vertex) -> bool,
    {
        let start = [PREFIX_VERTEX];
        let end = [PREFIX_VERTEX + 1];

        let cursor_result = tx.range(
            TABLE_VERTICES,
            Bound::Included(start.as_slice()),
            Bound::Excluded(end.as_slice()),
        );

        // Handle table not existing (empty store)
        let mut cursor = match cursor_result {
            Ok(c) => c,
            Err(arbor_storage::StorageError::TableNotFound(_)) => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        while let Some((_, value)) = cursor.next()? {
            let vertex = Vertex::decode(&value)?;
            if !f(&vertex) {
                break;
            }
        }

        Ok(())
    }

    /// Iterate over all vertices in ascending external identifier order.
    ///
    /// Scans the external identifier index, calling `f` with each external
    /// identifier and its internal vertex ID. Return `false` from `f` to stop
    /// iteration.
    pub fn for_each_by_vid<T: Transaction, F>(tx: &T, mut f: F) -> GraphResult<()>
    where
        F: FnMut(u64, VertexId) -> bool,
    {
        let start = [PREFIX_VID_INDEX];
        let end = [PREFIX_VID_INDEX + 1];

        let cursor_result = tx.range(
            TABLE_VERTEX_IDS,
            Bound::Included(start.as_slice()),
            Bound::Excluded(end.as_slice()),
        );

        // Handle table not existing (empty store)
        let mut cursor = match cursor_result {
            Ok(c) => c,
            Err(arbor_storage::StorageError::TableNotFound(_)) => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        while let Some((key, value)) = cursor.next()? {
            let Some(vid) = decode_vid_index_key(&key) else {
                continue;
            };
            let id = decode_id_value(&value).ok_or_else(|| {
                GraphError::Encoding(format!("malformed vertex ID index entry for vid {vid}"))
            })?;
            if !f(vid, VertexId::new(id)) {
                break;
            }
        }

        Ok(())
    }

    /// Get all vertices as a vector.
    ///
    /// Use with caution on large datasets - prefer [`Self::for_each`] for
    /// processing vertices without loading all into memory.
    pub fn all<T: Transaction>(tx: &T) -> GraphResult<Vec<Vertex>> {
        let mut vertices = Vec::new();
        Self::for_each(tx, |vertex| {
            vertices.push(vertex.clone());
            true
        })?;
        Ok(vertices)
    }

    /// Find the highest external identifier in the store.
    ///
    /// This is what graph generators use to pick identifiers for new
    /// vertices.
    ///
    /// # Returns
    ///
    /// The highest external identifier, or `None` if the store is empty.
    pub fn max_vid<T: Transaction>(tx: &T) -> GraphResult<Option<u64>> {
        let start = [PREFIX_VID_INDEX];
        let end = [PREFIX_VID_INDEX + 1];

        let cursor_result = tx.range(
            TABLE_VERTEX_IDS,
            Bound::Included(start.as_slice()),
            Bound::Excluded(end.as_slice()),
        );

        // Handle table not existing (empty store)
        let mut cursor = match cursor_result {
            Ok(c) => c,
            Err(arbor_storage::StorageError::TableNotFound(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        // Big-endian keys mean the last index entry has the highest vid
        if let Some((key, _)) = cursor.seek_last()? {
            return Ok(decode_vid_index_key(&key));
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Note: Integration tests with actual storage backend are in the tests/ directory

    #[test]
    fn table_names_are_valid() {
        assert!(!TABLE_VERTICES.is_empty());
        assert!(!TABLE_VERTEX_IDS.is_empty());
        assert_ne!(TABLE_VERTICES, TABLE_VERTEX_IDS);
    }
}
