//! Key encoding for ordered storage.
//!
//! This module provides key encoding that preserves sort order for range queries
//! in key-value storage backends. Keys are designed to support efficient
//! prefix-based range scans.
//!
//! # Key Prefixes
//!
//! Different data types use different key prefixes to partition the keyspace:
//!
//! - `0x01` - Vertex keys: `[0x01][vertex_id]`
//! - `0x02` - Edge keys: `[0x02][edge_id]`
//! - `0x03` - Edge by source: `[0x03][source_id][edge_id]`
//! - `0x04` - Edge by target: `[0x04][target_id][edge_id]`
//! - `0x05` - External ID index: `[0x05][vid]`
//!
//! All numeric values are encoded in big-endian format to preserve sort order.
//! Adjacency index entries store the opposite endpoint as their value, so
//! traversals can resolve neighbors without decoding edge records. The
//! external ID index maps dataset identifiers to internal vertex IDs; because
//! it is big-endian, a forward scan of the `0x05` range visits vertices in
//! ascending external ID order.

use crate::types::{EdgeId, VertexId};

/// Key prefix for vertex data.
pub const PREFIX_VERTEX: u8 = 0x01;
/// Key prefix for edge data.
pub const PREFIX_EDGE: u8 = 0x02;
/// Key prefix for edges indexed by source vertex.
pub const PREFIX_EDGE_BY_SOURCE: u8 = 0x03;
/// Key prefix for edges indexed by target vertex.
pub const PREFIX_EDGE_BY_TARGET: u8 = 0x04;
/// Key prefix for the external vertex ID index.
pub const PREFIX_VID_INDEX: u8 = 0x05;

/// Encode a vertex ID as a storage key.
///
/// The key format is: `[PREFIX_VERTEX][vertex_id as big-endian u64]`
#[inline]
#[must_use]
pub fn encode_vertex_key(id: VertexId) -> Vec<u8> {
    let mut key = Vec::with_capacity(9);
    key.push(PREFIX_VERTEX);
    key.extend_from_slice(&id.as_u64().to_be_bytes());
    key
}

/// Encode an edge ID as a storage key.
///
/// The key format is: `[PREFIX_EDGE][edge_id as big-endian u64]`
#[inline]
#[must_use]
pub fn encode_edge_key(id: EdgeId) -> Vec<u8> {
    let mut key = Vec::with_capacity(9);
    key.push(PREFIX_EDGE);
    key.extend_from_slice(&id.as_u64().to_be_bytes());
    key
}

/// Encode a key for looking up edges by source vertex.
///
/// The key format is: `[PREFIX_EDGE_BY_SOURCE][source_id][edge_id]`
///
/// This enables efficient range scans for "all edges from vertex X".
#[must_use]
pub fn encode_edge_by_source_key(source: VertexId, edge_id: EdgeId) -> Vec<u8> {
    let mut key = Vec::with_capacity(17);
    key.push(PREFIX_EDGE_BY_SOURCE);
    key.extend_from_slice(&source.as_u64().to_be_bytes());
    key.extend_from_slice(&edge_id.as_u64().to_be_bytes());
    key
}

/// Encode a prefix for scanning edges by source vertex.
///
/// Returns a key that can be used as the start of a range scan
/// for all edges from the given source vertex.
#[inline]
#[must_use]
pub fn encode_edge_by_source_prefix(source: VertexId) -> Vec<u8> {
    let mut key = Vec::with_capacity(9);
    key.push(PREFIX_EDGE_BY_SOURCE);
    key.extend_from_slice(&source.as_u64().to_be_bytes());
    key
}

/// Encode a key for looking up edges by target vertex.
///
/// The key format is: `[PREFIX_EDGE_BY_TARGET][target_id][edge_id]`
#[must_use]
pub fn encode_edge_by_target_key(target: VertexId, edge_id: EdgeId) -> Vec<u8> {
    let mut key = Vec::with_capacity(17);
    key.push(PREFIX_EDGE_BY_TARGET);
    key.extend_from_slice(&target.as_u64().to_be_bytes());
    key.extend_from_slice(&edge_id.as_u64().to_be_bytes());
    key
}

/// Encode a prefix for scanning edges by target vertex.
#[inline]
#[must_use]
pub fn encode_edge_by_target_prefix(target: VertexId) -> Vec<u8> {
    let mut key = Vec::with_capacity(9);
    key.push(PREFIX_EDGE_BY_TARGET);
    key.extend_from_slice(&target.as_u64().to_be_bytes());
    key
}

/// Encode an external vertex identifier as a key in the VID index.
///
/// The key format is: `[PREFIX_VID_INDEX][vid as big-endian u64]`
#[inline]
#[must_use]
pub fn encode_vid_index_key(vid: u64) -> Vec<u8> {
    let mut key = Vec::with_capacity(9);
    key.push(PREFIX_VID_INDEX);
    key.extend_from_slice(&vid.to_be_bytes());
    key
}

/// Encode a bare ID as an index value.
///
/// Adjacency entries store the opposite endpoint this way, and the VID index
/// stores the internal vertex ID this way.
#[inline]
#[must_use]
pub fn encode_id_value(id: u64) -> Vec<u8> {
    id.to_be_bytes().to_vec()
}

/// Decode a bare ID stored as an index value.
///
/// Returns `None` if the value doesn't have the correct format.
#[inline]
#[must_use]
pub fn decode_id_value(value: &[u8]) -> Option<u64> {
    let bytes: [u8; 8] = value.try_into().ok()?;
    Some(u64::from_be_bytes(bytes))
}

/// Decode a vertex ID from a vertex key.
///
/// Returns `None` if the key doesn't have the correct format.
#[inline]
#[must_use]
pub fn decode_vertex_key(key: &[u8]) -> Option<VertexId> {
    if key.len() != 9 || key[0] != PREFIX_VERTEX {
        return None;
    }
    let bytes: [u8; 8] = key[1..9].try_into().ok()?;
    Some(VertexId::new(u64::from_be_bytes(bytes)))
}

/// Decode an edge ID from an edge key.
///
/// Returns `None` if the key doesn't have the correct format.
#[inline]
#[must_use]
pub fn decode_edge_key(key: &[u8]) -> Option<EdgeId> {
    if key.len() != 9 || key[0] != PREFIX_EDGE {
        return None;
    }
    let bytes: [u8; 8] = key[1..9].try_into().ok()?;
    Some(EdgeId::new(u64::from_be_bytes(bytes)))
}

/// Decode an external identifier from a VID index key.
///
/// Returns `None` if the key doesn't have the correct format.
#[inline]
#[must_use]
pub fn decode_vid_index_key(key: &[u8]) -> Option<u64> {
    if key.len() != 9 || key[0] != PREFIX_VID_INDEX {
        return None;
    }
    let bytes: [u8; 8] = key[1..9].try_into().ok()?;
    Some(u64::from_be_bytes(bytes))
}

/// Decode an edge ID from an adjacency index key.
///
/// Works for both edge-by-source and edge-by-target keys.
/// Returns `None` if the key doesn't have the correct format.
#[inline]
#[must_use]
pub fn decode_adjacency_edge_id(key: &[u8]) -> Option<EdgeId> {
    if key.len() != 17 || (key[0] != PREFIX_EDGE_BY_SOURCE && key[0] != PREFIX_EDGE_BY_TARGET) {
        return None;
    }
    let bytes: [u8; 8] = key[9..17].try_into().ok()?;
    Some(EdgeId::new(u64::from_be_bytes(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_key_roundtrip() {
        for id in [0u64, 1, 42, u64::MAX] {
            let vertex_id = VertexId::new(id);
            let key = encode_vertex_key(vertex_id);
            let decoded = decode_vertex_key(&key);
            assert_eq!(decoded, Some(vertex_id));
        }
    }

    #[test]
    fn edge_key_roundtrip() {
        for id in [0u64, 1, 42, u64::MAX] {
            let edge_id = EdgeId::new(id);
            let key = encode_edge_key(edge_id);
            let decoded = decode_edge_key(&key);
            assert_eq!(decoded, Some(edge_id));
        }
    }

    #[test]
    fn vid_index_key_roundtrip() {
        for vid in [0u64, 7, 1000, u64::MAX] {
            let key = encode_vid_index_key(vid);
            assert_eq!(decode_vid_index_key(&key), Some(vid));
        }
    }

    #[test]
    fn vid_index_keys_are_ordered() {
        let key1 = encode_vid_index_key(1);
        let key2 = encode_vid_index_key(2);
        let key3 = encode_vid_index_key(100);
        assert!(key1 < key2);
        assert!(key2 < key3);
    }

    #[test]
    fn edge_by_source_keys_group_by_source() {
        let key1 = encode_edge_by_source_key(VertexId::new(1), EdgeId::new(100));
        let key2 = encode_edge_by_source_key(VertexId::new(1), EdgeId::new(200));
        let key3 = encode_edge_by_source_key(VertexId::new(2), EdgeId::new(50));

        // Keys from the same source should be grouped together
        let prefix1 = encode_edge_by_source_prefix(VertexId::new(1));
        assert!(key1.starts_with(&prefix1));
        assert!(key2.starts_with(&prefix1));
        assert!(!key3.starts_with(&prefix1));

        // Keys are ordered: source 1 edges come before source 2 edges
        assert!(key1 < key3);
        assert!(key2 < key3);
    }

    #[test]
    fn adjacency_edge_id_extraction() {
        let key = encode_edge_by_source_key(VertexId::new(5), EdgeId::new(77));
        assert_eq!(decode_adjacency_edge_id(&key), Some(EdgeId::new(77)));
        let key = encode_edge_by_target_key(VertexId::new(5), EdgeId::new(88));
        assert_eq!(decode_adjacency_edge_id(&key), Some(EdgeId::new(88)));
    }

    #[test]
    fn id_value_roundtrip() {
        for id in [0u64, 9, u64::MAX] {
            assert_eq!(decode_id_value(&encode_id_value(id)), Some(id));
        }
        assert_eq!(decode_id_value(&[1, 2, 3]), None);
    }

    #[test]
    fn decode_invalid_vertex_key() {
        // Wrong prefix
        assert_eq!(decode_vertex_key(&[PREFIX_EDGE, 0, 0, 0, 0, 0, 0, 0, 1]), None);
        // Wrong length
        assert_eq!(decode_vertex_key(&[PREFIX_VERTEX, 0, 0, 0]), None);
        // Empty
        assert_eq!(decode_vertex_key(&[]), None);
    }

    #[test]
    fn key_prefixes_partition_keyspace() {
        let vertex_key = encode_vertex_key(VertexId::new(1));
        let edge_key = encode_edge_key(EdgeId::new(1));
        let adjacency_key = encode_edge_by_source_key(VertexId::new(1), EdgeId::new(1));
        let vid_key = encode_vid_index_key(1);

        // Different prefixes ensure keys don't collide
        assert!(vertex_key[0] != edge_key[0]);
        assert!(vertex_key[0] != adjacency_key[0]);
        assert!(edge_key[0] != adjacency_key[0]);
        assert!(vid_key[0] != adjacency_key[0]);
    }
}
