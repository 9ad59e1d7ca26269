//! ID generation for vertices and edges.
//!
//! This module provides monotonically increasing ID generators that are
//! thread-safe and can be re-seeded from existing data.

use std::sync::atomic::{AtomicU64, Ordering};

use arbor_core::{EdgeId, VertexId};

/// A monotonic ID generator.
///
/// Generates unique, monotonically increasing internal IDs. The generator is
/// thread-safe and can be shared across threads. IDs start from 1 (0 is
/// reserved for "no ID").
///
/// # Persistence
///
/// The generator can be initialized with the highest existing ID to resume
/// after reopening a database. Use [`IdGenerator::with_start`] to set the
/// starting values.
///
/// # Example
///
/// ```
/// use arbor_graph::store::IdGenerator;
///
/// let gen = IdGenerator::new();
/// let id1 = gen.next_vertex_id();
/// let id2 = gen.next_vertex_id();
/// assert!(id1.as_u64() < id2.as_u64());
/// ```
#[derive(Debug)]
pub struct IdGenerator {
    /// The next vertex ID to assign.
    next_vertex_id: AtomicU64,
    /// The next edge ID to assign.
    next_edge_id: AtomicU64,
}

impl IdGenerator {
    /// Create a new ID generator starting from 1.
    #[must_use]
    pub const fn new() -> Self {
        Self { next_vertex_id: AtomicU64::new(1), next_edge_id: AtomicU64::new(1) }
    }

    /// Create an ID generator starting from specific values.
    ///
    /// Use this to resume ID generation after loading existing data.
    /// The provided values should be one greater than the highest existing IDs.
    #[must_use]
    pub const fn with_start(vertex_start: u64, edge_start: u64) -> Self {
        Self {
            next_vertex_id: AtomicU64::new(vertex_start),
            next_edge_id: AtomicU64::new(edge_start),
        }
    }

    /// Generate the next vertex ID.
    ///
    /// This operation is atomic and thread-safe.
    pub fn next_vertex_id(&self) -> VertexId {
        let id = self.next_vertex_id.fetch_add(1, Ordering::Relaxed);
        VertexId::new(id)
    }

    /// Generate the next edge ID.
    ///
    /// This operation is atomic and thread-safe.
    pub fn next_edge_id(&self) -> EdgeId {
        let id = self.next_edge_id.fetch_add(1, Ordering::Relaxed);
        EdgeId::new(id)
    }

    /// Get the current vertex ID counter value (next ID to be assigned).
    #[must_use]
    pub fn current_vertex_counter(&self) -> u64 {
        self.next_vertex_id.load(Ordering::Relaxed)
    }

    /// Get the current edge ID counter value (next ID to be assigned).
    #[must_use]
    pub fn current_edge_counter(&self) -> u64 {
        self.next_edge_id.load(Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_generator_starts_at_one() {
        let gen = IdGenerator::new();
        assert_eq!(gen.next_vertex_id().as_u64(), 1);
        assert_eq!(gen.next_edge_id().as_u64(), 1);
    }

    #[test]
    fn ids_are_monotonically_increasing() {
        let gen = IdGenerator::new();
        let ids: Vec<_> = (0..100).map(|_| gen.next_vertex_id().as_u64()).collect();
        for window in ids.windows(2) {
            assert!(window[0] < window[1]);
        }
    }

    #[test]
    fn with_start_sets_initial_values() {
        let gen = IdGenerator::with_start(100, 200);
        assert_eq!(gen.next_vertex_id().as_u64(), 100);
        assert_eq!(gen.next_edge_id().as_u64(), 200);
        assert_eq!(gen.next_vertex_id().as_u64(), 101);
        assert_eq!(gen.next_edge_id().as_u64(), 201);
    }

    #[test]
    fn current_counter_reflects_next_id() {
        let gen = IdGenerator::new();
        assert_eq!(gen.current_vertex_counter(), 1);
        gen.next_vertex_id();
        assert_eq!(gen.current_vertex_counter(), 2);
    }

    #[test]
    fn vertex_and_edge_ids_are_independent() {
        let gen = IdGenerator::new();
        assert_eq!(gen.next_vertex_id().as_u64(), 1);
        assert_eq!(gen.next_vertex_id().as_u64(), 2);
        assert_eq!(gen.next_edge_id().as_u64(), 1);
        assert_eq!(gen.next_vertex_id().as_u64(), 3);
        assert_eq!(gen.next_edge_id().as_u64(), 2);
    }
}
