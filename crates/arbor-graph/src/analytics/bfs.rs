//! Breadth-first search.
//!
//! Level-synchronous BFS from a single source vertex. Each reached vertex
//! receives a `distance` property holding its hop count from the source;
//! unreached vertices never receive the property.

use std::collections::HashMap;

use arbor_core::Value;
use arbor_storage::StorageEngine;
use tracing::debug;

use super::common::VertexTable;
use crate::props;
use crate::store::{BatchWriter, GraphError, GraphResult, VertexStore};

/// Configuration for breadth-first search.
#[derive(Debug, Clone)]
pub struct BfsConfig {
    /// External identifier of the source vertex.
    pub source_vid: u64,

    /// Whether to follow only outgoing edges.
    ///
    /// When `false`, the search treats the graph as undirected and follows
    /// edges in both directions. Default: `true`.
    pub directed: bool,
}

impl BfsConfig {
    /// Create a configuration for a directed search from the given source.
    #[must_use]
    pub const fn new(source_vid: u64) -> Self {
        Self { source_vid, directed: true }
    }

    /// Set whether the search follows only outgoing edges.
    #[must_use]
    pub const fn with_directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }
}

/// Result of a breadth-first search.
#[derive(Debug, Clone)]
pub struct BfsResult {
    /// Hop count from the source, keyed by external identifier.
    ///
    /// Contains only reached vertices.
    pub distances: HashMap<u64, u64>,

    /// The deepest level reached.
    pub max_depth: u64,
}

impl BfsResult {
    /// Get the distance of a vertex, or `None` if it was not reached.
    #[must_use]
    pub fn distance(&self, vid: u64) -> Option<u64> {
        self.distances.get(&vid).copied()
    }

    /// Number of vertices reached, including the source.
    #[must_use]
    pub fn reached_count(&self) -> usize {
        self.distances.len()
    }
}

/// Breadth-first search over the stored graph.
pub struct Bfs;

impl Bfs {
    /// Run BFS and persist per-vertex distances.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] if no vertex carries
    /// `config.source_vid`.
    pub fn run<E: StorageEngine>(engine: &E, config: &BfsConfig) -> GraphResult<BfsResult> {
        let tx = engine.begin_read()?;
        let table = VertexTable::load(&tx)?;
        let source = table
            .position_of_vid(config.source_vid)
            .ok_or(GraphError::VertexNotFound(config.source_vid))?;

        let out = table.out_neighbor_lists(&tx)?;
        let incoming =
            if config.directed { None } else { Some(table.in_neighbor_lists(&tx)?) };
        drop(tx);
        debug!(vertices = table.len(), directed = config.directed, "loaded graph for bfs");

        let n = table.len();
        let mut distances: Vec<Option<u64>> = vec![None; n];
        distances[source] = Some(0);

        let mut frontier = vec![source];
        let mut depth = 0u64;

        // Level-synchronous expansion: the frontier at depth d produces the
        // frontier at depth d+1. A vertex enters a frontier at most once.
        while !frontier.is_empty() {
            let mut next = Vec::new();
            for &u in &frontier {
                for &v in &out[u] {
                    if distances[v].is_none() {
                        distances[v] = Some(depth + 1);
                        next.push(v);
                    }
                }
                if let Some(incoming) = &incoming {
                    for &v in &incoming[u] {
                        if distances[v].is_none() {
                            distances[v] = Some(depth + 1);
                            next.push(v);
                        }
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            depth += 1;
            frontier = next;
        }

        let mut batch = BatchWriter::new(engine)?;
        let mut result = HashMap::new();
        for (i, distance) in distances.iter().enumerate() {
            if let Some(distance) = distance {
                VertexStore::set_property(
                    batch.tx_mut()?,
                    table.ids[i],
                    props::DISTANCE,
                    Value::Int(*distance as i64),
                )?;
                batch.record_mutation()?;
                result.insert(table.vids[i], *distance);
            }
        }
        batch.finish()?;

        debug!(reached = result.len(), max_depth = depth, "bfs finished");
        Ok(BfsResult { distances: result, max_depth: depth })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_directed() {
        let config = BfsConfig::new(7);
        assert_eq!(config.source_vid, 7);
        assert!(config.directed);
    }

    #[test]
    fn config_builder() {
        let config = BfsConfig::new(7).with_directed(false);
        assert!(!config.directed);
    }

    #[test]
    fn result_accessors() {
        let mut distances = HashMap::new();
        distances.insert(1, 0);
        distances.insert(2, 1);

        let result = BfsResult { distances, max_depth: 1 };
        assert_eq!(result.distance(1), Some(0));
        assert_eq!(result.distance(2), Some(1));
        assert_eq!(result.distance(99), None);
        assert_eq!(result.reached_count(), 2);
    }
}
