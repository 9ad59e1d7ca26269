//! Edge types for the graph.

use serde::{Deserialize, Serialize};

use super::{EdgeId, VertexId};

/// A directed edge between two vertices in the graph.
///
/// The store has a single relationship kind. Undirected graphs are
/// represented by materializing the explicit reverse edge, so every stored
/// edge is directed from `source` to `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge.
    pub id: EdgeId,
    /// The source vertex ID.
    pub source: VertexId,
    /// The target vertex ID.
    pub target: VertexId,
    /// Optional edge weight, loaded for weighted datasets.
    pub weight: Option<f64>,
}

impl Edge {
    /// Create a new unweighted edge between two vertices.
    #[must_use]
    pub const fn new(id: EdgeId, source: VertexId, target: VertexId) -> Self {
        Self { id, source, target, weight: None }
    }

    /// Set the edge weight.
    #[must_use]
    pub const fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_creation() {
        let edge = Edge::new(EdgeId::new(1), VertexId::new(10), VertexId::new(20));
        assert_eq!(edge.id.as_u64(), 1);
        assert_eq!(edge.source.as_u64(), 10);
        assert_eq!(edge.target.as_u64(), 20);
        assert_eq!(edge.weight, None);
    }

    #[test]
    fn weighted_edge() {
        let edge = Edge::new(EdgeId::new(1), VertexId::new(1), VertexId::new(2)).with_weight(0.5);
        assert_eq!(edge.weight, Some(0.5));
    }
}
