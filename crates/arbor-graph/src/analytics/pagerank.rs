//! PageRank.
//!
//! Fixed-iteration power method over incoming edges. There is no convergence
//! check: the kernel always performs exactly `max_iterations` iterations, so
//! two runs with the same configuration produce identical scores.
//!
//! # Formula
//!
//! With damping factor `d` and `N` vertices:
//!
//! `PR(v) = (1-d)/N + d * (dangling/N + Σ PR(u)/outdeg(u))`
//!
//! summing over vertices `u` with an edge to `v`. `dangling` is the rank
//! held by vertices without outgoing edges, redistributed uniformly.

use std::collections::HashMap;

use arbor_core::Value;
use arbor_storage::StorageEngine;
use tracing::debug;

use super::common::VertexTable;
use crate::props;
use crate::store::{BatchWriter, GraphError, GraphResult, VertexStore};

/// Configuration for PageRank.
#[derive(Debug, Clone)]
pub struct PageRankConfig {
    /// Number of power iterations to perform. Default: 10.
    pub max_iterations: usize,

    /// Damping factor (probability of following a link vs a random jump).
    /// Must be in `[0, 1]`. Default: 0.85.
    pub damping_factor: f64,

    /// Vertex count override.
    ///
    /// When set, `N` in the formula uses this value instead of counting
    /// stored vertices. Callers that already know the graph size can skip
    /// the count.
    pub vertex_count: Option<usize>,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self { max_iterations: 10, damping_factor: 0.85, vertex_count: None }
    }
}

impl PageRankConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of iterations.
    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the damping factor.
    #[must_use]
    pub const fn with_damping_factor(mut self, damping_factor: f64) -> Self {
        self.damping_factor = damping_factor;
        self
    }

    /// Set the vertex count override.
    #[must_use]
    pub const fn with_vertex_count(mut self, vertex_count: usize) -> Self {
        self.vertex_count = Some(vertex_count);
        self
    }
}

/// Result of a PageRank run.
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// Final score for every vertex, keyed by external identifier.
    pub scores: HashMap<u64, f64>,

    /// Number of iterations performed.
    pub iterations: usize,
}

impl PageRankResult {
    /// Get the score of a vertex.
    #[must_use]
    pub fn score(&self, vid: u64) -> Option<f64> {
        self.scores.get(&vid).copied()
    }

    /// Get the vertex with the highest score.
    #[must_use]
    pub fn max(&self) -> Option<(u64, f64)> {
        self.scores
            .iter()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(&vid, &score)| (vid, score))
    }
}

/// PageRank over the stored graph.
pub struct PageRank;

impl PageRank {
    /// Run PageRank and persist per-vertex scores.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidParameter`] if the damping factor is
    /// outside `[0, 1]`.
    pub fn run<E: StorageEngine>(
        engine: &E,
        config: &PageRankConfig,
    ) -> GraphResult<PageRankResult> {
        let d = config.damping_factor;
        if !(0.0..=1.0).contains(&d) {
            return Err(GraphError::InvalidParameter {
                param: "damping_factor",
                message: format!("must be in [0, 1], got {d}"),
            });
        }

        let tx = engine.begin_read()?;
        let table = VertexTable::load(&tx)?;
        let out = table.out_neighbor_lists(&tx)?;
        let incoming = table.in_neighbor_lists(&tx)?;
        drop(tx);
        debug!(vertices = table.len(), "loaded graph for pagerank");

        let n = table.len();
        if n == 0 {
            return Ok(PageRankResult { scores: HashMap::new(), iterations: 0 });
        }
        let total = config.vertex_count.unwrap_or(n) as f64;

        let out_degrees: Vec<usize> = out.iter().map(Vec::len).collect();

        let mut scores: Vec<f64> = vec![1.0 / total; n];
        let mut new_scores: Vec<f64> = vec![0.0; n];
        // Mass held by vertices without outgoing edges, redistributed each
        // iteration. Initially each holds 1/N.
        let mut dangling: f64 =
            out_degrees.iter().filter(|&&degree| degree == 0).count() as f64 / total;

        let base = (1.0 - d) / total;

        for _ in 0..config.max_iterations {
            let redistributed = d * dangling / total;

            let mut new_dangling = 0.0;
            for i in 0..n {
                let mut link_sum = 0.0;
                for &j in &incoming[i] {
                    link_sum += scores[j] / out_degrees[j] as f64;
                }
                let score = base + d * link_sum + redistributed;
                new_scores[i] = score;
                if out_degrees[i] == 0 {
                    new_dangling += score;
                }
            }

            std::mem::swap(&mut scores, &mut new_scores);
            dangling = new_dangling;
        }

        let mut batch = BatchWriter::new(engine)?;
        let mut result = HashMap::with_capacity(n);
        for (i, &score) in scores.iter().enumerate() {
            VertexStore::set_property(
                batch.tx_mut()?,
                table.ids[i],
                props::PAGERANK,
                Value::Float(score),
            )?;
            batch.record_mutation()?;
            result.insert(table.vids[i], score);
        }
        batch.finish()?;

        debug!(iterations = config.max_iterations, "pagerank finished");
        Ok(PageRankResult { scores: result, iterations: config.max_iterations })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = PageRankConfig::default();
        assert_eq!(config.max_iterations, 10);
        assert!((config.damping_factor - 0.85).abs() < f64::EPSILON);
        assert!(config.vertex_count.is_none());
    }

    #[test]
    fn config_builder() {
        let config = PageRankConfig::new()
            .with_max_iterations(50)
            .with_damping_factor(0.9)
            .with_vertex_count(1000);

        assert_eq!(config.max_iterations, 50);
        assert!((config.damping_factor - 0.9).abs() < f64::EPSILON);
        assert_eq!(config.vertex_count, Some(1000));
    }

    #[test]
    fn result_accessors() {
        let mut scores = HashMap::new();
        scores.insert(1, 0.3);
        scores.insert(2, 0.7);

        let result = PageRankResult { scores, iterations: 10 };
        assert_eq!(result.score(1), Some(0.3));
        assert_eq!(result.score(9), None);

        let (vid, score) = result.max().unwrap();
        assert_eq!(vid, 2);
        assert!((score - 0.7).abs() < f64::EPSILON);
    }
}
