//! Community detection by label propagation.
//!
//! Synchronous (Jacobi) label propagation: every vertex starts with its own
//! external identifier as its label, and each iteration replaces every label
//! with the most frequent label among the vertex's neighbors, ties going to
//! the smallest label. Labels are double-buffered so an iteration only reads
//! the previous iteration's labels.

use std::collections::HashMap;

use arbor_core::Value;
use arbor_storage::StorageEngine;
use tracing::debug;

use super::common::VertexTable;
use crate::props;
use crate::store::{BatchWriter, GraphResult, VertexStore};

/// Configuration for label propagation.
#[derive(Debug, Clone)]
pub struct CdlpConfig {
    /// Maximum number of propagation iterations. Default: 10.
    pub max_iterations: usize,

    /// Whether to propagate along outgoing edges only.
    ///
    /// When `false`, neighbors in both directions contribute labels.
    /// Default: `true`.
    pub directed: bool,
}

impl Default for CdlpConfig {
    fn default() -> Self {
        Self { max_iterations: 10, directed: true }
    }
}

impl CdlpConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of iterations.
    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set whether propagation follows only outgoing edges.
    #[must_use]
    pub const fn with_directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }
}

/// Result of a label propagation run.
#[derive(Debug, Clone)]
pub struct CdlpResult {
    /// Final label for every vertex, keyed by external identifier.
    pub labels: HashMap<u64, u64>,

    /// Number of iterations performed.
    pub iterations: usize,

    /// Whether labels stopped changing before `max_iterations`.
    pub converged: bool,
}

impl CdlpResult {
    /// Get the label of a vertex.
    #[must_use]
    pub fn label(&self, vid: u64) -> Option<u64> {
        self.labels.get(&vid).copied()
    }
}

/// Community detection by label propagation over the stored graph.
pub struct Cdlp;

impl Cdlp {
    /// Run label propagation and persist per-vertex labels.
    pub fn run<E: StorageEngine>(engine: &E, config: &CdlpConfig) -> GraphResult<CdlpResult> {
        let tx = engine.begin_read()?;
        let table = VertexTable::load(&tx)?;
        let out = table.out_neighbor_lists(&tx)?;
        let incoming =
            if config.directed { None } else { Some(table.in_neighbor_lists(&tx)?) };
        drop(tx);
        debug!(vertices = table.len(), directed = config.directed, "loaded graph for cdlp");

        let n = table.len();
        let mut labels: Vec<u64> = table.vids.clone();
        let mut new_labels: Vec<u64> = vec![0; n];

        let mut iterations = 0;
        let mut converged = false;

        while iterations < config.max_iterations {
            iterations += 1;
            let mut changed = false;

            for i in 0..n {
                let mut frequencies: HashMap<u64, usize> = HashMap::new();
                for &j in &out[i] {
                    *frequencies.entry(labels[j]).or_insert(0) += 1;
                }
                if let Some(incoming) = &incoming {
                    for &j in &incoming[i] {
                        *frequencies.entry(labels[j]).or_insert(0) += 1;
                    }
                }

                // The vertex's own label competes at frequency zero, so any
                // neighbor label beats it. Ties pick the smallest label.
                let mut best_label = labels[i];
                let mut best_frequency = 0;
                for (&label, &frequency) in &frequencies {
                    if frequency > best_frequency
                        || (frequency == best_frequency && label < best_label)
                    {
                        best_label = label;
                        best_frequency = frequency;
                    }
                }

                new_labels[i] = best_label;
                if best_label != labels[i] {
                    changed = true;
                }
            }

            std::mem::swap(&mut labels, &mut new_labels);

            if !changed {
                converged = true;
                break;
            }
        }

        let mut batch = BatchWriter::new(engine)?;
        let mut result = HashMap::with_capacity(n);
        for (i, &label) in labels.iter().enumerate() {
            VertexStore::set_property(
                batch.tx_mut()?,
                table.ids[i],
                props::LABEL,
                Value::Int(label as i64),
            )?;
            batch.record_mutation()?;
            result.insert(table.vids[i], label);
        }
        batch.finish()?;

        debug!(iterations, converged, "cdlp finished");
        Ok(CdlpResult { labels: result, iterations, converged })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = CdlpConfig::default();
        assert_eq!(config.max_iterations, 10);
        assert!(config.directed);
    }

    #[test]
    fn config_builder() {
        let config = CdlpConfig::new().with_max_iterations(3).with_directed(false);
        assert_eq!(config.max_iterations, 3);
        assert!(!config.directed);
    }

    #[test]
    fn result_accessors() {
        let mut labels = HashMap::new();
        labels.insert(1, 5);

        let result = CdlpResult { labels, iterations: 2, converged: true };
        assert_eq!(result.label(1), Some(5));
        assert_eq!(result.label(2), None);
    }
}
