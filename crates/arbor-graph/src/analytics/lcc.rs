//! Local clustering coefficient.
//!
//! For each vertex, measures how close its neighborhood is to a clique.
//! The neighborhood is the undirected neighbor set (both directions,
//! self-loops excluded); links inside the neighborhood are probed along
//! outgoing edges only. For undirected inputs, which store both directions
//! of every relation, the outgoing probe sees every neighborhood link
//! exactly once per direction, making the coefficient exact.

use std::collections::{HashMap, HashSet};

use arbor_core::Value;
use arbor_storage::StorageEngine;
use tracing::debug;

use super::common::VertexTable;
use crate::props;
use crate::store::{BatchWriter, GraphResult, VertexStore};

/// Configuration for the local clustering coefficient.
///
/// The neighborhood definition is fixed (undirected neighbors, outgoing
/// link probe), so there is nothing to configure yet.
#[derive(Debug, Clone, Default)]
pub struct LccConfig;

impl LccConfig {
    /// Create a new configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Result of a local clustering coefficient run.
#[derive(Debug, Clone)]
pub struct LccResult {
    /// Coefficient for every vertex, keyed by external identifier.
    pub coefficients: HashMap<u64, f64>,
}

impl LccResult {
    /// Get the coefficient of a vertex.
    #[must_use]
    pub fn coefficient(&self, vid: u64) -> Option<f64> {
        self.coefficients.get(&vid).copied()
    }

    /// Mean coefficient over all vertices.
    ///
    /// Returns 0.0 for an empty graph.
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.coefficients.is_empty() {
            return 0.0;
        }
        self.coefficients.values().sum::<f64>() / self.coefficients.len() as f64
    }
}

/// Local clustering coefficient over the stored graph.
pub struct Lcc;

impl Lcc {
    /// Run the computation and persist per-vertex coefficients.
    pub fn run<E: StorageEngine>(engine: &E, _config: &LccConfig) -> GraphResult<LccResult> {
        let tx = engine.begin_read()?;
        let table = VertexTable::load(&tx)?;
        let out = table.out_neighbor_lists(&tx)?;
        let incoming = table.in_neighbor_lists(&tx)?;
        drop(tx);
        debug!(vertices = table.len(), "loaded graph for lcc");

        let n = table.len();

        // Deduplicated outgoing sets for the neighborhood link probe
        let out_sets: Vec<HashSet<usize>> =
            out.iter().map(|list| list.iter().copied().collect()).collect();

        let mut coefficients: Vec<f64> = vec![0.0; n];
        for v in 0..n {
            let mut neighborhood: HashSet<usize> =
                out[v].iter().chain(incoming[v].iter()).copied().collect();
            neighborhood.remove(&v);

            let k = neighborhood.len();
            if k <= 1 {
                continue;
            }

            // Ordered pairs (a, b) of distinct neighbors with an edge a -> b
            let mut links = 0usize;
            for &a in &neighborhood {
                for &b in out_sets[a].intersection(&neighborhood) {
                    if b != a {
                        links += 1;
                    }
                }
            }

            coefficients[v] = links as f64 / (k * (k - 1)) as f64;
        }

        let mut batch = BatchWriter::new(engine)?;
        let mut result = HashMap::with_capacity(n);
        for (i, &coefficient) in coefficients.iter().enumerate() {
            VertexStore::set_property(
                batch.tx_mut()?,
                table.ids[i],
                props::LCC,
                Value::Float(coefficient),
            )?;
            batch.record_mutation()?;
            result.insert(table.vids[i], coefficient);
        }
        batch.finish()?;

        debug!("lcc finished");
        Ok(LccResult { coefficients: result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_accessors() {
        let mut coefficients = HashMap::new();
        coefficients.insert(1, 1.0);
        coefficients.insert(2, 0.5);

        let result = LccResult { coefficients };
        assert_eq!(result.coefficient(1), Some(1.0));
        assert_eq!(result.coefficient(9), None);
        assert!((result.mean() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn mean_of_empty_result_is_zero() {
        let result = LccResult { coefficients: HashMap::new() };
        assert_eq!(result.mean(), 0.0);
    }
}
