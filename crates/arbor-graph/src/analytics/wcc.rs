//! Weakly connected components.
//!
//! Flood-fill over both-direction adjacency. The outer scan visits vertices
//! in ascending external identifier order, so every component is labeled
//! with the smallest external identifier among its members. That labeling
//! is a documented contract, not an accident of iteration order.

use std::collections::{HashMap, VecDeque};

use arbor_core::Value;
use arbor_storage::StorageEngine;
use tracing::debug;

use super::common::VertexTable;
use crate::props;
use crate::store::{BatchWriter, GraphResult, VertexStore};

/// Configuration for weakly connected components.
///
/// Edge direction is always ignored; weak connectivity is defined over the
/// underlying undirected graph, so there is nothing to configure yet.
#[derive(Debug, Clone, Default)]
pub struct WccConfig;

impl WccConfig {
    /// Create a new configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Result of a weakly-connected-components run.
#[derive(Debug, Clone)]
pub struct WccResult {
    /// Component identifier for every vertex, keyed by external identifier.
    ///
    /// The component identifier is the smallest external identifier in the
    /// component.
    pub components: HashMap<u64, u64>,

    /// Number of distinct components.
    pub component_count: usize,
}

impl WccResult {
    /// Get the component identifier of a vertex.
    #[must_use]
    pub fn component(&self, vid: u64) -> Option<u64> {
        self.components.get(&vid).copied()
    }
}

/// Weakly connected components over the stored graph.
pub struct Wcc;

impl Wcc {
    /// Run the computation and persist per-vertex component identifiers.
    pub fn run<E: StorageEngine>(engine: &E, _config: &WccConfig) -> GraphResult<WccResult> {
        let tx = engine.begin_read()?;
        let table = VertexTable::load(&tx)?;
        let out = table.out_neighbor_lists(&tx)?;
        let incoming = table.in_neighbor_lists(&tx)?;
        drop(tx);
        debug!(vertices = table.len(), "loaded graph for wcc");

        let n = table.len();
        let mut assigned: Vec<Option<u64>> = vec![None; n];
        let mut component_count = 0;

        // Ascending-vid outer scan: each unassigned vertex has the smallest
        // vid of its component, so the seed vid is the component id.
        for seed in 0..n {
            if assigned[seed].is_some() {
                continue;
            }
            let component = table.vids[seed];
            component_count += 1;

            let mut queue = VecDeque::new();
            assigned[seed] = Some(component);
            queue.push_back(seed);

            while let Some(u) = queue.pop_front() {
                for &v in out[u].iter().chain(incoming[u].iter()) {
                    if assigned[v].is_none() {
                        assigned[v] = Some(component);
                        queue.push_back(v);
                    }
                }
            }
        }

        let mut batch = BatchWriter::new(engine)?;
        let mut components = HashMap::with_capacity(n);
        for (i, component) in assigned.iter().enumerate() {
            if let Some(component) = component {
                VertexStore::set_property(
                    batch.tx_mut()?,
                    table.ids[i],
                    props::COMPONENT,
                    Value::Int(*component as i64),
                )?;
                batch.record_mutation()?;
                components.insert(table.vids[i], *component);
            }
        }
        batch.finish()?;

        debug!(components = component_count, "wcc finished");
        Ok(WccResult { components, component_count })
    }
}
