//! Forest fire graph growth.
//!
//! Grows an existing graph by attaching new vertices through a spreading
//! "fire": each new vertex picks a random ambassador, connects to it, and
//! then burns outward from the ambassador, connecting to a geometrically
//! sampled subset of each burning vertex's neighbors.

use std::collections::HashSet;

use arbor_core::{Edge, Value, Vertex, VertexId};
use arbor_storage::StorageEngine;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::index::AdjacencyIndex;
use crate::props;
use crate::store::{BatchWriter, EdgeStore, GraphResult, IdGenerator, VertexStore};

/// Configuration for forest fire growth.
#[derive(Debug, Clone)]
pub struct ForestFireConfig {
    /// Highest external identifier already in the graph.
    ///
    /// New vertices receive identifiers starting at `max_vid + 1`.
    pub max_vid: u64,

    /// Number of vertices to add.
    pub new_vertices: u64,

    /// Maximum number of burn rounds per new vertex. Default: 5.
    pub max_iterations: usize,

    /// Forward burn ratio, applied to outgoing neighbors of burning
    /// vertices. Ratios at or below 0 burn every eligible neighbor;
    /// ratios at or above 1 burn none. Default: 0.5.
    pub p_ratio: f64,

    /// Backward burn ratio, applied to incoming neighbors. Default: 0.5.
    pub r_ratio: f64,

    /// Whether to create only forward edges from new vertices.
    ///
    /// When `false`, every created edge gets an explicit reverse edge.
    /// Default: `true`.
    pub directed: bool,

    /// RNG seed. `None` seeds from the operating system; a fixed seed makes
    /// generation reproducible.
    pub seed: Option<u64>,
}

impl ForestFireConfig {
    /// Create a configuration for growing past `max_vid` by `new_vertices`
    /// vertices, with default burn parameters.
    #[must_use]
    pub const fn new(max_vid: u64, new_vertices: u64) -> Self {
        Self {
            max_vid,
            new_vertices,
            max_iterations: 5,
            p_ratio: 0.5,
            r_ratio: 0.5,
            directed: true,
            seed: None,
        }
    }

    /// Set the maximum number of burn rounds per new vertex.
    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the forward burn ratio.
    #[must_use]
    pub const fn with_p_ratio(mut self, p_ratio: f64) -> Self {
        self.p_ratio = p_ratio;
        self
    }

    /// Set the backward burn ratio.
    #[must_use]
    pub const fn with_r_ratio(mut self, r_ratio: f64) -> Self {
        self.r_ratio = r_ratio;
        self
    }

    /// Set whether only forward edges are created.
    #[must_use]
    pub const fn with_directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    /// Set a fixed RNG seed for reproducible generation.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Result of a forest fire growth run.
#[derive(Debug, Clone)]
pub struct ForestFireResult {
    /// External identifiers of the created vertices, in creation order.
    pub created: Vec<u64>,

    /// Number of edges added, counting reverse edges.
    pub edges_added: usize,
}

impl ForestFireResult {
    /// Number of vertices created.
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.created.len()
    }
}

/// Forest fire growth over the stored graph.
pub struct ForestFire;

impl ForestFire {
    /// Grow the graph and persist the new vertices and edges.
    ///
    /// Each created vertex carries an `origin` property naming the external
    /// identifier of its ambassador. New vertices are visible to later
    /// ambassador picks within the same run.
    pub fn run<E: StorageEngine>(
        engine: &E,
        id_gen: &IdGenerator,
        config: &ForestFireConfig,
    ) -> GraphResult<ForestFireResult> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut batch = BatchWriter::new(engine)?;
        let mut created = Vec::new();
        let mut edges_added = 0usize;

        for vid in (config.max_vid + 1)..=(config.max_vid + config.new_vertices) {
            // One-pass uniform pick: every existing vertex draws an
            // independent key, the largest key wins.
            let mut ambassador: Option<(f64, u64, VertexId)> = None;
            VertexStore::for_each_by_vid(batch.tx()?, |existing_vid, id| {
                let key: f64 = rng.random();
                let better = match ambassador {
                    Some((best, _, _)) => key > best,
                    None => true,
                };
                if better {
                    ambassador = Some((key, existing_vid, id));
                }
                true
            })?;

            let vertex = VertexStore::create(batch.tx_mut()?, id_gen, vid, |id| {
                let mut vertex = Vertex::new(id, vid);
                if let Some((_, ambassador_vid, _)) = ambassador {
                    vertex = vertex.with_property(props::ORIGIN, Value::Int(ambassador_vid as i64));
                }
                vertex
            })?;
            batch.record_mutation()?;
            created.push(vid);

            // An empty graph has no ambassador and nothing to burn
            let Some((_, ambassador_vid, ambassador_id)) = ambassador else {
                continue;
            };

            Self::connect(&mut batch, id_gen, vertex.id, ambassador_id, config.directed)?;
            edges_added += if config.directed { 1 } else { 2 };

            let mut burnt = HashSet::new();
            burnt.insert(ambassador_id);
            let mut burning = vec![ambassador_id];

            for _ in 0..config.max_iterations {
                let mut next = Vec::new();

                for &from in &burning {
                    let forward = AdjacencyIndex::out_neighbors(batch.tx()?, from)?;
                    edges_added += Self::burn(
                        &mut batch, id_gen, &mut rng, config.p_ratio, config.directed,
                        vertex.id, forward, &mut burnt, &mut next,
                    )?;

                    let backward = AdjacencyIndex::in_neighbors(batch.tx()?, from)?;
                    edges_added += Self::burn(
                        &mut batch, id_gen, &mut rng, config.r_ratio, config.directed,
                        vertex.id, backward, &mut burnt, &mut next,
                    )?;
                }

                if next.is_empty() {
                    break;
                }
                burning = next;
            }

            debug!(vid, ambassador = ambassador_vid, burnt = burnt.len(), "generated vertex");
        }

        batch.finish()?;

        debug!(created = created.len(), edges_added, "forest fire finished");
        Ok(ForestFireResult { created, edges_added })
    }

    /// Burn a geometric sample of the eligible candidates, connecting each
    /// to the new vertex. Returns the number of edges added.
    #[allow(clippy::too_many_arguments)]
    fn burn<E: StorageEngine>(
        batch: &mut BatchWriter<'_, E>,
        id_gen: &IdGenerator,
        rng: &mut StdRng,
        ratio: f64,
        directed: bool,
        new_vertex: VertexId,
        candidates: Vec<VertexId>,
        burnt: &mut HashSet<VertexId>,
        next: &mut Vec<VertexId>,
    ) -> GraphResult<usize> {
        // Parallel edges produce duplicate candidates; each neighbor is
        // eligible at most once.
        let mut seen = HashSet::new();
        let mut eligible: Vec<VertexId> = candidates
            .into_iter()
            .filter(|&v| v != new_vertex && !burnt.contains(&v) && seen.insert(v))
            .collect();

        let count = Self::sample_burn_count(rng, ratio, eligible.len());
        eligible.shuffle(rng);

        let mut edges_added = 0;
        for &target in eligible.iter().take(count) {
            Self::connect(batch, id_gen, new_vertex, target, directed)?;
            edges_added += if directed { 1 } else { 2 };
            burnt.insert(target);
            next.push(target);
        }

        Ok(edges_added)
    }

    /// Geometric sample of how many neighbors to burn.
    ///
    /// Ratios at or below 0 burn everything available; ratios at or above 1
    /// burn nothing.
    fn sample_burn_count(rng: &mut StdRng, ratio: f64, available: usize) -> usize {
        if ratio <= 0.0 {
            return available;
        }
        if ratio >= 1.0 {
            return 0;
        }
        let u = rng.random::<f64>().max(f64::MIN_POSITIVE);
        let sampled = (u.ln() / (1.0 - ratio).ln()).floor();
        (sampled as usize).min(available)
    }

    /// Create an edge, plus its reverse when the graph is undirected.
    fn connect<E: StorageEngine>(
        batch: &mut BatchWriter<'_, E>,
        id_gen: &IdGenerator,
        source: VertexId,
        target: VertexId,
        directed: bool,
    ) -> GraphResult<()> {
        EdgeStore::create(batch.tx_mut()?, id_gen, source, target, |id| {
            Edge::new(id, source, target)
        })?;
        batch.record_mutation()?;

        if !directed {
            EdgeStore::create(batch.tx_mut()?, id_gen, target, source, |id| {
                Edge::new(id, target, source)
            })?;
            batch.record_mutation()?;
        }

        Ok(())
    }
}
