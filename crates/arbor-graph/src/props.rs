//! Names of the vertex properties written by analytics kernels.
//!
//! Each kernel records its per-vertex output as a property on the vertex
//! record, so results survive the run and can be read back with
//! [`crate::store::VertexStore::get`].

/// BFS depth from the source vertex.
pub const DISTANCE: &str = "distance";

/// Weakly connected component identifier.
pub const COMPONENT: &str = "component";

/// Community label assigned by label propagation.
pub const LABEL: &str = "label";

/// PageRank score.
pub const PAGERANK: &str = "pagerank";

/// Local clustering coefficient.
pub const LCC: &str = "lcc";

/// External identifier of the ambassador a generated vertex attached to.
pub const ORIGIN: &str = "origin";
