//! Graph analytics kernels.
//!
//! Each kernel loads the graph once into dense per-run arrays, computes
//! synchronously, and persists its per-vertex output as a property through
//! a [`crate::store::BatchWriter`]:
//!
//! - [`Bfs`] - breadth-first search, writes `distance`
//! - [`Wcc`] - weakly connected components, writes `component`
//! - [`Cdlp`] - community detection by label propagation, writes `label`
//! - [`PageRank`] - fixed-iteration PageRank, writes `pagerank`
//! - [`Lcc`] - local clustering coefficient, writes `lcc`
//!
//! Kernels are independent: none reads another's output, and each can run
//! on its own against the same store.

mod bfs;
mod cdlp;
mod common;
mod lcc;
mod pagerank;
mod wcc;

pub use bfs::{Bfs, BfsConfig, BfsResult};
pub use cdlp::{Cdlp, CdlpConfig, CdlpResult};
pub use lcc::{Lcc, LccConfig, LccResult};
pub use pagerank::{PageRank, PageRankConfig, PageRankResult};
pub use wcc::{Wcc, WccConfig, WccResult};
