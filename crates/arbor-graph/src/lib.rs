//! Arbor Graph
//!
//! This crate provides graph storage, adjacency indexes, analytics kernels,
//! and graph generation for Arbor.
//!
//! # Modules
//!
//! - [`store`] - Vertex and edge storage operations, batched writes
//! - [`index`] - Graph indexes (adjacency lists)
//! - [`analytics`] - Analytics kernels (BFS, WCC, CDLP, PageRank, LCC)
//! - [`generate`] - Graph generation (forest fire growth)
//! - [`props`] - Names of the properties kernels write

#![deny(clippy::unwrap_used)]

pub mod analytics;
pub mod generate;
pub mod index;
pub mod props;
pub mod store;
