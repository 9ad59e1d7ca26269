//! Graph indexes.
//!
//! - [`AdjacencyIndex`] - Neighbor lookups through prefix scans over the
//!   outgoing and incoming edge indexes

mod adjacency;

pub use adjacency::{AdjacencyIndex, Direction};
