//! Vertex and edge storage operations.
//!
//! This module provides CRUD operations for vertices and edges in the graph.
//! All operations work within a transaction context for ACID guarantees.
//!
//! # Overview
//!
//! - [`VertexStore`] - Create, read, and update vertices
//! - [`EdgeStore`] - Create and read edges
//! - [`IdGenerator`] - Monotonic ID generation for vertices and edges
//! - [`BatchWriter`] - Write transactions that commit every N mutations
//!
//! # Tables
//!
//! The stores use the following tables in the storage backend:
//!
//! - `vertices` - Vertex data keyed by internal vertex ID
//! - `vertex_ids` - External identifier index for vertex lookups
//! - `edges` - Edge data keyed by edge ID
//! - `edges_out` - Index for outgoing edge lookups
//! - `edges_in` - Index for incoming edge lookups
//!
//! # Example
//!
//! ```ignore
//! use arbor_core::{Edge, Vertex};
//! use arbor_graph::store::{EdgeStore, IdGenerator, VertexStore};
//! use arbor_storage::backends::RedbEngine;
//!
//! let engine = RedbEngine::in_memory()?;
//! let id_gen = IdGenerator::new();
//!
//! // Create vertices for dataset IDs 10 and 20
//! let mut tx = engine.begin_write()?;
//! let a = VertexStore::create(&mut tx, &id_gen, 10, |id| Vertex::new(id, 10))?;
//! let b = VertexStore::create(&mut tx, &id_gen, 20, |id| Vertex::new(id, 20))?;
//!
//! // Connect them
//! EdgeStore::create(&mut tx, &id_gen, a.id, b.id, |id| Edge::new(id, a.id, b.id))?;
//! tx.commit()?;
//! ```

mod batch;
mod edge;
mod error;
mod id_gen;
mod vertex;

pub use batch::{BatchWriter, DEFAULT_COMMIT_THRESHOLD};
pub use edge::{EdgeStore, TABLE_EDGES, TABLE_EDGES_IN, TABLE_EDGES_OUT};
pub use error::{GraphError, GraphResult};
pub use id_gen::IdGenerator;
pub use vertex::{VertexStore, TABLE_VERTEX_IDS, TABLE_VERTICES};
