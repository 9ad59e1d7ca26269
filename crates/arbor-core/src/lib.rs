//! Arbor Core
//!
//! Fundamental types for the Arbor embedded graph analytics engine.
//!
//! # Modules
//!
//! - [`types`] - Core data types (Vertex, Edge, Value, IDs)
//! - [`encoding`] - Serialization and key encoding
//! - [`error`] - Error types

#![deny(clippy::unwrap_used)]

pub mod encoding;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::CoreError;
pub use types::{Edge, EdgeId, Value, Vertex, VertexId};
