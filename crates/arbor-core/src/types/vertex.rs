//! Vertex types for the graph.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Value, VertexId};

/// A vertex in the graph.
///
/// Vertices carry two identities:
/// - `id` is the internal storage identifier, assigned at creation time and
///   carrying no ordering guarantees.
/// - `vid` is the externally-assigned identifier from the dataset that loaded
///   the vertex. Analytics kernels key their results by `vid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// Internal storage identifier for this vertex.
    pub id: VertexId,
    /// Externally-assigned vertex identifier.
    pub vid: u64,
    /// Properties stored on this vertex.
    pub properties: HashMap<String, Value>,
}

impl Vertex {
    /// Create a new vertex with the given internal ID and external identifier.
    #[must_use]
    pub fn new(id: VertexId, vid: u64) -> Self {
        Self { id, vid, properties: HashMap::new() }
    }

    /// Add a property to this vertex.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Get a property value by key.
    #[must_use]
    pub fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Set a property value.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key.into(), value.into());
    }
}
