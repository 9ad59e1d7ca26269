//! Core data types for the graph.

mod edge;
mod id;
mod value;
mod vertex;

pub use edge::Edge;
pub use id::{EdgeId, VertexId};
pub use value::Value;
pub use vertex::Vertex;
