//! Error types for graph operations.

use arbor_core::{CoreError, EdgeId, VertexId};
use arbor_storage::StorageError;

/// Errors that can occur during graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// No vertex carries the given external identifier.
    #[error("vertex not found: {0}")]
    VertexNotFound(u64),

    /// The requested edge does not exist.
    #[error("edge not found: {0:?}")]
    EdgeNotFound(EdgeId),

    /// An edge references a vertex that doesn't exist.
    #[error("invalid vertex reference: {0:?}")]
    InvalidVertexReference(VertexId),

    /// A vertex with the given external identifier already exists.
    #[error("vertex already exists: {0}")]
    VertexAlreadyExists(u64),

    /// A configuration parameter is out of its valid range.
    #[error("invalid parameter {param}: {message}")]
    InvalidParameter {
        /// The parameter name.
        param: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// An encoding or decoding error occurred.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// A storage layer error occurred.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// An internal invariant was violated.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CoreError> for GraphError {
    fn from(err: CoreError) -> Self {
        Self::Encoding(err.to_string())
    }
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
