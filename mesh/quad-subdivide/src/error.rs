//! Error types for subdivision operations.

use quad_types::MeshError;
use thiserror::Error;

/// Errors that can occur during subdivision operations.
#[derive(Debug, Error)]
pub enum SubdivideError {
    /// Mesh has no vertices.
    #[error("Mesh has no vertices")]
    EmptyMesh,

    /// Mesh has no faces.
    #[error("Mesh has no faces")]
    NoFaces,

    /// Invalid iteration count.
    #[error("Invalid iteration count: {0} (must be >= 1)")]
    InvalidIterations(u32),

    /// Mesh would exceed maximum size.
    #[error("Subdivision would exceed maximum mesh size ({current} -> {projected} faces, max {max})")]
    MeshTooLarge {
        /// Current face count.
        current: usize,
        /// Projected face count after subdivision.
        projected: usize,
        /// Maximum allowed face count.
        max: usize,
    },

    /// The refined mesh would have more vertices than a `u32` index can address.
    #[error("Refined mesh needs {count} vertices, which exceeds the u32 index range")]
    IndexOverflow {
        /// Required vertex count.
        count: usize,
    },

    /// An edge is not a side of any face.
    #[error("Edge {edge} is not used by any face")]
    OrphanEdge {
        /// Index of the unused edge.
        edge: u32,
    },

    /// A vertex is not a corner of any face, so no repositioning rule applies.
    #[error("Vertex {vertex} has valence 0")]
    IsolatedVertex {
        /// Index of the isolated vertex.
        vertex: u32,
    },

    /// Building the refined mesh violated a topology invariant.
    #[error("Topology error: {0}")]
    Topology(#[from] MeshError),
}

/// Result type for subdivision operations.
pub type SubdivideResult<T> = std::result::Result<T, SubdivideError>;
