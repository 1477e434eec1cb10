//! Error types for quad mesh construction.

use thiserror::Error;

/// Errors raised while building a [`QuadMesh`](crate::QuadMesh).
///
/// All of these are structural invariant violations. A mesh that fails any
/// of them is rejected outright.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// An edge or face references a vertex that does not exist.
    #[error("{element} references vertex {vertex}, but the mesh has {vertex_count} vertices")]
    VertexOutOfRange {
        /// Element holding the bad reference, e.g. `edge 3` or `face 1`.
        element: String,
        /// The out-of-range vertex index.
        vertex: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// An edge joins a vertex to itself.
    #[error("edge {edge} is degenerate: both endpoints are vertex {vertex}")]
    DegenerateEdge {
        /// Index of the offending edge.
        edge: usize,
        /// The repeated endpoint.
        vertex: u32,
    },

    /// Two edges share the same unordered endpoint pair.
    #[error("edge {duplicate} duplicates edge {first}: both join vertices {a} and {b}")]
    DuplicateEdge {
        /// Index of the first edge with this endpoint pair.
        first: usize,
        /// Index of the repeated edge.
        duplicate: usize,
        /// Smaller endpoint.
        a: u32,
        /// Larger endpoint.
        b: u32,
    },

    /// A face corner pair has no matching edge in the edge collection.
    #[error("face {face} corner {corner}: no edge joins vertices {from} and {to}")]
    MissingEdge {
        /// Index of the face.
        face: usize,
        /// Corner `k` of the face; the missing edge runs from corner `k` to `k + 1`.
        corner: usize,
        /// Vertex at corner `k`.
        from: u32,
        /// Vertex at corner `k + 1 mod 4`.
        to: u32,
    },

    /// Two consecutive corners of a face are the same vertex.
    #[error("face {face} corner {corner}: side collapses onto vertex {vertex}")]
    DegenerateFace {
        /// Index of the face.
        face: usize,
        /// Corner `k` of the face; the collapsed side runs from corner `k` to `k + 1`.
        corner: usize,
        /// The repeated vertex.
        vertex: u32,
    },

    /// Replacement coordinates do not match the topology's vertex count.
    #[error("position count mismatch: topology has {expected} vertices, got {actual} positions")]
    PositionCountMismatch {
        /// Vertex count required by the topology.
        expected: usize,
        /// Number of positions supplied.
        actual: usize,
    },

    /// The mesh has more elements than a `u32` index can address.
    #[error("{kind} count {count} exceeds the u32 index range")]
    TooManyElements {
        /// Which collection overflowed.
        kind: &'static str,
        /// The offending count.
        count: usize,
    },
}

/// Result type for mesh construction.
pub type MeshResult<T> = std::result::Result<T, MeshError>;
