//! Traits for quad mesh types.

use nalgebra::Point3;

use crate::{Edge, EdgeId, Face, FaceId, MeshCounts, VertexId};

/// Read access to a quad mesh's elements.
///
/// This is everything a writer or renderer needs; it never exposes
/// subdivision state.
pub trait QuadTopology {
    /// Get the number of vertices.
    fn vertex_count(&self) -> usize;

    /// Get the number of undirected edges.
    fn edge_count(&self) -> usize;

    /// Get the number of quad faces.
    fn face_count(&self) -> usize;

    /// Vertex, edge and face counts together.
    fn counts(&self) -> MeshCounts {
        MeshCounts {
            vertices: self.vertex_count(),
            edges: self.edge_count(),
            faces: self.face_count(),
        }
    }

    /// Check if the mesh is empty.
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.face_count() == 0
    }

    /// Get a vertex coordinate.
    ///
    /// Returns `None` if the index is out of bounds.
    fn position(&self, id: VertexId) -> Option<&Point3<f64>>;

    /// Get an edge's endpoint record.
    ///
    /// Returns `None` if the index is out of bounds.
    fn edge(&self, id: EdgeId) -> Option<&Edge>;

    /// Get a face record.
    ///
    /// Returns `None` if the index is out of bounds.
    fn face(&self, id: FaceId) -> Option<&Face>;

    /// Get a face's corner tuple.
    fn face_vertices(&self, id: FaceId) -> Option<[VertexId; 4]> {
        self.face(id).map(|f| f.vertices)
    }

    /// Get a face's side-edge tuple.
    fn face_edges(&self, id: FaceId) -> Option<[EdgeId; 4]> {
        self.face(id).map(|f| f.edges)
    }

    /// Iterate over all vertex coordinates in index order.
    fn positions(&self) -> impl Iterator<Item = &Point3<f64>>;

    /// Iterate over all edges in index order.
    fn edges(&self) -> impl Iterator<Item = &Edge>;

    /// Iterate over all faces in index order.
    fn faces(&self) -> impl Iterator<Item = &Face>;
}

/// Local connectivity of a vertex.
///
/// The vertex-repositioning rule of a subdivision step only talks to the
/// mesh through this trait, so the topology the rings are taken from can
/// be swapped without touching the weighting code.
pub trait VertexNeighborhood {
    /// Number of face corners that are `v`.
    fn valence(&self, v: VertexId) -> usize;

    /// Vertices joined to `v` by an edge, in edge order.
    fn ring1(&self, v: VertexId) -> &[VertexId];

    /// Vertices sharing a face with `v` but not an edge, deduplicated.
    fn ring2(&self, v: VertexId) -> Vec<VertexId>;
}
