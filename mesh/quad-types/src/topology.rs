//! Shared, atomically replaceable mesh handle.

use std::sync::{Arc, PoisonError, RwLock};

use nalgebra::Point3;

use crate::{Edge, EdgeId, FaceId, MeshCounts, MeshResult, QuadMesh, QuadTopology, VertexId};

/// The mesh owned by a refinement driver.
///
/// Readers take an [`Arc`] snapshot and keep working on it while a writer
/// publishes the next generation with [`replace`](Self::replace). A reader
/// sees either the old mesh or the new one in full, never a mix of the two.
///
/// # Example
///
/// ```
/// use quad_types::{planar_grid, unit_quad, MeshTopology, QuadTopology};
///
/// let topology = MeshTopology::from_mesh(unit_quad());
/// let before = topology.snapshot();
///
/// topology.replace(planar_grid(2, 2, 1.0));
///
/// assert_eq!(before.face_count(), 1);
/// assert_eq!(topology.counts().faces, 4);
/// ```
#[derive(Debug, Default)]
pub struct MeshTopology {
    current: RwLock<Arc<QuadMesh>>,
}

impl MeshTopology {
    /// Build the initial mesh from raw loader arrays.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`QuadMesh::from_raw`].
    pub fn create(
        coords: &[[f64; 3]],
        edge_pairs: &[[u32; 2]],
        face_quads: &[[u32; 4]],
    ) -> MeshResult<Self> {
        QuadMesh::from_raw(coords, edge_pairs, face_quads).map(Self::from_mesh)
    }

    /// Wrap an existing mesh.
    #[must_use]
    pub fn from_mesh(mesh: QuadMesh) -> Self {
        Self {
            current: RwLock::new(Arc::new(mesh)),
        }
    }

    /// The current mesh.
    #[must_use]
    pub fn snapshot(&self) -> Arc<QuadMesh> {
        // The guarded value is only ever a complete Arc, so a poisoned lock
        // still holds a consistent mesh.
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Publish `mesh` as the current mesh and return the one it replaced.
    pub fn replace(&self, mesh: QuadMesh) -> Arc<QuadMesh> {
        self.replace_shared(Arc::new(mesh))
    }

    /// Publish an already shared mesh and return the one it replaced.
    pub fn replace_shared(&self, mesh: Arc<QuadMesh>) -> Arc<QuadMesh> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, mesh)
    }

    /// Build a mesh from new vertex, edge and face collections and publish it.
    ///
    /// Nothing is published if the collections are inconsistent.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`QuadMesh::from_parts`].
    pub fn replace_parts(
        &self,
        positions: Vec<Point3<f64>>,
        edges: Vec<Edge>,
        quads: &[[VertexId; 4]],
    ) -> MeshResult<Arc<QuadMesh>> {
        let generation = self.snapshot().generation().saturating_add(1);
        let mesh = QuadMesh::from_parts(positions, edges, quads)?.with_generation(generation);
        Ok(self.replace(mesh))
    }

    /// Counts of the current mesh.
    #[must_use]
    pub fn counts(&self) -> MeshCounts {
        self.snapshot().counts()
    }

    /// Coordinate of a vertex in the current mesh.
    #[must_use]
    pub fn position(&self, id: VertexId) -> Option<Point3<f64>> {
        self.snapshot().position(id).copied()
    }

    /// Endpoints of an edge in the current mesh.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<Edge> {
        self.snapshot().edge(id).copied()
    }

    /// Corner tuple of a face in the current mesh.
    #[must_use]
    pub fn face_vertices(&self, id: FaceId) -> Option<[VertexId; 4]> {
        self.snapshot().face_vertices(id)
    }

    /// Side-edge tuple of a face in the current mesh.
    #[must_use]
    pub fn face_edges(&self, id: FaceId) -> Option<[EdgeId; 4]> {
        self.snapshot().face_edges(id)
    }
}

impl From<QuadMesh> for MeshTopology {
    fn from(mesh: QuadMesh) -> Self {
        Self::from_mesh(mesh)
    }
}
