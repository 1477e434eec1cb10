//! Adjacency queries over a quad mesh snapshot.

use smallvec::SmallVec;

use crate::{EdgeId, FaceId, QuadMesh, QuadTopology, VertexId, VertexNeighborhood};

/// Precomputed edge-face and vertex-face incidence for one [`QuadMesh`].
///
/// The index is built in a single pass over the faces and edges and then
/// answers every query with a table lookup. It borrows the mesh it was
/// built from, so it cannot outlive that snapshot or be reused for the
/// next subdivision generation.
///
/// # Example
///
/// ```
/// use quad_types::{planar_grid, AdjacencyIndex, VertexId, VertexNeighborhood};
///
/// let grid = planar_grid(2, 2, 1.0);
/// let adjacency = AdjacencyIndex::new(&grid);
///
/// // Centre vertex of a 2x2 grid touches all four faces
/// assert_eq!(adjacency.valence(VertexId(4)), 4);
/// assert_eq!(adjacency.ring1(VertexId(4)).len(), 4);
/// assert_eq!(adjacency.ring2(VertexId(4)).len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct AdjacencyIndex<'a> {
    mesh: &'a QuadMesh,
    edge_faces: Vec<SmallVec<[FaceId; 2]>>,
    vertex_faces: Vec<SmallVec<[FaceId; 4]>>,
    valence: Vec<usize>,
    ring1: Vec<Vec<VertexId>>,
}

impl<'a> AdjacencyIndex<'a> {
    /// Build the index for `mesh`.
    #[must_use]
    pub fn new(mesh: &'a QuadMesh) -> Self {
        let mut edge_faces = vec![SmallVec::new(); mesh.edge_count()];
        let mut vertex_faces = vec![SmallVec::new(); mesh.vertex_count()];
        let mut valence = vec![0; mesh.vertex_count()];

        for (fid, face) in mesh.face_ids().zip(mesh.faces()) {
            // Face edges were resolved by endpoint pair, so membership here is
            // the same as matching the edge against the face's corner pairs.
            for e in face.edges {
                let faces: &mut SmallVec<[FaceId; 2]> = &mut edge_faces[e.index()];
                if !faces.contains(&fid) {
                    faces.push(fid);
                }
            }
            for v in face.vertices {
                valence[v.index()] += 1;
                let faces: &mut SmallVec<[FaceId; 4]> = &mut vertex_faces[v.index()];
                if !faces.contains(&fid) {
                    faces.push(fid);
                }
            }
        }

        let mut ring1 = vec![Vec::new(); mesh.vertex_count()];
        for edge in mesh.edges() {
            ring1[edge.a.index()].push(edge.b);
            ring1[edge.b.index()].push(edge.a);
        }

        Self {
            mesh,
            edge_faces,
            vertex_faces,
            valence,
            ring1,
        }
    }

    /// The mesh this index was built from.
    #[inline]
    #[must_use]
    pub const fn mesh(&self) -> &'a QuadMesh {
        self.mesh
    }

    /// Faces having `e` as one of their sides, in face order.
    ///
    /// A manifold mesh yields one face for a boundary edge and two for an
    /// interior edge. An edge no face uses yields an empty slice.
    #[must_use]
    pub fn faces_of_edge(&self, e: EdgeId) -> &[FaceId] {
        self.edge_faces.get(e.index()).map(|f| f.as_slice()).unwrap_or_default()
    }

    /// Check whether `e` is used by exactly one face.
    #[must_use]
    pub fn is_boundary_edge(&self, e: EdgeId) -> bool {
        self.faces_of_edge(e).len() == 1
    }

    /// Faces having `v` as a corner, in face order.
    #[must_use]
    pub fn faces_of_vertex(&self, v: VertexId) -> &[FaceId] {
        self.vertex_faces.get(v.index()).map(|f| f.as_slice()).unwrap_or_default()
    }
}

impl VertexNeighborhood for AdjacencyIndex<'_> {
    fn valence(&self, v: VertexId) -> usize {
        self.valence.get(v.index()).copied().unwrap_or(0)
    }

    fn ring1(&self, v: VertexId) -> &[VertexId] {
        self.ring1.get(v.index()).map(Vec::as_slice).unwrap_or_default()
    }

    fn ring2(&self, v: VertexId) -> Vec<VertexId> {
        let ring1 = self.ring1(v);
        let mut ring2 = Vec::new();

        for &fid in self.faces_of_vertex(v) {
            let Some(face) = self.mesh.face(fid) else {
                continue;
            };
            for corner in face.vertices {
                if corner != v && !ring1.contains(&corner) && !ring2.contains(&corner) {
                    ring2.push(corner);
                }
            }
        }

        ring2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{planar_grid, unit_cube, unit_quad};

    #[test]
    fn single_quad_edges_are_boundary() {
        let quad = unit_quad();
        let adjacency = AdjacencyIndex::new(&quad);
        for e in quad.edge_ids() {
            assert_eq!(adjacency.faces_of_edge(e), &[FaceId(0)]);
            assert!(adjacency.is_boundary_edge(e));
        }
    }

    #[test]
    fn grid_interior_edges_have_two_faces() {
        let grid = planar_grid(2, 2, 1.0);
        let adjacency = AdjacencyIndex::new(&grid);

        let mut boundary = 0;
        let mut interior = 0;
        for e in grid.edge_ids() {
            match adjacency.faces_of_edge(e).len() {
                1 => boundary += 1,
                2 => interior += 1,
                n => panic!("edge {e} has {n} faces"),
            }
        }
        assert_eq!(boundary, 8);
        assert_eq!(interior, 4);
    }

    #[test]
    fn grid_valence() {
        let grid = planar_grid(2, 2, 1.0);
        let adjacency = AdjacencyIndex::new(&grid);

        // Corners 0, 2, 6, 8; edge midpoints 1, 3, 5, 7; centre 4
        let valences: Vec<usize> = grid.vertex_ids().map(|v| adjacency.valence(v)).collect();
        assert_eq!(valences, vec![1, 2, 1, 2, 4, 2, 1, 2, 1]);
    }

    #[test]
    fn ring1_follows_edge_order() {
        let quad = unit_quad();
        let adjacency = AdjacencyIndex::new(&quad);

        // Derived edges are (0,1), (1,2), (2,3), (3,0)
        assert_eq!(adjacency.ring1(VertexId(0)), &[VertexId(1), VertexId(3)]);
        assert_eq!(adjacency.ring1(VertexId(2)), &[VertexId(1), VertexId(3)]);
    }

    #[test]
    fn ring2_excludes_self_and_ring1() {
        let quad = unit_quad();
        let adjacency = AdjacencyIndex::new(&quad);
        assert_eq!(adjacency.ring2(VertexId(0)), vec![VertexId(2)]);

        let grid = planar_grid(2, 2, 1.0);
        let adjacency = AdjacencyIndex::new(&grid);
        let mut ring2 = adjacency.ring2(VertexId(4));
        ring2.sort();
        assert_eq!(
            ring2,
            vec![VertexId(0), VertexId(2), VertexId(6), VertexId(8)]
        );
    }

    #[test]
    fn cube_is_uniform() {
        let cube = unit_cube();
        let adjacency = AdjacencyIndex::new(&cube);
        for v in cube.vertex_ids() {
            assert_eq!(adjacency.valence(v), 3);
            assert_eq!(adjacency.ring1(v).len(), 3);
            assert_eq!(adjacency.ring2(v).len(), 3);
            assert_eq!(adjacency.faces_of_vertex(v).len(), 3);
        }
        for e in cube.edge_ids() {
            assert_eq!(adjacency.faces_of_edge(e).len(), 2);
        }
    }

    #[test]
    fn out_of_range_queries_are_empty() {
        let quad = unit_quad();
        let adjacency = AdjacencyIndex::new(&quad);
        assert!(adjacency.faces_of_edge(EdgeId(99)).is_empty());
        assert!(adjacency.ring1(VertexId(99)).is_empty());
        assert!(adjacency.ring2(VertexId(99)).is_empty());
        assert_eq!(adjacency.valence(VertexId(99)), 0);
        assert!(std::ptr::eq(adjacency.mesh(), &quad));
    }
}
