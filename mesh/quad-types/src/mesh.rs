//! Indexed quad mesh.

use std::fmt;

use hashbrown::HashMap;
use nalgebra::Point3;

use crate::element::{corner_pairs, edge_key};
use crate::{Edge, EdgeId, Face, FaceId, MeshError, MeshResult, QuadTopology, VertexId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Vertex, edge and face counts of a mesh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshCounts {
    /// Number of vertices.
    pub vertices: usize,
    /// Number of undirected edges.
    pub edges: usize,
    /// Number of quad faces.
    pub faces: usize,
}

impl MeshCounts {
    /// Counts after one Catmull-Clark step of a mesh with these counts.
    ///
    /// Every edge and face contributes a new vertex, every edge splits in
    /// two, every face adds four interior edges and splits into four.
    ///
    /// # Example
    ///
    /// ```
    /// use quad_types::MeshCounts;
    ///
    /// let quad = MeshCounts { vertices: 4, edges: 4, faces: 1 };
    /// let next = quad.refined();
    /// assert_eq!(next, MeshCounts { vertices: 9, edges: 12, faces: 4 });
    /// ```
    #[must_use]
    pub const fn refined(&self) -> Self {
        Self {
            vertices: self.vertices + self.edges + self.faces,
            edges: 2 * self.edges + 4 * self.faces,
            faces: 4 * self.faces,
        }
    }
}

impl fmt::Display for MeshCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vertices, {} edges, {} faces",
            self.vertices, self.edges, self.faces
        )
    }
}

/// An indexed quad mesh: vertex coordinates, undirected edges and quad faces.
///
/// A `QuadMesh` is an immutable snapshot. It can only be built through the
/// validating constructors, so every face's edge tuple is guaranteed to
/// resolve into the edge collection and every index is in range. Refining a
/// mesh produces a new `QuadMesh` with a higher [`generation`](Self::generation).
///
/// # Example
///
/// ```
/// use quad_types::{QuadMesh, QuadTopology};
///
/// let mesh = QuadMesh::from_raw(
///     &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
///     &[[0, 1], [1, 2], [2, 3], [3, 0]],
///     &[[0, 1, 2, 3]],
/// )?;
///
/// assert_eq!(mesh.vertex_count(), 4);
/// assert_eq!(mesh.edge_count(), 4);
/// assert_eq!(mesh.face_count(), 1);
/// # Ok::<(), quad_types::MeshError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuadMesh {
    positions: Vec<Point3<f64>>,
    edges: Vec<Edge>,
    faces: Vec<Face>,
    generation: u32,
}

impl QuadMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positions: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
            generation: 0,
        }
    }

    /// Build a mesh from the raw arrays a mesh loader delivers.
    ///
    /// Edges are built first, then faces resolve their side edges against
    /// the finished edge table.
    ///
    /// # Errors
    ///
    /// Returns an error if an index is out of range, an edge is degenerate
    /// or duplicated, or a face side has no matching edge.
    pub fn from_raw(
        coords: &[[f64; 3]],
        edge_pairs: &[[u32; 2]],
        face_quads: &[[u32; 4]],
    ) -> MeshResult<Self> {
        let positions = coords.iter().map(|&[x, y, z]| Point3::new(x, y, z)).collect();
        let edges = edge_pairs.iter().map(|&[a, b]| Edge::from_raw(a, b)).collect();
        let quads = face_quads
            .iter()
            .map(|q| q.map(VertexId))
            .collect::<Vec<_>>();
        Self::from_parts(positions, edges, &quads)
    }

    /// Build a mesh from typed parts.
    ///
    /// # Errors
    ///
    /// Same conditions as [`from_raw`](Self::from_raw).
    pub fn from_parts(
        positions: Vec<Point3<f64>>,
        edges: Vec<Edge>,
        quads: &[[VertexId; 4]],
    ) -> MeshResult<Self> {
        check_len("vertex", positions.len())?;
        check_len("edge", edges.len())?;
        check_len("face", quads.len())?;

        let table = EdgeTable::build(&edges, positions.len())?;
        let faces = table.resolve_faces(quads, positions.len())?;

        Ok(Self {
            positions,
            edges,
            faces,
            generation: 0,
        })
    }

    /// Build a mesh from faces alone, deriving the edge collection.
    ///
    /// Edges are numbered in the order their corner pair is first seen,
    /// walking faces in order and sides `0..4` within each face.
    ///
    /// # Errors
    ///
    /// Returns an error if a corner is out of range or two consecutive
    /// corners are the same vertex.
    pub fn from_quads(positions: Vec<Point3<f64>>, quads: &[[VertexId; 4]]) -> MeshResult<Self> {
        check_len("vertex", positions.len())?;
        check_len("face", quads.len())?;

        for (fi, quad) in quads.iter().enumerate() {
            check_corners(fi, quad, positions.len())?;
            for (corner, (a, b)) in corner_pairs(quad).into_iter().enumerate() {
                if a == b {
                    return Err(MeshError::DegenerateFace {
                        face: fi,
                        corner,
                        vertex: a.0,
                    });
                }
            }
        }

        let (edges, faces) = derive_topology(quads);
        check_len("edge", edges.len())?;

        Ok(Self {
            positions,
            edges,
            faces,
            generation: 0,
        })
    }

    /// Replace every vertex coordinate, keeping the topology.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::PositionCountMismatch`] if the number of
    /// positions differs from the vertex count.
    pub fn with_positions(self, positions: Vec<Point3<f64>>) -> MeshResult<Self> {
        if positions.len() != self.positions.len() {
            return Err(MeshError::PositionCountMismatch {
                expected: self.positions.len(),
                actual: positions.len(),
            });
        }
        Ok(Self { positions, ..self })
    }

    /// Tag the mesh with a refinement generation.
    #[must_use]
    pub fn with_generation(mut self, generation: u32) -> Self {
        self.generation = generation;
        self
    }

    /// Refinement generation: 0 for a loaded mesh, +1 per subdivision step.
    #[inline]
    #[must_use]
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    /// All vertex coordinates, indexed by [`VertexId`].
    #[inline]
    #[must_use]
    pub fn vertex_positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// All edges, indexed by [`EdgeId`].
    #[inline]
    #[must_use]
    pub fn edge_records(&self) -> &[Edge] {
        &self.edges
    }

    /// All faces, indexed by [`FaceId`].
    #[inline]
    #[must_use]
    pub fn face_records(&self) -> &[Face] {
        &self.faces
    }

    /// Iterate over vertex indices.
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: counts are checked against u32 at construction
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + use<> {
        (0..self.positions.len() as u32).map(VertexId)
    }

    /// Iterate over edge indices.
    #[allow(clippy::cast_possible_truncation)]
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + use<> {
        (0..self.edges.len() as u32).map(EdgeId)
    }

    /// Iterate over face indices.
    #[allow(clippy::cast_possible_truncation)]
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + use<> {
        (0..self.faces.len() as u32).map(FaceId)
    }
}

impl QuadTopology for QuadMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn position(&self, id: VertexId) -> Option<&Point3<f64>> {
        self.positions.get(id.index())
    }

    fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    fn face(&self, id: FaceId) -> Option<&Face> {
        self.faces.get(id.index())
    }

    fn positions(&self) -> impl Iterator<Item = &Point3<f64>> {
        self.positions.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    fn faces(&self) -> impl Iterator<Item = &Face> {
        self.faces.iter()
    }
}

/// Lookup from sorted endpoint pair to edge index.
struct EdgeTable {
    lookup: HashMap<(u32, u32), EdgeId>,
}

impl EdgeTable {
    #[allow(clippy::cast_possible_truncation)]
    fn build(edges: &[Edge], vertex_count: usize) -> MeshResult<Self> {
        let mut lookup = HashMap::with_capacity(edges.len());

        for (ei, edge) in edges.iter().enumerate() {
            for v in [edge.a, edge.b] {
                if v.index() >= vertex_count {
                    return Err(MeshError::VertexOutOfRange {
                        element: format!("edge {ei}"),
                        vertex: v.0,
                        vertex_count,
                    });
                }
            }
            if edge.is_degenerate() {
                return Err(MeshError::DegenerateEdge {
                    edge: ei,
                    vertex: edge.a.0,
                });
            }

            let key = edge.key();
            if let Some(first) = lookup.insert(key, EdgeId(ei as u32)) {
                return Err(MeshError::DuplicateEdge {
                    first: first.index(),
                    duplicate: ei,
                    a: key.0,
                    b: key.1,
                });
            }
        }

        Ok(Self { lookup })
    }

    fn resolve_faces(&self, quads: &[[VertexId; 4]], vertex_count: usize) -> MeshResult<Vec<Face>> {
        quads
            .iter()
            .enumerate()
            .map(|(fi, quad)| {
                check_corners(fi, quad, vertex_count)?;
                self.resolve_face(fi, *quad)
            })
            .collect()
    }

    fn resolve_face(&self, fi: usize, vertices: [VertexId; 4]) -> MeshResult<Face> {
        // Every slot starts unset for every face; an unset slot is an error,
        // never a value carried over from a previous face.
        let mut slots: [Option<EdgeId>; 4] = [None; 4];
        for (k, (a, b)) in corner_pairs(&vertices).into_iter().enumerate() {
            slots[k] = self.lookup.get(&edge_key(a, b)).copied();
        }

        let mut edges = [EdgeId(0); 4];
        for (k, slot) in slots.into_iter().enumerate() {
            let (from, to) = (vertices[k], vertices[(k + 1) % 4]);
            edges[k] = slot.ok_or(MeshError::MissingEdge {
                face: fi,
                corner: k,
                from: from.0,
                to: to.0,
            })?;
        }

        Ok(Face { vertices, edges })
    }
}

fn check_len(kind: &'static str, count: usize) -> MeshResult<()> {
    if u32::try_from(count).is_err() {
        return Err(MeshError::TooManyElements { kind, count });
    }
    Ok(())
}

fn check_corners(fi: usize, quad: &[VertexId; 4], vertex_count: usize) -> MeshResult<()> {
    for v in quad {
        if v.index() >= vertex_count {
            return Err(MeshError::VertexOutOfRange {
                element: format!("face {fi}"),
                vertex: v.0,
                vertex_count,
            });
        }
    }
    Ok(())
}

/// Number edges by first appearance and wire faces to them in one pass.
#[allow(clippy::cast_possible_truncation)]
fn derive_topology(quads: &[[VertexId; 4]]) -> (Vec<Edge>, Vec<Face>) {
    let mut lookup: HashMap<(u32, u32), EdgeId> = HashMap::with_capacity(quads.len() * 2);
    let mut edges = Vec::with_capacity(quads.len() * 2);
    let mut faces = Vec::with_capacity(quads.len());

    for quad in quads {
        let mut face_edges = [EdgeId(0); 4];
        for (k, (a, b)) in corner_pairs(quad).into_iter().enumerate() {
            face_edges[k] = *lookup.entry(edge_key(a, b)).or_insert_with(|| {
                edges.push(Edge::new(a, b));
                EdgeId((edges.len() - 1) as u32)
            });
        }
        faces.push(Face {
            vertices: *quad,
            edges: face_edges,
        });
    }

    (edges, faces)
}

/// A single unit quad in the `z = 0` plane.
///
/// Corners run counter-clockwise from the origin, so the face is
/// `[0, 1, 2, 3]` and the edges are `(0,1)`, `(1,2)`, `(2,3)`, `(3,0)`.
///
/// # Example
///
/// ```
/// use quad_types::{unit_quad, Point3, QuadTopology, VertexId};
///
/// let quad = unit_quad();
/// assert_eq!(quad.vertex_count(), 4);
/// assert_eq!(quad.edge_count(), 4);
/// assert_eq!(quad.face_count(), 1);
/// assert_eq!(quad.position(VertexId(2)), Some(&Point3::new(1.0, 1.0, 0.0)));
/// ```
#[must_use]
pub fn unit_quad() -> QuadMesh {
    let positions = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ];
    let (edges, faces) = derive_topology(&[[0, 1, 2, 3].map(VertexId)]);
    QuadMesh {
        positions,
        edges,
        faces,
        generation: 0,
    }
}

/// A planar `nx × ny` grid of square quads in the `z = 0` plane.
///
/// Vertex `(i, j)` sits at `(i·spacing, j·spacing, 0)` and has index
/// `j·(nx + 1) + i`. Faces are numbered row by row with counter-clockwise
/// winding seen from `+z`.
///
/// # Example
///
/// ```
/// use quad_types::{planar_grid, QuadTopology};
///
/// let grid = planar_grid(2, 2, 1.0);
/// assert_eq!(grid.vertex_count(), 9);
/// assert_eq!(grid.edge_count(), 12);
/// assert_eq!(grid.face_count(), 4);
/// ```
#[must_use]
pub fn planar_grid(nx: u32, ny: u32, spacing: f64) -> QuadMesh {
    let row = nx + 1;
    let positions = (0..=ny)
        .flat_map(move |j| {
            (0..=nx).map(move |i| {
                Point3::new(f64::from(i) * spacing, f64::from(j) * spacing, 0.0)
            })
        })
        .collect();

    let quads: Vec<[VertexId; 4]> = (0..ny)
        .flat_map(move |j| {
            (0..nx).map(move |i| {
                let v = |i: u32, j: u32| VertexId(j * row + i);
                [v(i, j), v(i + 1, j), v(i + 1, j + 1), v(i, j + 1)]
            })
        })
        .collect();

    let (edges, faces) = derive_topology(&quads);
    QuadMesh {
        positions,
        edges,
        faces,
        generation: 0,
    }
}

/// A closed unit cube from `(0,0,0)` to `(1,1,1)` made of six quads.
///
/// Every vertex has valence 3 and every edge is shared by two faces.
///
/// # Example
///
/// ```
/// use quad_types::{unit_cube, QuadTopology};
///
/// let cube = unit_cube();
/// assert_eq!(cube.vertex_count(), 8);
/// assert_eq!(cube.edge_count(), 12);
/// assert_eq!(cube.face_count(), 6);
/// ```
#[must_use]
pub fn unit_cube() -> QuadMesh {
    let positions = vec![
        Point3::new(0.0, 0.0, 0.0), // 0
        Point3::new(1.0, 0.0, 0.0), // 1
        Point3::new(1.0, 1.0, 0.0), // 2
        Point3::new(0.0, 1.0, 0.0), // 3
        Point3::new(0.0, 0.0, 1.0), // 4
        Point3::new(1.0, 0.0, 1.0), // 5
        Point3::new(1.0, 1.0, 1.0), // 6
        Point3::new(0.0, 1.0, 1.0), // 7
    ];

    // CCW when viewed from outside
    let quads = [
        [0, 3, 2, 1], // bottom, -Z
        [4, 5, 6, 7], // top, +Z
        [0, 1, 5, 4], // front, -Y
        [3, 7, 6, 2], // back, +Y
        [0, 4, 7, 3], // left, -X
        [1, 2, 6, 5], // right, +X
    ]
    .map(|q| q.map(VertexId));

    let (edges, faces) = derive_topology(&quads);
    QuadMesh {
        positions,
        edges,
        faces,
        generation: 0,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use hashbrown::HashSet;

    fn square_coords() -> [[f64; 3]; 4] {
        [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ]
    }

    #[test]
    fn from_raw_resolves_face_edges() {
        // Edges deliberately listed out of face order and reversed
        let mesh = QuadMesh::from_raw(
            &square_coords(),
            &[[3, 0], [2, 1], [0, 1], [2, 3]],
            &[[0, 1, 2, 3]],
        )
        .expect("valid quad");

        let face = mesh.face(FaceId(0)).unwrap();
        assert_eq!(face.edges, [EdgeId(2), EdgeId(1), EdgeId(3), EdgeId(0)]);
        assert_eq!(mesh.generation(), 0);
    }

    #[test]
    fn missing_edge_is_rejected() {
        let result = QuadMesh::from_raw(
            &square_coords(),
            &[[0, 1], [1, 2], [2, 3]],
            &[[0, 1, 2, 3]],
        );
        assert_eq!(
            result,
            Err(MeshError::MissingEdge {
                face: 0,
                corner: 3,
                from: 3,
                to: 0,
            })
        );
    }

    #[test]
    fn missing_edge_does_not_borrow_from_previous_face() {
        // Face 0 resolves all four sides; face 1 lacks side (4, 5).
        let coords = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [2.0, 0.0, 0.0],
            [2.0, 1.0, 0.0],
        ];
        let edges = [[0, 1], [1, 2], [2, 3], [3, 0], [1, 4], [5, 2]];
        let result = QuadMesh::from_raw(&coords, &edges, &[[0, 1, 2, 3], [1, 4, 5, 2]]);
        assert!(matches!(
            result,
            Err(MeshError::MissingEdge {
                face: 1,
                corner: 1,
                ..
            })
        ));
    }

    #[test]
    fn duplicate_edge_is_rejected() {
        let result = QuadMesh::from_raw(
            &square_coords(),
            &[[0, 1], [1, 2], [2, 3], [3, 0], [1, 0]],
            &[[0, 1, 2, 3]],
        );
        assert!(matches!(
            result,
            Err(MeshError::DuplicateEdge {
                first: 0,
                duplicate: 4,
                ..
            })
        ));
    }

    #[test]
    fn degenerate_edge_is_rejected() {
        let result = QuadMesh::from_raw(&square_coords(), &[[0, 1], [2, 2]], &[]);
        assert!(matches!(
            result,
            Err(MeshError::DegenerateEdge { edge: 1, vertex: 2 })
        ));
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let result = QuadMesh::from_raw(&square_coords(), &[[0, 9]], &[]);
        assert!(matches!(
            result,
            Err(MeshError::VertexOutOfRange { vertex: 9, .. })
        ));

        let result = QuadMesh::from_raw(
            &square_coords(),
            &[[0, 1], [1, 2], [2, 3], [3, 0]],
            &[[0, 1, 2, 7]],
        );
        assert!(matches!(
            result,
            Err(MeshError::VertexOutOfRange { vertex: 7, .. })
        ));
    }

    #[test]
    fn from_quads_derives_unique_edges() {
        let grid = planar_grid(3, 2, 1.0);
        assert_eq!(grid.vertex_count(), 12);
        assert_eq!(grid.face_count(), 6);
        // 3 * 3 horizontal + 4 * 2 vertical
        assert_eq!(grid.edge_count(), 17);

        let unique: HashSet<(u32, u32)> = grid.edges().map(Edge::key).collect();
        assert_eq!(unique.len(), grid.edge_count());

        for face in grid.faces() {
            for (k, (a, b)) in face.corner_pairs().into_iter().enumerate() {
                let edge = grid.edge(face.edges[k]).unwrap();
                assert_eq!(edge.key(), edge_key(a, b));
            }
        }
    }

    #[test]
    fn from_quads_rejects_repeated_corner() {
        let positions = square_coords().map(|[x, y, z]| Point3::new(x, y, z)).to_vec();
        let quads = [[0, 1, 2, 3].map(VertexId), [0, 1, 1, 3].map(VertexId)];
        let result = QuadMesh::from_quads(positions, &quads);
        assert_eq!(
            result,
            Err(MeshError::DegenerateFace {
                face: 1,
                corner: 1,
                vertex: 1,
            })
        );
    }

    #[test]
    fn unit_quad_winds_counter_clockwise() {
        let quad = unit_quad();
        let face = quad.face(FaceId(0)).unwrap();
        assert_eq!(face.vertices, [0, 1, 2, 3].map(VertexId));

        let keys: Vec<(u32, u32)> = quad.edges().map(Edge::key).collect();
        assert_eq!(keys, vec![(0, 1), (1, 2), (2, 3), (0, 3)]);

        let corners: Vec<Point3<f64>> = square_coords()
            .map(|[x, y, z]| Point3::new(x, y, z))
            .to_vec();
        assert_eq!(quad.vertex_positions(), corners.as_slice());
    }

    #[test]
    fn with_positions_checks_length() {
        let quad = unit_quad();
        let result = quad.clone().with_positions(vec![Point3::origin(); 3]);
        assert_eq!(
            result,
            Err(MeshError::PositionCountMismatch {
                expected: 4,
                actual: 3,
            })
        );

        let moved = quad.with_positions(vec![Point3::new(5.0, 5.0, 5.0); 4]).unwrap();
        assert_eq!(moved.position(VertexId(2)), Some(&Point3::new(5.0, 5.0, 5.0)));
        assert_eq!(moved.edge_count(), 4);
    }

    #[test]
    fn counts_and_refined_counts() {
        let grid = planar_grid(2, 2, 1.0);
        let counts = grid.counts();
        assert_eq!(
            counts,
            MeshCounts {
                vertices: 9,
                edges: 12,
                faces: 4,
            }
        );
        assert_eq!(
            counts.refined(),
            MeshCounts {
                vertices: 25,
                edges: 40,
                faces: 16,
            }
        );
        assert_eq!(counts.to_string(), "9 vertices, 12 edges, 4 faces");
    }

    #[test]
    fn unit_cube_is_closed() {
        let cube = unit_cube();
        let mut uses: HashMap<EdgeId, usize> = HashMap::new();
        for face in cube.faces() {
            for e in face.edges {
                *uses.entry(e).or_default() += 1;
            }
        }
        assert_eq!(uses.len(), 12);
        assert!(uses.values().all(|&n| n == 2));
    }

    #[test]
    fn id_iterators_cover_collections() {
        let cube = unit_cube();
        assert_eq!(cube.vertex_ids().count(), 8);
        assert_eq!(cube.edge_ids().last(), Some(EdgeId(11)));
        assert_eq!(cube.face_ids().last(), Some(FaceId(5)));
        assert_eq!(cube.with_generation(3).generation(), 3);
    }

    #[test]
    fn empty_mesh() {
        let mesh = QuadMesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.counts(), MeshCounts::default());
    }
}
