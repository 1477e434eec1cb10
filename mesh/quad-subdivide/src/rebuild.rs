//! Topology of the refined mesh.

use hashbrown::HashSet;
use quad_types::{Edge, QuadMesh, QuadTopology, VertexId, edge_key};

use crate::error::{SubdivideError, SubdivideResult};

/// Edges and faces of one refinement step, before any coordinates are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefinedTopology {
    /// Vertex count of the refined mesh: `nV + nF + nE`.
    pub vertex_count: usize,
    /// Unique edges, first-seen orientation kept.
    pub edges: Vec<Edge>,
    /// Four sub-quads per original face, in face order.
    pub quads: Vec<[VertexId; 4]>,
}

/// Split every face of `mesh` into four quads.
///
/// For face `f` with corners `(v0, v1, v2, v3)` and side edges
/// `(e0, e1, e2, e3)`, the face-point is `p = nV + f` and the edge-point of
/// side `k` is `m_k = nV + nF + e_k`. The sub-quads
/// `(v0, m0, p, m3)`, `(m0, v1, m1, p)`, `(m3, p, m2, v3)`, `(p, m1, v2, m2)`
/// keep the parent's winding.
///
/// # Errors
///
/// Returns [`SubdivideError::IndexOverflow`] if `nV + nF + nE` does not fit
/// in a `u32` vertex index.
pub fn rebuild_topology(mesh: &QuadMesh) -> SubdivideResult<RefinedTopology> {
    let counts = mesh.counts();
    let vertex_count = counts.vertices + counts.faces + counts.edges;
    let overflow = || SubdivideError::IndexOverflow { count: vertex_count };
    u32::try_from(vertex_count).map_err(|_| overflow())?;

    // Both offsets are below vertex_count, which fits in u32
    let face_base = u32::try_from(counts.vertices).map_err(|_| overflow())?;
    let edge_base = u32::try_from(counts.vertices + counts.faces).map_err(|_| overflow())?;

    let mut seen: HashSet<(u32, u32)> = HashSet::with_capacity(2 * counts.edges + 4 * counts.faces);
    let mut edges = Vec::with_capacity(2 * counts.edges + 4 * counts.faces);
    let mut quads = Vec::with_capacity(4 * counts.faces);

    for (fid, face) in mesh.face_ids().zip(mesh.faces()) {
        let [v0, v1, v2, v3] = face.vertices;
        let p = VertexId(face_base + fid.raw());
        let [m0, m1, m2, m3] = face.edges.map(|e| VertexId(edge_base + e.raw()));

        quads.extend([[v0, m0, p, m3], [m0, v1, m1, p], [m3, p, m2, v3], [p, m1, v2, m2]]);

        for (a, b) in [
            (v0, m0),
            (m0, p),
            (p, m3),
            (m3, v0),
            (m0, v1),
            (v1, m1),
            (m1, p),
            (m3, v3),
            (v3, m2),
            (m2, p),
            (m2, v2),
            (v2, m1),
        ] {
            if seen.insert(edge_key(a, b)) {
                edges.push(Edge::new(a, b));
            }
        }
    }

    Ok(RefinedTopology {
        vertex_count,
        edges,
        quads,
    })
}
