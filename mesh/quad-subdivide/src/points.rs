//! New vertex placement: face-points and edge-points.

use nalgebra::{Point3, Vector3};
use quad_types::{AdjacencyIndex, Edge, EdgeId, Face, QuadMesh, QuadTopology, VertexId};
use smallvec::SmallVec;
use tracing::warn;

use crate::error::{SubdivideError, SubdivideResult};

/// Endpoint weight of an interior edge-point.
const EDGE_ENDPOINT_WEIGHT: f64 = 3.0 / 8.0;

/// Weight of each outer vertex of an interior edge-point.
const EDGE_OUTER_WEIGHT: f64 = 1.0 / 16.0;

/// Face-points of every face, in face order.
///
/// These become vertices `nV..nV + nF` of the refined mesh.
#[must_use]
pub fn face_points(mesh: &QuadMesh) -> Vec<Point3<f64>> {
    mesh.faces().map(|face| face_point(mesh, face)).collect()
}

/// Centroid of a face's four corners.
#[must_use]
pub fn face_point(mesh: &QuadMesh, face: &Face) -> Point3<f64> {
    let sum: Vector3<f64> = face.vertices.iter().map(|&v| coords(mesh, v)).sum();
    Point3::from(sum * 0.25)
}

/// Edge-points of every edge, in edge order.
///
/// These become vertices `nV + nF..nV + nF + nE` of the refined mesh.
///
/// # Errors
///
/// Returns [`SubdivideError::OrphanEdge`] if an edge is not a side of any face.
pub fn edge_points(
    mesh: &QuadMesh,
    adjacency: &AdjacencyIndex<'_>,
) -> SubdivideResult<Vec<Point3<f64>>> {
    mesh.edge_ids()
        .zip(mesh.edges())
        .map(|(e, edge)| edge_point(mesh, adjacency, e, edge))
        .collect()
}

/// Position of a single edge-point.
///
/// A boundary edge (one face) gets its midpoint. An edge shared by more than
/// one face gets `3/8` of each endpoint plus `1/16` of every other corner of
/// those faces. The weights are not renormalised when a non-manifold edge
/// has more or fewer than four such corners.
///
/// # Errors
///
/// Returns [`SubdivideError::OrphanEdge`] if no face uses the edge.
pub fn edge_point(
    mesh: &QuadMesh,
    adjacency: &AdjacencyIndex<'_>,
    e: EdgeId,
    edge: &Edge,
) -> SubdivideResult<Point3<f64>> {
    let (a, b) = edge.endpoints();

    match adjacency.faces_of_edge(e) {
        [] => Err(SubdivideError::OrphanEdge { edge: e.raw() }),
        [_] => Ok(Point3::from((coords(mesh, a) + coords(mesh, b)) * 0.5)),
        faces => {
            let mut outer: SmallVec<[VertexId; 4]> = SmallVec::new();
            for corner in faces
                .iter()
                .flat_map(|f| mesh.face_records()[f.index()].vertices)
            {
                if corner != a && corner != b && !outer.contains(&corner) {
                    outer.push(corner);
                }
            }

            if outer.len() != 4 {
                warn!(
                    edge = e.raw(),
                    faces = faces.len(),
                    outer = outer.len(),
                    "Interior edge does not have four outer vertices; edge-point weights do not sum to 1"
                );
            }

            let ends = (coords(mesh, a) + coords(mesh, b)) * EDGE_ENDPOINT_WEIGHT;
            let others: Vector3<f64> = outer.iter().map(|&v| coords(mesh, v)).sum();
            Ok(Point3::from(ends + others * EDGE_OUTER_WEIGHT))
        }
    }
}

/// Coordinate vector of a vertex. `QuadMesh` construction keeps every
/// referenced index in range, so an out-of-range id is a broken invariant
/// and panics.
fn coords(mesh: &QuadMesh, v: VertexId) -> Vector3<f64> {
    mesh.vertex_positions()[v.index()].coords
}
