//! Catmull-Clark step and drivers.

use std::sync::Arc;

use quad_types::{AdjacencyIndex, MeshTopology, QuadMesh, QuadTopology};
use tracing::{debug, trace};

use crate::error::{SubdivideError, SubdivideResult};
use crate::params::SubdivideParams;
use crate::points::{edge_points, face_points};
use crate::rebuild::rebuild_topology;
use crate::reposition::reposition_originals;
use crate::result::SubdivisionResult;

/// Apply one Catmull-Clark step.
///
/// The refined mesh has `nV + nF + nE` vertices laid out as the repositioned
/// originals at `[0, nV)`, face-points at `[nV, nV + nF)` and edge-points at
/// `[nV + nF, nV + nF + nE)`. Every face splits into four and every edge
/// into two. The input is left untouched.
///
/// # Errors
///
/// Returns an error if:
/// - The mesh is empty (no vertices or faces)
/// - An edge is not used by any face
/// - A vertex is not a corner of any face
/// - The refined vertex count exceeds the `u32` index range
///
/// # Examples
///
/// ```
/// use quad_types::{unit_quad, Point3, QuadTopology, VertexId};
/// use quad_subdivide::catmull_clark_step;
///
/// let refined = catmull_clark_step(&unit_quad())?;
///
/// assert_eq!(refined.vertex_count(), 9);
/// assert_eq!(refined.edge_count(), 12);
/// assert_eq!(refined.face_count(), 4);
///
/// // The face-point sits right after the four original vertices
/// assert_eq!(refined.position(VertexId(4)), Some(&Point3::new(0.5, 0.5, 0.0)));
/// # Ok::<(), quad_subdivide::SubdivideError>(())
/// ```
pub fn catmull_clark_step(mesh: &QuadMesh) -> SubdivideResult<QuadMesh> {
    if mesh.vertex_count() == 0 {
        return Err(SubdivideError::EmptyMesh);
    }
    if mesh.face_count() == 0 {
        return Err(SubdivideError::NoFaces);
    }

    let adjacency = AdjacencyIndex::new(mesh);
    let face_pts = face_points(mesh);
    trace!(count = face_pts.len(), "Computed face points");
    let edge_pts = edge_points(mesh, &adjacency)?;
    trace!(count = edge_pts.len(), "Computed edge points");
    let topology = rebuild_topology(mesh)?;
    trace!(
        edges = topology.edges.len(),
        faces = topology.quads.len(),
        "Rebuilt refined topology"
    );

    // Rings are taken on the refined topology, reading pre-step coordinates
    // for the originals and the fresh face- and edge-points for the rest.
    let staged_positions = [mesh.vertex_positions(), &face_pts, &edge_pts].concat();
    debug_assert_eq!(staged_positions.len(), topology.vertex_count);
    let staged = QuadMesh::from_parts(staged_positions, topology.edges, &topology.quads)?;

    let originals = reposition_originals(&staged, mesh.vertex_count())?;
    trace!(count = originals.len(), "Repositioned original vertices");
    let positions = [originals.as_slice(), &face_pts, &edge_pts].concat();

    Ok(staged
        .with_positions(positions)?
        .with_generation(mesh.generation().saturating_add(1)))
}

/// Subdivide a mesh using the specified parameters.
///
/// # Errors
///
/// Returns an error if:
/// - The mesh is empty (no vertices or faces)
/// - The iteration count is 0
/// - The resulting mesh would exceed `max_faces`
/// - Any step fails, see [`catmull_clark_step`]
///
/// # Examples
///
/// ```
/// use quad_types::planar_grid;
/// use quad_subdivide::{subdivide_mesh, SubdivideParams};
///
/// let grid = planar_grid(2, 2, 1.0);
/// let params = SubdivideParams::new().with_iterations(2);
/// let result = subdivide_mesh(&grid, &params)?;
///
/// // 4 * 4^2 = 64 faces after 2 iterations
/// assert_eq!(result.final_counts().faces, 64);
/// assert_eq!(result.mesh.generation(), 2);
/// # Ok::<(), quad_subdivide::SubdivideError>(())
/// ```
pub fn subdivide_mesh(
    mesh: &QuadMesh,
    params: &SubdivideParams,
) -> SubdivideResult<SubdivisionResult> {
    if mesh.vertex_count() == 0 {
        return Err(SubdivideError::EmptyMesh);
    }
    if mesh.face_count() == 0 {
        return Err(SubdivideError::NoFaces);
    }
    params.check(mesh.counts())?;

    let original = mesh.counts();
    debug!(
        "Subdividing mesh: {}, {} iterations",
        original, params.iterations
    );

    let mut current = catmull_clark_step(mesh)?;
    let mut levels = vec![current.counts()];
    debug!("Iteration 1: {}", current.counts());
    for i in 1..params.iterations {
        current = catmull_clark_step(&current)?;
        levels.push(current.counts());
        debug!("Iteration {}: {}", i + 1, current.counts());
    }

    Ok(SubdivisionResult::new(original, current, levels))
}

/// Refine the mesh held by `topology` in place.
///
/// Takes a snapshot, applies one [`catmull_clark_step`] and publishes the
/// result with [`MeshTopology::replace`]. Readers holding the old snapshot
/// keep it; new readers see the refined mesh. On error nothing is published.
///
/// # Errors
///
/// Returns any error from [`catmull_clark_step`].
///
/// # Examples
///
/// ```
/// use quad_types::{unit_quad, MeshTopology, QuadTopology};
/// use quad_subdivide::refine;
///
/// let topology = MeshTopology::from_mesh(unit_quad());
/// let refined = refine(&topology)?;
///
/// assert_eq!(refined.face_count(), 4);
/// assert_eq!(topology.counts().vertices, 9);
/// # Ok::<(), quad_subdivide::SubdivideError>(())
/// ```
pub fn refine(topology: &MeshTopology) -> SubdivideResult<Arc<QuadMesh>> {
    let current = topology.snapshot();
    let next = catmull_clark_step(&current)?;
    debug!(
        generation = next.generation(),
        "Refined mesh: {} -> {}",
        current.counts(),
        next.counts()
    );

    let next = Arc::new(next);
    topology.replace_shared(Arc::clone(&next));
    Ok(next)
}
