//! End-to-end Catmull-Clark scenarios on known meshes.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use approx::assert_relative_eq;
use hashbrown::HashSet;
use quad_subdivide::{SubdivideParams, catmull_clark_step, subdivide_mesh};
use quad_types::{
    AdjacencyIndex, Edge, Point3, QuadMesh, QuadTopology, VertexId, VertexNeighborhood, planar_grid,
    unit_cube, unit_quad,
};

/// Signed area of a planar quad in the xy plane (shoelace).
fn signed_area(mesh: &QuadMesh, corners: [VertexId; 4]) -> f64 {
    let p = corners.map(|v| *mesh.position(v).unwrap());
    (0..4)
        .map(|k| {
            let (a, b) = (p[k], p[(k + 1) % 4]);
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        * 0.5
}

#[test]
fn grid_2x2_one_step() {
    let grid = planar_grid(2, 2, 1.0);
    let refined = catmull_clark_step(&grid).unwrap();

    assert_eq!(refined.vertex_count(), 25);
    assert_eq!(refined.edge_count(), 40);
    assert_eq!(refined.face_count(), 16);

    // Corner (0,0,0) has valence 1 and moves toward its two edge-points
    assert_relative_eq!(
        *refined.position(VertexId(0)).unwrap(),
        Point3::new(0.125, 0.125, 0.0)
    );
    // Opposite corner (2,2,0)
    assert_relative_eq!(
        *refined.position(VertexId(8)).unwrap(),
        Point3::new(1.875, 1.875, 0.0)
    );
    // Boundary midpoint (1,0,0) has valence 2 and stays on the boundary
    assert_relative_eq!(
        *refined.position(VertexId(1)).unwrap(),
        Point3::new(1.0, 0.0, 0.0)
    );
    // Interior vertex (1,1,0), valence 4: beta = 3/8, gamma = 1/16
    assert_relative_eq!(
        *refined.position(VertexId(4)).unwrap(),
        Point3::new(1.0, 1.0, 0.0)
    );
}

/// 2x2 grid with corner (0,0) lifted to z = 1 and centre (1,1) to z = 2.
fn lifted_grid() -> QuadMesh {
    let grid = planar_grid(2, 2, 1.0);
    let mut positions = grid.vertex_positions().to_vec();
    positions[0].z = 1.0;
    positions[4].z = 2.0;
    grid.with_positions(positions).unwrap()
}

#[test]
fn lifted_grid_one_step() {
    let refined = catmull_clark_step(&lifted_grid()).unwrap();

    // Corner: 1/4 of edge-points (0.5,0,0.5) + (0,0.5,0.5), plus 1/2 of old
    assert_relative_eq!(
        *refined.position(VertexId(0)).unwrap(),
        Point3::new(0.125, 0.125, 0.75)
    );
    // Boundary (1,0,0): 3/4 old + 1/8 of the two boundary edge-points
    // (0.5,0,0.5) and (1.5,0,0); the interior edge-point toward the centre
    // has valence 4 and is skipped
    assert_relative_eq!(
        *refined.position(VertexId(1)).unwrap(),
        Point3::new(1.0, 0.0, 0.0625)
    );
    // Centre, n = 4: 9/16 * 2 + 3/32 * (ring 1 z sum 3.125)
    // + 1/64 * (ring 2 z sum 2.25) = 93/64
    assert_relative_eq!(
        *refined.position(VertexId(4)).unwrap(),
        Point3::new(1.0, 1.0, 93.0 / 64.0),
        epsilon = 1e-12
    );
}

#[test]
fn grid_2x2_new_vertex_layout() {
    let grid = planar_grid(2, 2, 1.0);
    let refined = catmull_clark_step(&grid).unwrap();
    let (n_v, n_f) = (grid.vertex_count(), grid.face_count());

    // Face-points follow the originals in face order
    let expected_centres = [(0.5, 0.5), (1.5, 0.5), (0.5, 1.5), (1.5, 1.5)];
    for (f, (x, y)) in expected_centres.into_iter().enumerate() {
        let p = refined.vertex_positions()[n_v + f];
        assert_relative_eq!(p, Point3::new(x, y, 0.0));
    }

    // Edge-points follow the face-points in edge order
    for (e, edge) in grid.edges().enumerate() {
        let p = refined.vertex_positions()[n_v + n_f + e];
        let (a, b) = edge.endpoints();
        let mid = nalgebra::center(grid.position(a).unwrap(), grid.position(b).unwrap());
        // On a uniform flat grid every edge-point is the edge midpoint
        assert_relative_eq!(p, mid, epsilon = 1e-12);
    }
}

#[test]
fn refined_faces_keep_winding() {
    let grid = planar_grid(2, 2, 1.0);
    let refined = catmull_clark_step(&grid).unwrap();

    for face in refined.faces() {
        let area = signed_area(&refined, face.vertices);
        assert!(area > 0.0, "face {:?} has area {area}", face.vertices);
    }
}

#[test]
fn refined_edges_are_unique_and_resolve() {
    for mesh in [unit_quad(), planar_grid(3, 2, 0.5), unit_cube()] {
        let refined = catmull_clark_step(&mesh).unwrap();

        let keys: HashSet<(u32, u32)> = refined.edges().map(Edge::key).collect();
        assert_eq!(keys.len(), refined.edge_count());

        for face in refined.faces() {
            for (k, (a, b)) in face.corner_pairs().into_iter().enumerate() {
                let edge = refined.edge(face.edges[k]).unwrap();
                assert!(edge.contains(a) && edge.contains(b));
            }
        }
    }
}

#[test]
fn original_valence_is_preserved() {
    let cube = unit_cube();
    let refined = catmull_clark_step(&cube).unwrap();
    let before = AdjacencyIndex::new(&cube);
    let after = AdjacencyIndex::new(&refined);

    for v in cube.vertex_ids() {
        assert_eq!(before.valence(v), after.valence(v));
        assert_eq!(after.ring1(v).len(), after.valence(v));
    }
    // Face-points of a quad mesh always have valence 4
    for f in 0..cube.face_count() {
        let id = VertexId(u32::try_from(cube.vertex_count() + f).unwrap());
        assert_eq!(after.valence(id), 4);
    }
}

#[test]
fn cube_shrinks_toward_centre() {
    let refined = catmull_clark_step(&unit_cube()).unwrap();
    let centre = Point3::new(0.5, 0.5, 0.5);

    for v in 0..8 {
        let p = refined.vertex_positions()[v];
        let d = (p - centre).norm();
        assert!(d < (0.75_f64).sqrt(), "vertex {v} did not move inward");
        // Symmetric: every original corner ends up the same distance away
        let first = (refined.vertex_positions()[0] - centre).norm();
        assert_relative_eq!(d, first, epsilon = 1e-12);
    }
}

#[test]
fn repeated_steps_follow_count_recurrence() {
    let grid = planar_grid(2, 2, 1.0);
    let result = subdivide_mesh(&grid, &SubdivideParams::new().with_iterations(3)).unwrap();

    let mut expected = grid.counts();
    for _ in 0..3 {
        expected = expected.refined();
    }
    assert_eq!(result.final_counts(), expected);
    assert_eq!(result.mesh.counts(), expected);
    assert_eq!(result.mesh.generation(), 3);
    assert_eq!(result.iterations(), 3);
}
