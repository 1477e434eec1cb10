//! Summary of a multi-level refinement run.

// Element counts stay far below 2^52
#![allow(clippy::cast_precision_loss)]

use std::fmt;

use quad_types::{MeshCounts, QuadMesh, QuadTopology};

/// Output of [`subdivide_mesh`](crate::subdivide_mesh).
#[derive(Debug, Clone)]
pub struct SubdivisionResult {
    /// The mesh after the last level.
    pub mesh: QuadMesh,

    /// Counts of the input mesh.
    pub original: MeshCounts,

    /// Counts after each level, first level first.
    pub levels: Vec<MeshCounts>,
}

impl SubdivisionResult {
    pub(crate) const fn new(original: MeshCounts, mesh: QuadMesh, levels: Vec<MeshCounts>) -> Self {
        Self {
            mesh,
            original,
            levels,
        }
    }

    /// Number of levels applied.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.levels.len()
    }

    /// Counts of the refined mesh.
    #[must_use]
    pub fn final_counts(&self) -> MeshCounts {
        self.mesh.counts()
    }

    /// Growth of the face count, `4^iterations` for a quad mesh.
    #[must_use]
    pub fn face_ratio(&self) -> f64 {
        ratio(self.final_counts().faces, self.original.faces)
    }

    /// Growth of the vertex count.
    #[must_use]
    pub fn vertex_ratio(&self) -> f64 {
        ratio(self.final_counts().vertices, self.original.vertices)
    }
}

fn ratio(after: usize, before: usize) -> f64 {
    if before == 0 {
        1.0
    } else {
        after as f64 / before as f64
    }
}

impl fmt::Display for SubdivisionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.final_counts();
        write!(
            f,
            "Catmull-Clark: {} → {} faces ({:.1}x), {} → {} vertices, {} iterations",
            self.original.faces,
            last.faces,
            self.face_ratio(),
            self.original.vertices,
            last.vertices,
            self.iterations()
        )
    }
}
