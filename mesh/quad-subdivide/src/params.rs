//! Knobs for multi-level refinement.

use quad_types::MeshCounts;

use crate::error::{SubdivideError, SubdivideResult};

/// Face budget used when none is given.
pub const DEFAULT_MAX_FACES: usize = 10_000_000;

/// How many Catmull-Clark levels to apply, and how large the result may grow.
///
/// ```
/// use quad_subdivide::SubdivideParams;
/// use quad_types::MeshCounts;
///
/// let params = SubdivideParams::new().with_iterations(2);
/// let grid = MeshCounts { vertices: 9, edges: 12, faces: 4 };
/// assert_eq!(params.projected_counts(grid).faces, 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubdivideParams {
    /// Levels to apply. Must be at least 1.
    pub iterations: u32,

    /// Upper bound on the face count of the final level.
    pub max_faces: usize,
}

impl Default for SubdivideParams {
    fn default() -> Self {
        Self {
            iterations: 1,
            max_faces: DEFAULT_MAX_FACES,
        }
    }
}

impl SubdivideParams {
    /// Single-level refinement within [`DEFAULT_MAX_FACES`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of levels.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the face budget.
    #[must_use]
    pub const fn with_max_faces(mut self, max_faces: usize) -> Self {
        self.max_faces = max_faces;
        self
    }

    /// Element counts after all levels, saturating at `usize::MAX`.
    #[must_use]
    pub const fn projected_counts(&self, counts: MeshCounts) -> MeshCounts {
        let MeshCounts {
            mut vertices,
            mut edges,
            mut faces,
        } = counts;
        let mut level = 0;
        while level < self.iterations {
            vertices = vertices.saturating_add(edges).saturating_add(faces);
            edges = edges
                .saturating_mul(2)
                .saturating_add(faces.saturating_mul(4));
            faces = faces.saturating_mul(4);
            level += 1;
        }
        MeshCounts {
            vertices,
            edges,
            faces,
        }
    }

    /// Reject a run that has no levels or would overshoot the face budget.
    ///
    /// # Errors
    ///
    /// [`SubdivideError::InvalidIterations`] or [`SubdivideError::MeshTooLarge`].
    pub fn check(&self, counts: MeshCounts) -> SubdivideResult<()> {
        if self.iterations == 0 {
            return Err(SubdivideError::InvalidIterations(self.iterations));
        }
        let projected = self.projected_counts(counts).faces;
        if projected > self.max_faces {
            return Err(SubdivideError::MeshTooLarge {
                current: counts.faces,
                projected,
                max: self.max_faces,
            });
        }
        Ok(())
    }
}
