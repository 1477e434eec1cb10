//! Repositioning of the original vertices.

// Valence is a small face count
#![allow(clippy::cast_precision_loss)]

use nalgebra::{Point3, Vector3};
use quad_types::{AdjacencyIndex, QuadMesh, VertexId, VertexNeighborhood};

use crate::error::{SubdivideError, SubdivideResult};

/// Which smoothing rule moves an original vertex.
///
/// The rule is picked from the vertex's valence in the refined topology,
/// which equals the number of original faces it was a corner of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexRule {
    /// Valence 1: the corner of a single face.
    Corner,
    /// Valence 2: a vertex on an open boundary.
    Boundary,
    /// Valence 3 or more.
    Interior {
        /// Number of incident faces.
        valence: usize,
    },
}

impl VertexRule {
    /// Pick the rule for a valence. A vertex of valence 0 has none.
    ///
    /// # Example
    ///
    /// ```
    /// use quad_subdivide::VertexRule;
    ///
    /// assert_eq!(VertexRule::classify(0), None);
    /// assert_eq!(VertexRule::classify(2), Some(VertexRule::Boundary));
    /// assert_eq!(VertexRule::classify(5), Some(VertexRule::Interior { valence: 5 }));
    /// ```
    #[must_use]
    pub const fn classify(valence: usize) -> Option<Self> {
        match valence {
            0 => None,
            1 => Some(Self::Corner),
            2 => Some(Self::Boundary),
            valence => Some(Self::Interior { valence }),
        }
    }

    /// New position of `v`, given its current position `old`.
    ///
    /// Ring members are looked up in `coords` by vertex index.
    ///
    /// - `Corner`: `1/4 · Σ ring1 + 1/2 · old`
    /// - `Boundary`: `3/4 · old + 1/8 · Σ ring1`, counting only ring members
    ///   of valence at most 2
    /// - `Interior`: with `β = 3/(2n)` and `γ = 1/(4n)`,
    ///   `(1 − β − γ) · old + β/n · Σ ring1 + γ/n · Σ ring2`
    #[must_use]
    pub fn apply<N: VertexNeighborhood>(
        self,
        v: VertexId,
        old: &Point3<f64>,
        neighborhood: &N,
        coords: &[Point3<f64>],
    ) -> Point3<f64> {
        match self {
            Self::Corner => {
                let ring1 = sum_of(neighborhood.ring1(v), coords);
                Point3::from(ring1 * 0.25 + old.coords * 0.5)
            }
            Self::Boundary => {
                let ring1 = sum_of(
                    neighborhood
                        .ring1(v)
                        .iter()
                        .filter(|&&r| neighborhood.valence(r) <= 2),
                    coords,
                );
                Point3::from(old.coords * 0.75 + ring1 * 0.125)
            }
            Self::Interior { valence } => {
                let n = valence as f64;
                let beta = 3.0 / (2.0 * n);
                let gamma = 1.0 / (4.0 * n);
                let ring1 = sum_of(neighborhood.ring1(v), coords);
                let ring2 = sum_of(&neighborhood.ring2(v), coords);
                Point3::from(
                    old.coords * (1.0 - beta - gamma) + ring1 * (beta / n) + ring2 * (gamma / n),
                )
            }
        }
    }
}

/// Sum of ring member coordinates. Ring members of a validated mesh are
/// always in range, so a stray index panics.
fn sum_of<'a>(
    ids: impl IntoIterator<Item = &'a VertexId>,
    coords: &[Point3<f64>],
) -> Vector3<f64> {
    ids.into_iter().map(|r| coords[r.index()].coords).sum()
}

/// Move the first `original_count` vertices of a staged refined mesh.
///
/// `staged` carries the refined topology with the pre-step coordinates of
/// the original vertices followed by the face-points and edge-points. Rings
/// and valence are taken from that refined topology, so an original vertex's
/// ring 1 is its adjacent edge-points and its ring 2 its face-points.
///
/// # Errors
///
/// Returns [`SubdivideError::IsolatedVertex`] if an original vertex is not a
/// corner of any face.
pub fn reposition_originals(
    staged: &QuadMesh,
    original_count: usize,
) -> SubdivideResult<Vec<Point3<f64>>> {
    let adjacency = AdjacencyIndex::new(staged);
    reposition_with(&adjacency, staged.vertex_positions(), original_count)
}

/// Move the first `original_count` entries of `coords` using `neighborhood`.
///
/// # Errors
///
/// Returns [`SubdivideError::IsolatedVertex`] for a vertex of valence 0.
#[allow(clippy::cast_possible_truncation)]
pub fn reposition_with<N: VertexNeighborhood>(
    neighborhood: &N,
    coords: &[Point3<f64>],
    original_count: usize,
) -> SubdivideResult<Vec<Point3<f64>>> {
    coords
        .iter()
        .take(original_count)
        .enumerate()
        .map(|(i, old)| {
            // i < original_count <= coords.len(), which was checked against u32
            let v = VertexId(i as u32);
            let rule = VertexRule::classify(neighborhood.valence(v))
                .ok_or(SubdivideError::IsolatedVertex { vertex: v.raw() })?;
            Ok(rule.apply(v, old, neighborhood, coords))
        })
        .collect()
}
