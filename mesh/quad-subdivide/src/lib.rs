//! Catmull-Clark subdivision for quad meshes.
//!
//! One step of [`catmull_clark_step`] turns a quad mesh with `nV` vertices,
//! `nE` edges and `nF` faces into one with `nV + nE + nF` vertices,
//! `2·nE + 4·nF` edges and `4·nF` faces:
//!
//! 1. **Face-points**: the centroid of each face
//! 2. **Edge-points**: the midpoint of a boundary edge, or a 3/8 + 1/16
//!    blend of the endpoints and surrounding corners of an interior edge
//! 3. **Topology**: every face split into four quads around its face-point
//! 4. **Originals**: each original vertex moved by a [`VertexRule`] chosen
//!    from its valence
//!
//! Each stage produces its own vector; the refined coordinate array is
//! their concatenation.
//!
//! # Examples
//!
//! One step on a 2×2 grid:
//!
//! ```
//! use quad_types::{planar_grid, Point3, QuadTopology, VertexId};
//! use quad_subdivide::catmull_clark_step;
//!
//! let grid = planar_grid(2, 2, 1.0);
//! let refined = catmull_clark_step(&grid)?;
//!
//! assert_eq!(refined.vertex_count(), 25);
//! assert_eq!(refined.edge_count(), 40);
//! assert_eq!(refined.face_count(), 16);
//!
//! // The centre vertex of a flat grid stays where it was
//! assert_eq!(refined.position(VertexId(4)), Some(&Point3::new(1.0, 1.0, 0.0)));
//! # Ok::<(), quad_subdivide::SubdivideError>(())
//! ```
//!
//! Refining a shared mesh handle:
//!
//! ```
//! use quad_types::{unit_cube, MeshTopology, QuadTopology};
//! use quad_subdivide::refine;
//!
//! let topology = MeshTopology::from_mesh(unit_cube());
//! for _ in 0..2 {
//!     refine(&topology)?;
//! }
//!
//! assert_eq!(topology.counts().faces, 96);
//! # Ok::<(), quad_subdivide::SubdivideError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod params;
mod points;
mod rebuild;
mod reposition;
mod result;
mod subdivide;

pub use error::{SubdivideError, SubdivideResult};
pub use params::{DEFAULT_MAX_FACES, SubdivideParams};
pub use points::{edge_point, edge_points, face_point, face_points};
pub use rebuild::{RefinedTopology, rebuild_topology};
pub use reposition::{VertexRule, reposition_originals, reposition_with};
pub use result::SubdivisionResult;
pub use subdivide::{catmull_clark_step, refine, subdivide_mesh};
