//! Core quad mesh types.
//!
//! This crate provides the topology layer the subdivision and file-format
//! crates build on:
//!
//! - [`VertexId`], [`EdgeId`], [`FaceId`] - Typed element indices
//! - [`Edge`], [`Face`] - Undirected edge and quad face records
//! - [`QuadMesh`] - An immutable, validated quad mesh snapshot
//! - [`MeshTopology`] - A shared handle whose mesh is replaced atomically
//! - [`AdjacencyIndex`] - Edge-face and vertex-face incidence, rings, valence
//!
//! # Invariants
//!
//! A [`QuadMesh`] can only be built through validating constructors:
//! - Every face's edge tuple resolves into the edge collection
//! - `face.edges[k]` joins `face.vertices[k]` and `face.vertices[(k + 1) % 4]`
//! - Edges are unique as unordered pairs and never degenerate
//! - Every index is below the size of the collection it points into
//!
//! # Coordinate System
//!
//! Coordinates are `f64` and unit-agnostic. Face winding is
//! **counter-clockwise (CCW) when viewed from outside**.
//!
//! # Example
//!
//! ```
//! use quad_types::{AdjacencyIndex, EdgeId, QuadMesh, QuadTopology};
//!
//! let mesh = QuadMesh::from_raw(
//!     &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
//!     &[[0, 1], [1, 2], [2, 3], [3, 0]],
//!     &[[0, 1, 2, 3]],
//! )?;
//!
//! let adjacency = AdjacencyIndex::new(&mesh);
//! assert!(adjacency.is_boundary_edge(EdgeId(0)));
//! assert_eq!(mesh.counts().refined().faces, 4);
//! # Ok::<(), quad_types::MeshError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod adjacency;
mod element;
mod error;
mod ids;
mod mesh;
mod topology;
mod traits;

pub use adjacency::AdjacencyIndex;
pub use element::{Edge, Face, corner_pairs, edge_key};
pub use error::{MeshError, MeshResult};
pub use ids::{EdgeId, FaceId, VertexId};
pub use mesh::{MeshCounts, QuadMesh, planar_grid, unit_cube, unit_quad};
pub use topology::MeshTopology;
pub use traits::{QuadTopology, VertexNeighborhood};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
