//! Edge and face records.

use std::hash::{Hash, Hasher};

use crate::{EdgeId, VertexId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An undirected edge between two vertices.
///
/// The endpoints are stored in the order they were given, which is what
/// writers see, but equality and hashing use the sorted pair: `{a, b}` and
/// `{b, a}` are the same edge.
#[derive(Debug, Clone, Copy, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    /// First endpoint as supplied.
    pub a: VertexId,
    /// Second endpoint as supplied.
    pub b: VertexId,
}

impl Edge {
    /// Create an edge between two vertices.
    ///
    /// # Example
    ///
    /// ```
    /// use quad_types::{Edge, VertexId};
    ///
    /// let e = Edge::new(VertexId(3), VertexId(1));
    /// assert_eq!(e, Edge::new(VertexId(1), VertexId(3)));
    /// assert_eq!(e.key(), (1, 3));
    /// ```
    #[inline]
    #[must_use]
    pub const fn new(a: VertexId, b: VertexId) -> Self {
        Self { a, b }
    }

    /// Create an edge from raw vertex indices.
    #[inline]
    #[must_use]
    pub const fn from_raw(a: u32, b: u32) -> Self {
        Self::new(VertexId(a), VertexId(b))
    }

    /// Endpoints as a tuple, in stored order.
    #[inline]
    #[must_use]
    pub const fn endpoints(&self) -> (VertexId, VertexId) {
        (self.a, self.b)
    }

    /// Orientation-independent key: the endpoint pair with the smaller index first.
    #[inline]
    #[must_use]
    pub const fn key(&self) -> (u32, u32) {
        edge_key(self.a, self.b)
    }

    /// Check whether `v` is one of the endpoints.
    #[inline]
    #[must_use]
    pub fn contains(&self, v: VertexId) -> bool {
        self.a == v || self.b == v
    }

    /// The endpoint opposite `v`, or `None` if `v` is not on this edge.
    #[inline]
    #[must_use]
    pub fn opposite(&self, v: VertexId) -> Option<VertexId> {
        if self.a == v {
            Some(self.b)
        } else if self.b == v {
            Some(self.a)
        } else {
            None
        }
    }

    /// Check whether both endpoints are the same vertex.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.a == self.b
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Sorted endpoint pair used as a lookup key.
#[inline]
#[must_use]
pub const fn edge_key(a: VertexId, b: VertexId) -> (u32, u32) {
    if a.0 <= b.0 { (a.0, b.0) } else { (b.0, a.0) }
}

/// A quad face.
///
/// Corners wind counter-clockwise when viewed from outside. `edges[k]` is
/// the edge joining `vertices[k]` and `vertices[(k + 1) % 4]`; it is
/// resolved against the mesh's edge collection when the face is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Face {
    /// Corner vertices `(v0, v1, v2, v3)`.
    pub vertices: [VertexId; 4],
    /// Side edges `(e0, e1, e2, e3)`.
    pub edges: [EdgeId; 4],
}

impl Face {
    /// The four sides as `(v_k, v_(k+1 mod 4))` pairs.
    #[must_use]
    pub fn corner_pairs(&self) -> [(VertexId, VertexId); 4] {
        corner_pairs(&self.vertices)
    }

    /// Check whether `v` is a corner of this face.
    #[inline]
    #[must_use]
    pub fn has_corner(&self, v: VertexId) -> bool {
        self.vertices.contains(&v)
    }

    /// Check whether an endpoint pair matches one of this face's sides,
    /// in either orientation.
    #[must_use]
    pub fn has_side(&self, a: VertexId, b: VertexId) -> bool {
        let key = edge_key(a, b);
        self.corner_pairs()
            .iter()
            .any(|&(p, q)| edge_key(p, q) == key)
    }
}

/// Sides of a corner quadruple, taken cyclically.
#[inline]
#[must_use]
pub fn corner_pairs(vertices: &[VertexId; 4]) -> [(VertexId, VertexId); 4] {
    [
        (vertices[0], vertices[1]),
        (vertices[1], vertices[2]),
        (vertices[2], vertices[3]),
        (vertices[3], vertices[0]),
    ]
}
