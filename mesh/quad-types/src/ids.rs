//! Typed element indices.
//!
//! Vertices, edges and faces are identified by their position in the owning
//! [`QuadMesh`](crate::QuadMesh). Each kind gets its own newtype so an edge
//! index can never be used where a vertex index is expected.
//!
//! Indices are only meaningful for the mesh generation that produced them.
//! A subdivision step builds a brand-new mesh; original vertices keep their
//! positions in the sequence, but edge and face indices are reassigned.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

macro_rules! define_index {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u32);

        impl $name {
            /// Create an index from its raw value.
            #[inline]
            #[must_use]
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Raw `u32` value.
            #[inline]
            #[must_use]
            pub const fn raw(self) -> u32 {
                self.0
            }

            /// Position in the owning collection.
            #[inline]
            #[must_use]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<u32> for $name {
            #[inline]
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(id: $name) -> Self {
                id.index()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

define_index!(
    /// Index of a vertex in a [`QuadMesh`](crate::QuadMesh).
    VertexId,
    "v"
);

define_index!(
    /// Index of an undirected edge in a [`QuadMesh`](crate::QuadMesh).
    EdgeId,
    "e"
);

define_index!(
    /// Index of a quad face in a [`QuadMesh`](crate::QuadMesh).
    FaceId,
    "f"
);
