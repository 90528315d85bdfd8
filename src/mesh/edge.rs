//! Canonical keys for undirected edges.
//!
//! Two triangles share an edge when they both contain the same unordered pair
//! of vertices. [`EdgeKey`] folds such a pair into a single integer so the
//! pair can be used as a hash map key:
//!
//! ```text
//! key(u, v) = min(u, v) * N + max(u, v)
//! ```
//!
//! where `N` is the vertex count of the mesh the indices belong to. Because
//! both operands are smaller than `N` the mapping is injective, and because it
//! sorts the pair first it is symmetric.

use std::fmt;

/// A canonical, order-independent key for the edge between two vertices.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey(u64);

impl EdgeKey {
    /// Compute the key of the edge `{u, v}` in a mesh with `num_vertices` vertices.
    ///
    /// Both indices must be smaller than `num_vertices`, and
    /// `num_vertices²` must fit in a `u64` (see [`EdgeKey::supports`]).
    #[inline]
    pub fn new(u: usize, v: usize, num_vertices: usize) -> Self {
        debug_assert!(
            u < num_vertices && v < num_vertices,
            "edge ({}, {}) out of range for {} vertices",
            u,
            v,
            num_vertices
        );
        let (lo, hi) = if u <= v { (u, v) } else { (v, u) };
        Self(lo as u64 * num_vertices as u64 + hi as u64)
    }

    /// Whether keys for a mesh with `num_vertices` vertices fit in a `u64`.
    #[inline]
    pub fn supports(num_vertices: usize) -> bool {
        (num_vertices as u64)
            .checked_mul(num_vertices as u64)
            .is_some()
    }
}

impl fmt::Debug for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E#{}", self.0)
    }
}
