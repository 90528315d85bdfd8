//! Triangle connectivity.

use std::fmt;
use std::ops::Index;

/// Number of vertices per triangle.
pub const NODES_PER_TRIANGLE: usize = 3;

/// A triangle given by three vertex indices in counter-clockwise order.
///
/// The indices refer to the vertex sequence of the mesh that owns the
/// triangle. Indexing with `t[i]` is bounds-checked and panics for `i >= 3`.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Triangle([usize; NODES_PER_TRIANGLE]);

impl Triangle {
    /// Create a triangle from three vertex indices.
    #[inline]
    pub const fn new(a: usize, b: usize, c: usize) -> Self {
        Self([a, b, c])
    }

    /// The three vertex indices.
    #[inline]
    pub const fn vertices(&self) -> [usize; NODES_PER_TRIANGLE] {
        self.0
    }

    /// The three directed edges `(a, b)`, `(b, c)`, `(c, a)`.
    #[inline]
    pub const fn edges(&self) -> [[usize; 2]; NODES_PER_TRIANGLE] {
        let [a, b, c] = self.0;
        [[a, b], [b, c], [c, a]]
    }

    /// Whether a vertex index appears more than once.
    #[inline]
    pub const fn is_degenerate(&self) -> bool {
        let [a, b, c] = self.0;
        a == b || b == c || a == c
    }

    /// Whether the triangle uses vertex `v`.
    #[inline]
    pub fn contains(&self, v: usize) -> bool {
        self.0.contains(&v)
    }

    /// The largest vertex index used by this triangle.
    #[inline]
    pub fn max_vertex(&self) -> usize {
        self.0[0].max(self.0[1]).max(self.0[2])
    }
}

impl Index<usize> for Triangle {
    type Output = usize;

    #[inline]
    fn index(&self, i: usize) -> &usize {
        &self.0[i]
    }
}

impl From<[usize; NODES_PER_TRIANGLE]> for Triangle {
    fn from(v: [usize; NODES_PER_TRIANGLE]) -> Self {
        Self(v)
    }
}

impl From<Triangle> for [usize; NODES_PER_TRIANGLE] {
    fn from(t: Triangle) -> Self {
        t.0
    }
}

impl fmt::Debug for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T({}, {}, {})", self.0[0], self.0[1], self.0[2])
    }
}
