//! Boundary vertex classification.
//!
//! A vertex is classified as a boundary vertex when it belongs to at most
//! [`BOUNDARY_MAX_INCIDENCE`] triangles.
//!
//! # Limitations
//!
//! This is a counting heuristic, not a topological test. It is correct for
//! the regular triangulations produced by uniform refinement of a structured
//! base grid, where interior vertices have six incident triangles and
//! boundary vertices have one to three. Irregular input can be misclassified
//! both ways: an interior vertex of valence three is reported as boundary,
//! and a boundary vertex shared by four or more triangles is reported as
//! interior. Do not rely on it for arbitrary meshes without re-deriving the
//! threshold.

use crate::field::ScalarField;
use crate::mesh::TriMesh;

/// Highest triangle count at which a vertex still counts as boundary.
pub const BOUNDARY_MAX_INCIDENCE: usize = 3;

/// One boundary flag per vertex of a mesh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundaryFlags(Vec<bool>);

impl BoundaryFlags {
    /// Wrap an explicit list of flags.
    pub fn from_vec(flags: Vec<bool>) -> Self {
        Self(flags)
    }

    /// Whether vertex `v` is on the boundary.
    ///
    /// # Panics
    /// Panics if `v` is out of range.
    #[inline]
    pub fn is_boundary(&self, v: usize) -> bool {
        self.0[v]
    }

    /// Number of flags (equal to the vertex count of the classified mesh).
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no flags at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of boundary vertices.
    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&b| b).count()
    }

    /// Iterate over the flags in vertex order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    /// Indices of the boundary vertices, ascending.
    pub fn boundary_vertices(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| b.then_some(i))
    }

    /// The flags as a field: 1.0 for boundary vertices, 0.0 elsewhere.
    pub fn to_field(&self, name: impl Into<String>) -> ScalarField {
        ScalarField::from_values(
            name,
            self.0.iter().map(|&b| if b { 1.0 } else { 0.0 }).collect(),
        )
    }

    /// The raw flags.
    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }
}

/// Count how many triangles each vertex belongs to.
pub fn incidence_counts(mesh: &TriMesh) -> Vec<usize> {
    let mut counts = vec![0usize; mesh.num_vertices()];
    for t in mesh.triangles() {
        for v in t.vertices() {
            counts[v] += 1;
        }
    }
    counts
}

/// Classify every vertex of `mesh` as boundary or interior.
///
/// Pure function of the connectivity; calling it twice on an unchanged mesh
/// gives identical results. Isolated vertices (no triangles) are flagged as
/// boundary.
pub fn classify_boundary(mesh: &TriMesh) -> BoundaryFlags {
    let flags = incidence_counts(mesh)
        .into_iter()
        .map(|count| count <= BOUNDARY_MAX_INCIDENCE)
        .collect();
    BoundaryFlags(flags)
}
