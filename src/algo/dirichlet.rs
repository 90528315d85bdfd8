//! Dirichlet boundary data.
//!
//! [`collect_dirichlet`] walks every triangle edge whose two endpoints are
//! flagged as boundary vertices and asks a [`BoundaryCondition`] for the
//! prescribed values at those endpoints. A vertex reached through several
//! boundary edges keeps the value from the first edge that assigned it.
//!
//! # Example
//!
//! ```
//! use trigrid::prelude::*;
//! use nalgebra::Point2;
//!
//! let vertices = [
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//! ];
//! let mesh = build_from_triangles(&vertices, &[[0, 1, 2], [0, 2, 3]]).unwrap();
//!
//! // Prescribe u = x on the bottom edge only.
//! let bottom = |mesh: &TriMesh, [a, b]: [usize; 2]| {
//!     let (pa, pb) = (mesh.vertex(a), mesh.vertex(b));
//!     (pa.y == 0.0 && pb.y == 0.0).then(|| [pa.x, pb.x])
//! };
//!
//! let data = collect_dirichlet(&mesh, mesh.boundary_flags(), &bottom);
//! assert_eq!(data.nodes, vec![0, 1]);
//! assert_eq!(data.values, vec![0.0, 1.0]);
//! ```

use crate::algo::boundary::BoundaryFlags;
use crate::field::ScalarField;
use crate::mesh::TriMesh;

/// A source of Dirichlet values along boundary edges.
///
/// `evaluate` receives the mesh and the two endpoints of a boundary edge, in
/// the direction the edge runs in its triangle. It returns `None` when the
/// edge carries no Dirichlet condition, or the values for the two endpoints
/// in the same order.
///
/// Any `Fn(&TriMesh, [usize; 2]) -> Option<[f64; 2]>` closure is a
/// `BoundaryCondition`.
pub trait BoundaryCondition {
    /// Values at the endpoints of `edge`, or `None` if it is not a Dirichlet edge.
    fn evaluate(&self, mesh: &TriMesh, edge: [usize; 2]) -> Option<[f64; 2]>;
}

impl<F> BoundaryCondition for F
where
    F: Fn(&TriMesh, [usize; 2]) -> Option<[f64; 2]>,
{
    #[inline]
    fn evaluate(&self, mesh: &TriMesh, edge: [usize; 2]) -> Option<[f64; 2]> {
        self(mesh, edge)
    }
}

/// Dirichlet nodes and their values, in discovery order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirichletData {
    /// Vertex indices carrying a prescribed value. No index appears twice.
    pub nodes: Vec<usize>,
    /// `values[k]` is the value prescribed at `nodes[k]`.
    pub values: Vec<f64>,
}

impl DirichletData {
    /// Number of Dirichlet nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no node carries a Dirichlet value.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over `(node, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.nodes.iter().copied().zip(self.values.iter().copied())
    }

    /// Write the prescribed values into `field`.
    ///
    /// # Panics
    /// Panics if a node is out of range for the field.
    pub fn apply(&self, field: &mut ScalarField) {
        field.set_values(&self.nodes, &self.values);
    }
}

/// Collect Dirichlet nodes and values along the boundary of `mesh`.
///
/// Edges are visited triangle by triangle, as `(a, b)`, `(b, c)`, `(c, a)`.
/// `condition` is called for every edge with both endpoints flagged, so an
/// edge shared by two boundary-flagged triangles may be evaluated twice.
///
/// # Panics
/// Panics if `flags` does not have one entry per vertex of `mesh`.
pub fn collect_dirichlet<C>(mesh: &TriMesh, flags: &BoundaryFlags, condition: &C) -> DirichletData
where
    C: BoundaryCondition + ?Sized,
{
    assert_eq!(
        flags.len(),
        mesh.num_vertices(),
        "boundary flags do not match the mesh vertex count"
    );

    let mut assigned = vec![false; mesh.num_vertices()];
    let mut data = DirichletData::default();

    for [a, b] in mesh.edges() {
        if !(flags.is_boundary(a) && flags.is_boundary(b)) {
            continue;
        }
        let Some([value_a, value_b]) = condition.evaluate(mesh, [a, b]) else {
            continue;
        };
        for (v, value) in [(a, value_a), (b, value_b)] {
            if !assigned[v] {
                assigned[v] = true;
                data.nodes.push(v);
                data.values.push(value);
            }
        }
    }

    data
}
