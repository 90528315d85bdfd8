//! Uniform red refinement with field interpolation.
//!
//! Every triangle `(a, b, c)` of the source mesh is split into four by
//! inserting a vertex at the midpoint of each edge:
//!
//! ```text
//!            c
//!           / \
//!        m_ca--m_bc
//!         / \  / \
//!        a--m_ab--b
//! ```
//!
//! The children are emitted in the order `(a, m_ab, m_ca)`,
//! `(m_ab, b, m_bc)`, `(m_ab, m_bc, m_ca)`, `(m_ca, m_bc, c)`, all with the
//! orientation of the parent.
//!
//! Source vertex `k` stays vertex `k` in the refined mesh. Midpoints are
//! appended in the order their edges are first met while walking the source
//! triangles, and an edge shared by two triangles gets exactly one midpoint.
//! Field values on a midpoint are the mean of the values at the two edge
//! endpoints.

use std::collections::HashMap;

use log::debug;
use nalgebra::Point2;

use crate::algo::Progress;
use crate::error::{GridError, Result};
use crate::field::ScalarField;
use crate::mesh::{EdgeKey, Triangle, TriMesh};

/// How many triangles to process between progress reports.
const PROGRESS_STRIDE: usize = 4096;

/// The output of one refinement step.
#[derive(Debug, Clone)]
pub struct Refinement {
    /// The refined mesh, with boundary flags already computed.
    pub mesh: TriMesh,

    /// Interpolated fields, in the same order and with the same names as
    /// the input fields.
    pub fields: Vec<ScalarField>,

    /// Number of midpoint vertices that were created.
    pub midpoints: usize,
}

/// Refine `source` once and interpolate `fields` onto the new mesh.
///
/// # Errors
///
/// - [`GridError::FieldLengthMismatch`] if a field does not have exactly one
///   value per source vertex. Nothing is produced in that case.
/// - [`GridError::TooManyVertices`] if the source is too large for
///   collision-free edge keys.
///
/// # Example
///
/// ```
/// use trigrid::prelude::*;
/// use nalgebra::Point2;
///
/// let vertices = [Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)];
/// let mesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
/// let v = ScalarField::from_values("v", vec![0.0, 1.0, 2.0]);
///
/// let fine = refine(&mesh, &[v]).unwrap();
/// assert_eq!(fine.mesh.num_triangles(), 4);
/// assert_eq!(fine.fields[0].values(), &[0.0, 1.0, 2.0, 0.5, 1.5, 1.0]);
/// ```
pub fn refine(source: &TriMesh, fields: &[ScalarField]) -> Result<Refinement> {
    refine_with_progress(source, fields, &Progress::none())
}

/// Refinement with progress reporting.
pub fn refine_with_progress(
    source: &TriMesh,
    fields: &[ScalarField],
    progress: &Progress,
) -> Result<Refinement> {
    let num_vertices = source.num_vertices();
    let num_triangles = source.num_triangles();

    for field in fields {
        if field.len() != num_vertices {
            return Err(GridError::field_mismatch(
                field.name(),
                num_vertices,
                field.len(),
            ));
        }
    }
    if !EdgeKey::supports(num_vertices) {
        return Err(GridError::TooManyVertices {
            count: num_vertices,
        });
    }

    debug!(
        "Refining mesh: {} vertices, {} triangles, {} fields",
        num_vertices,
        num_triangles,
        fields.len()
    );

    // Each triangle adds at most three midpoints.
    let max_vertices = num_vertices + 3 * num_triangles;

    let mut target = TriMesh::with_capacity(max_vertices, 4 * num_triangles);
    for &p in source.vertices() {
        target.add_vertex(p);
    }

    let mut outputs: Vec<ScalarField> = fields
        .iter()
        .map(|f| {
            let mut out = f.clone();
            out.resize(max_vertices);
            out
        })
        .collect();

    let mut midpoints = MidpointMap::new(num_vertices, num_triangles);

    for (i, tri) in source.triangles().iter().enumerate() {
        if i % PROGRESS_STRIDE == 0 {
            progress.report(i, num_triangles, "Refining");
        }

        let [a, b, c] = tri.vertices();
        let m_ab = midpoints.get_or_insert(a, b, &mut target, &mut outputs);
        let m_bc = midpoints.get_or_insert(b, c, &mut target, &mut outputs);
        let m_ca = midpoints.get_or_insert(c, a, &mut target, &mut outputs);

        for child in split(*tri, m_ab, m_bc, m_ca) {
            target.add_triangle(child);
        }
    }
    progress.report(num_triangles, num_triangles, "Refining");

    for out in &mut outputs {
        out.resize(target.num_vertices());
    }
    target.update_boundary();

    debug!(
        "Refined mesh: {} vertices ({} midpoints), {} triangles",
        target.num_vertices(),
        midpoints.len(),
        target.num_triangles()
    );

    Ok(Refinement {
        midpoints: midpoints.len(),
        mesh: target,
        fields: outputs,
    })
}

/// The four children of `tri` given the midpoints of its edges.
#[inline]
fn split(tri: Triangle, m_ab: usize, m_bc: usize, m_ca: usize) -> [Triangle; 4] {
    let [a, b, c] = tri.vertices();
    [
        Triangle::new(a, m_ab, m_ca),
        Triangle::new(m_ab, b, m_bc),
        Triangle::new(m_ab, m_bc, m_ca),
        Triangle::new(m_ca, m_bc, c),
    ]
}

/// Edge to midpoint-vertex table for a single refinement pass.
///
/// Keys are computed against the source vertex count; values are vertex
/// indices in the target mesh.
struct MidpointMap {
    num_source_vertices: usize,
    midpoints: HashMap<EdgeKey, usize>,
}

impl MidpointMap {
    fn new(num_source_vertices: usize, num_source_triangles: usize) -> Self {
        // Roughly 1.5 edges per triangle on a large planar mesh.
        let capacity = num_source_triangles + num_source_triangles / 2 + 3;
        Self {
            num_source_vertices,
            midpoints: HashMap::with_capacity(capacity),
        }
    }

    fn len(&self) -> usize {
        self.midpoints.len()
    }

    /// Return the midpoint of edge `{u, v}`, creating it on first use.
    fn get_or_insert(
        &mut self,
        u: usize,
        v: usize,
        target: &mut TriMesh,
        fields: &mut [ScalarField],
    ) -> usize {
        let key = EdgeKey::new(u, v, self.num_source_vertices);
        if let Some(&m) = self.midpoints.get(&key) {
            return m;
        }

        let p: Point2<f64> = target.edge_midpoint(u, v);
        let m = target.add_vertex(p);
        for field in fields.iter_mut() {
            field[m] = (field[u] + field[v]) * 0.5;
        }
        self.midpoints.insert(key, m);
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::boundary::classify_boundary;
    use crate::mesh::build_from_triangles;
    use approx::assert_relative_eq;
    use std::sync::{Arc, Mutex};

    fn unit_triangle() -> TriMesh {
        let vertices = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ];
        build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap()
    }

    fn unit_square() -> TriMesh {
        let vertices = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        build_from_triangles(&vertices, &[[0, 1, 2], [0, 2, 3]]).unwrap()
    }

    #[test]
    fn test_single_triangle_scenario() {
        let mesh = unit_triangle();
        let v = ScalarField::from_values("v", vec![0.0, 1.0, 2.0]);

        let fine = refine(&mesh, &[v]).unwrap();

        assert_eq!(fine.mesh.num_triangles(), 4);
        assert_eq!(fine.mesh.num_vertices(), 6);
        assert_eq!(fine.midpoints, 3);

        assert_eq!(*fine.mesh.vertex(3), Point2::new(0.5, 0.0));
        assert_eq!(*fine.mesh.vertex(4), Point2::new(0.5, 0.5));
        assert_eq!(*fine.mesh.vertex(5), Point2::new(0.0, 0.5));

        let out = &fine.fields[0];
        assert_eq!(out.name(), "v");
        assert_eq!(out.len(), 6);
        assert_relative_eq!(out[3], 0.5);
        assert_relative_eq!(out[4], 1.5);
        assert_relative_eq!(out[5], 1.0);

        assert_eq!(
            fine.mesh.triangles(),
            &[
                Triangle::new(0, 3, 5),
                Triangle::new(3, 1, 4),
                Triangle::new(3, 4, 5),
                Triangle::new(5, 4, 2),
            ]
        );
    }

    #[test]
    fn test_quadruples_triangles() {
        let mut mesh = unit_square();
        for _ in 0..3 {
            let t = mesh.num_triangles();
            mesh = refine(&mesh, &[]).unwrap().mesh;
            assert_eq!(mesh.num_triangles(), 4 * t);
        }
        assert_eq!(mesh.num_triangles(), 128);
        // (2^3 + 1)^2 grid points
        assert_eq!(mesh.num_vertices(), 81);
    }

    #[test]
    fn test_shared_edge_has_one_midpoint() {
        let mesh = unit_square();
        let fine = refine(&mesh, &[]).unwrap();

        // 4 corners + 5 distinct edges
        assert_eq!(fine.mesh.num_vertices(), 9);

        // The diagonal (0, 2) is met first as edge (c, a) of triangle 0 and
        // again as edge (a, b) of triangle 1.
        let diagonal = fine
            .mesh
            .vertices()
            .iter()
            .position(|p| *p == Point2::new(0.5, 0.5))
            .unwrap();
        let users: Vec<usize> = fine
            .mesh
            .triangles()
            .iter()
            .enumerate()
            .filter(|(_, t)| t.contains(diagonal))
            .map(|(i, _)| i / 4)
            .collect();
        assert!(users.contains(&0));
        assert!(users.contains(&1));

        let copies = fine
            .mesh
            .vertices()
            .iter()
            .filter(|p| **p == Point2::new(0.5, 0.5))
            .count();
        assert_eq!(copies, 1);
    }

    #[test]
    fn test_copy_forward() {
        let mesh = unit_square();
        let fine = refine(&mesh, &[]).unwrap();
        for k in 0..mesh.num_vertices() {
            assert_eq!(fine.mesh.vertex(k), mesh.vertex(k));
        }
    }

    #[test]
    fn test_interpolates_every_field() {
        let mesh = unit_square();
        let x = ScalarField::from_fn("x", &mesh, |p| p.x);
        let xy = ScalarField::from_fn("xy", &mesh, |p| 3.0 * p.x - 2.0 * p.y + 1.0);

        let fine = refine(&mesh, &[x, xy]).unwrap();
        assert_eq!(fine.fields.len(), 2);

        // Linear data is reproduced exactly at every new vertex.
        for (v, p) in fine.mesh.vertices().iter().enumerate() {
            assert_relative_eq!(fine.fields[0][v], p.x, epsilon = 1e-12);
            assert_relative_eq!(
                fine.fields[1][v],
                3.0 * p.x - 2.0 * p.y + 1.0,
                epsilon = 1e-12
            );
        }
        assert!(fine.fields.iter().all(|f| f.matches(&fine.mesh)));
    }

    #[test]
    fn test_preserves_orientation() {
        let mut mesh = unit_square();
        for _ in 0..2 {
            mesh = refine(&mesh, &[]).unwrap().mesh;
        }
        for i in 0..mesh.num_triangles() {
            assert!(mesh.signed_area(i) > 0.0, "triangle {} flipped", i);
        }
        assert_relative_eq!(mesh.total_area(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_field_length_mismatch() {
        let mesh = unit_triangle();
        let good = ScalarField::zeros("good", 3);
        let bad = ScalarField::zeros("bad", 2);

        let err = refine(&mesh, &[good, bad]).unwrap_err();
        match err {
            GridError::FieldLengthMismatch {
                field,
                expected,
                actual,
            } => {
                assert_eq!(field, "bad");
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_repeated_refinement_is_independent() {
        let coarse = unit_square();
        let u = ScalarField::from_fn("u", &coarse, |p| p.x * p.y);

        let first = refine(&coarse, &[u.clone()]).unwrap();
        let second = refine(&coarse, &[u]).unwrap();

        assert_eq!(first.mesh.vertices(), second.mesh.vertices());
        assert_eq!(first.mesh.triangles(), second.mesh.triangles());
        assert_eq!(first.fields, second.fields);
        assert_eq!(second.mesh.num_vertices(), 9);
        assert_eq!(second.midpoints, 5);
    }

    #[test]
    fn test_boundary_is_classified() {
        let fine = refine(&unit_square(), &[]).unwrap();
        assert_eq!(fine.mesh.boundary_flags(), &classify_boundary(&fine.mesh));
        // only the centre vertex is interior
        assert_eq!(fine.mesh.boundary_flags().count(), 8);
    }

    #[test]
    fn test_empty_mesh() {
        let fine = refine(&TriMesh::new(), &[]).unwrap();
        assert!(fine.mesh.is_empty());
        assert_eq!(fine.midpoints, 0);
    }

    #[test]
    fn test_progress_reaches_total() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let progress = Progress::new(move |current, total, _| {
            sink.lock().unwrap().push((current, total));
        });

        refine_with_progress(&unit_square(), &[], &progress).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.first(), Some(&(0, 2)));
        assert_eq!(seen.last(), Some(&(2, 2)));
    }
}
