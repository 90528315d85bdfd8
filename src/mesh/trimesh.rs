//! Indexed triangle mesh in the plane.
//!
//! [`TriMesh`] stores vertex coordinates and triangle connectivity in two
//! append-only sequences. A vertex or triangle is identified by the position
//! it occupies; nothing is ever removed or renumbered, so an index handed out
//! by [`TriMesh::add_vertex`] stays valid for the lifetime of the mesh.
//!
//! Each mesh also carries a cached set of [`BoundaryFlags`]. The cache is
//! refreshed by [`TriMesh::update_boundary`], which the builder and the
//! refinement engine call once the connectivity is complete.

use std::fmt;

use nalgebra::Point2;

use super::triangle::Triangle;
use crate::algo::boundary::{classify_boundary, BoundaryFlags};
use crate::error::Result;

/// A 2D triangle mesh with append-only vertex and triangle storage.
#[derive(Debug, Clone, Default)]
pub struct TriMesh {
    /// Vertex coordinates.
    pub(crate) vertices: Vec<Point2<f64>>,

    /// Triangle connectivity (counter-clockwise).
    pub(crate) triangles: Vec<Triangle>,

    /// Boundary flags as of the last call to `update_boundary`.
    pub(crate) boundary: BoundaryFlags,
}

impl TriMesh {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(num_vertices: usize, num_triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(num_vertices),
            triangles: Vec::with_capacity(num_triangles),
            boundary: BoundaryFlags::default(),
        }
    }

    /// Build a validated mesh from plain lists. See [`build_from_triangles`].
    ///
    /// [`build_from_triangles`]: super::build_from_triangles
    pub fn from_triangles(vertices: &[Point2<f64>], triangles: &[[usize; 3]]) -> Result<Self> {
        super::build_from_triangles(vertices, triangles)
    }

    /// Reserve room for additional triangles and vertices.
    ///
    /// This is only an allocation hint and never changes the mesh.
    pub fn reserve(&mut self, num_triangles: usize, num_vertices: usize) {
        self.triangles.reserve(num_triangles);
        self.vertices.reserve(num_vertices);
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the mesh has neither vertices nor triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.triangles.is_empty()
    }

    /// Get the coordinates of vertex `i`.
    ///
    /// # Panics
    /// Panics if `i >= self.num_vertices()`.
    #[inline]
    pub fn vertex(&self, i: usize) -> &Point2<f64> {
        &self.vertices[i]
    }

    /// Get triangle `i`.
    ///
    /// # Panics
    /// Panics if `i >= self.num_triangles()`.
    #[inline]
    pub fn triangle(&self, i: usize) -> Triangle {
        self.triangles[i]
    }

    /// All vertex coordinates in index order.
    #[inline]
    pub fn vertices(&self) -> &[Point2<f64>] {
        &self.vertices
    }

    /// All triangles in index order.
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Iterate over the directed edges of every triangle, in triangle order.
    ///
    /// Interior edges are visited twice, once from each side.
    pub fn edges(&self) -> impl Iterator<Item = [usize; 2]> + '_ {
        self.triangles.iter().flat_map(|t| t.edges())
    }

    /// Get the coordinates of the three corners of triangle `i`.
    pub fn triangle_positions(&self, i: usize) -> [Point2<f64>; 3] {
        let [a, b, c] = self.triangles[i].vertices();
        [self.vertices[a], self.vertices[b], self.vertices[c]]
    }

    /// Boundary flags computed by the last [`TriMesh::update_boundary`].
    #[inline]
    pub fn boundary_flags(&self) -> &BoundaryFlags {
        &self.boundary
    }

    /// Whether vertex `v` was flagged as a boundary vertex.
    #[inline]
    pub fn is_boundary_vertex(&self, v: usize) -> bool {
        self.boundary.is_boundary(v)
    }

    // ==================== Geometry ====================

    /// The midpoint of the segment between vertices `u` and `v`.
    #[inline]
    pub fn edge_midpoint(&self, u: usize, v: usize) -> Point2<f64> {
        let p0 = &self.vertices[u];
        let p1 = &self.vertices[v];
        Point2::from((p0.coords + p1.coords) * 0.5)
    }

    /// Signed area of triangle `i`; positive for counter-clockwise triangles.
    pub fn signed_area(&self, i: usize) -> f64 {
        let [p0, p1, p2] = self.triangle_positions(i);
        let e1 = p1 - p0;
        let e2 = p2 - p0;
        0.5 * e1.perp(&e2)
    }

    /// Total (unsigned) area of the mesh.
    pub fn total_area(&self) -> f64 {
        (0..self.num_triangles())
            .map(|i| self.signed_area(i).abs())
            .sum()
    }

    /// Compute the axis-aligned bounding box of the mesh.
    pub fn bounding_box(&self) -> Option<(Point2<f64>, Point2<f64>)> {
        let first = self.vertices.first()?;

        let mut min = *first;
        let mut max = *first;

        for p in &self.vertices {
            for i in 0..2 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }

        Some((min, max))
    }

    // ==================== Construction ====================

    /// Append a vertex and return its index.
    pub fn add_vertex(&mut self, position: Point2<f64>) -> usize {
        let index = self.vertices.len();
        self.vertices.push(position);
        index
    }

    /// Append a triangle and return its index.
    ///
    /// # Panics
    /// Panics if the triangle references a vertex that does not exist yet.
    pub fn add_triangle(&mut self, triangle: impl Into<Triangle>) -> usize {
        let triangle = triangle.into();
        assert!(
            triangle.max_vertex() < self.vertices.len(),
            "triangle {:?} references a vertex beyond the {} in the mesh",
            triangle,
            self.vertices.len()
        );
        let index = self.triangles.len();
        self.triangles.push(triangle);
        index
    }

    /// Recompute the boundary flags from the current connectivity.
    pub fn update_boundary(&mut self) {
        self.boundary = classify_boundary(self);
    }
}

impl fmt::Display for TriMesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Points:")?;
        for (i, p) in self.vertices.iter().enumerate() {
            writeln!(f, "\t{}: ({}, {})", i, p.x, p.y)?;
        }
        writeln!(f, "Connectivity:")?;
        for (i, t) in self.triangles.iter().enumerate() {
            writeln!(f, "\t{}: ({}, {}, {})", i, t[0], t[1], t[2])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> TriMesh {
        let mut mesh = TriMesh::new();
        mesh.add_vertex(Point2::new(0.0, 0.0));
        mesh.add_vertex(Point2::new(1.0, 0.0));
        mesh.add_vertex(Point2::new(1.0, 1.0));
        mesh.add_vertex(Point2::new(0.0, 1.0));
        mesh.add_triangle([0, 1, 2]);
        mesh.add_triangle([0, 2, 3]);
        mesh
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = TriMesh::new();
        assert_eq!(mesh.num_vertices(), 0);
        assert_eq!(mesh.num_triangles(), 0);
        assert!(mesh.is_empty());
        assert!(mesh.bounding_box().is_none());
        assert!(mesh.boundary_flags().is_empty());
    }

    #[test]
    fn test_add_returns_position() {
        let mut mesh = TriMesh::new();
        let v0 = mesh.add_vertex(Point2::new(0.0, 0.0));
        let v1 = mesh.add_vertex(Point2::new(1.0, 0.0));
        let v2 = mesh.add_vertex(Point2::new(0.0, 1.0));
        assert_eq!((v0, v1, v2), (0, 1, 2));

        let t = mesh.add_triangle(Triangle::new(v0, v1, v2));
        assert_eq!(t, 0);
        assert_eq!(mesh.triangle(0), Triangle::new(0, 1, 2));
        assert_eq!(*mesh.vertex(2), Point2::new(0.0, 1.0));
    }

    #[test]
    #[should_panic(expected = "references a vertex")]
    fn test_add_triangle_with_missing_vertex() {
        let mut mesh = TriMesh::new();
        mesh.add_vertex(Point2::new(0.0, 0.0));
        mesh.add_vertex(Point2::new(1.0, 0.0));
        mesh.add_triangle([0, 1, 2]);
    }

    #[test]
    #[should_panic]
    fn test_vertex_out_of_range() {
        let mesh = unit_square();
        let _ = mesh.vertex(4);
    }

    #[test]
    fn test_reserve_has_no_effect() {
        let mut mesh = unit_square();
        mesh.reserve(100, 100);
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_triangles(), 2);
    }

    #[test]
    fn test_geometry() {
        let mesh = unit_square();
        assert_relative_eq!(mesh.signed_area(0), 0.5);
        assert_relative_eq!(mesh.signed_area(1), 0.5);
        assert_relative_eq!(mesh.total_area(), 1.0);

        let (min, max) = mesh.bounding_box().unwrap();
        assert_eq!(min, Point2::new(0.0, 0.0));
        assert_eq!(max, Point2::new(1.0, 1.0));

        assert_eq!(mesh.edge_midpoint(0, 2), Point2::new(0.5, 0.5));
    }

    #[test]
    fn test_edges_in_triangle_order() {
        let mesh = unit_square();
        let edges: Vec<_> = mesh.edges().collect();
        assert_eq!(
            edges,
            vec![[0, 1], [1, 2], [2, 0], [0, 2], [2, 3], [3, 0]]
        );
    }

    #[test]
    fn test_from_triangles() {
        let vertices = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ];
        let mesh = TriMesh::from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
        assert_eq!(mesh.boundary_flags().count(), 3);
        assert!(TriMesh::from_triangles(&vertices, &[[0, 1, 3]]).is_err());
    }

    #[test]
    fn test_update_boundary() {
        let mut mesh = unit_square();
        assert!(mesh.boundary_flags().is_empty());

        mesh.update_boundary();
        assert_eq!(mesh.boundary_flags().len(), 4);
        assert!((0..4).all(|v| mesh.is_boundary_vertex(v)));
    }

    #[test]
    fn test_display() {
        let mesh = unit_square();
        let text = mesh.to_string();
        assert!(text.starts_with("Points:\n\t0: (0, 0)\n"));
        assert!(text.contains("Connectivity:\n\t0: (0, 1, 2)\n\t1: (0, 2, 3)\n"));
    }
}
