//! Mesh construction utilities.
//!
//! This module provides functions for building meshes from plain
//! vertex/triangle lists, as produced by the file loaders.

use nalgebra::Point2;

use super::trimesh::TriMesh;
use super::triangle::Triangle;
use crate::error::{GridError, Result};

/// Build a mesh from vertices and triangles.
///
/// Unlike [`TriMesh::add_triangle`], which treats a bad index as a bug, this
/// validates untrusted input and reports problems as errors. The boundary
/// flags of the returned mesh are already computed.
///
/// # Arguments
/// * `vertices` - List of vertex positions
/// * `triangles` - List of triangles, each as 0-based `[a, b, c]` indices
///
/// # Example
/// ```
/// use trigrid::mesh::build_from_triangles;
/// use nalgebra::Point2;
///
/// let vertices = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(0.0, 1.0),
/// ];
/// let mesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
/// assert_eq!(mesh.num_vertices(), 3);
/// assert_eq!(mesh.num_triangles(), 1);
/// ```
pub fn build_from_triangles(
    vertices: &[Point2<f64>],
    triangles: &[[usize; 3]],
) -> Result<TriMesh> {
    if triangles.is_empty() {
        return Err(GridError::EmptyMesh);
    }

    for (ti, tri) in triangles.iter().enumerate() {
        for &vi in tri {
            if vi >= vertices.len() {
                return Err(GridError::InvalidVertexIndex {
                    triangle: ti,
                    vertex: vi,
                });
            }
        }
        if Triangle::from(*tri).is_degenerate() {
            return Err(GridError::DegenerateTriangle { triangle: ti });
        }
    }

    let mut mesh = TriMesh::with_capacity(vertices.len(), triangles.len());
    for &p in vertices {
        mesh.add_vertex(p);
    }
    for &tri in triangles {
        mesh.add_triangle(tri);
    }
    mesh.update_boundary();

    Ok(mesh)
}

/// Convert a mesh back to plain vertex and triangle lists.
pub fn to_face_vertex(mesh: &TriMesh) -> (Vec<Point2<f64>>, Vec<[usize; 3]>) {
    let vertices = mesh.vertices().to_vec();
    let triangles = mesh.triangles().iter().map(|t| t.vertices()).collect();
    (vertices, triangles)
}
