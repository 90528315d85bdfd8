//! Core mesh data structures.
//!
//! This module provides the planar triangle mesh used at every refinement
//! level, together with its small value types.
//!
//! # Overview
//!
//! The primary type is [`TriMesh`], an indexed mesh: a sequence of
//! [`Point2`](nalgebra::Point2) vertices and a sequence of [`Triangle`]s that
//! reference them by position. Both sequences are append-only.
//!
//! Shared edges are detected through [`EdgeKey`], which maps an unordered
//! vertex pair to a single integer.
//!
//! # Construction
//!
//! Meshes are typically built from file I/O or from plain vertex/triangle
//! lists:
//!
//! ```
//! use trigrid::mesh::build_from_triangles;
//! use nalgebra::Point2;
//!
//! let vertices = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(0.0, 1.0),
//! ];
//! let mesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
//! assert!(mesh.is_boundary_vertex(0));
//! ```

mod builder;
mod edge;
mod triangle;
mod trimesh;

pub use builder::{build_from_triangles, to_face_vertex};
pub use edge::EdgeKey;
pub use triangle::{Triangle, NODES_PER_TRIANGLE};
pub use trimesh::TriMesh;
