//! # Trigrid
//!
//! Uniform refinement of 2D triangle grids with vertex data.
//!
//! Trigrid stores a planar triangulation as plain coordinate and connectivity
//! arrays and refines it level by level: every triangle is split into four by
//! joining its edge midpoints, and scalar fields defined at the vertices are
//! carried to the finer grid by linear interpolation. Around that core it
//! provides boundary detection, Dirichlet boundary data collection and
//! ParaView output.
//!
//! ## Features
//!
//! - **Red refinement**: 1-to-4 splits with shared midpoints on shared edges
//! - **Field transfer**: vertex fields interpolated onto every new midpoint
//! - **Boundary flags**: incidence-based classification of boundary vertices
//! - **Dirichlet data**: boundary values from closures or custom strategies
//! - **File formats**: `.dat` coordinate/connectivity input, `.vtu`/`.pvd` output
//!
//! ## Quick Start
//!
//! ```no_run
//! use trigrid::prelude::*;
//!
//! let mesh = trigrid::io::load("data/coords-square.dat", "data/conn-square.dat").unwrap();
//! let hierarchy = MeshHierarchy::build(Level::new(mesh), 4).unwrap();
//!
//! let mut series = trigrid::io::PvdSeries::new("data/test");
//! for (k, level) in hierarchy.levels().enumerate() {
//!     println!("level {}: {} triangles", k, level.mesh.num_triangles());
//!     series.append(k as f64, &level.mesh, level.fields()).unwrap();
//! }
//! ```
//!
//! ## Refining With Data
//!
//! ```
//! use trigrid::prelude::*;
//! use nalgebra::Point2;
//!
//! let vertices = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(0.0, 1.0),
//! ];
//! let mesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
//! let u = ScalarField::from_values("u", vec![0.0, 1.0, 2.0]);
//!
//! let fine = refine(&mesh, &[u]).unwrap();
//! assert_eq!(fine.mesh.num_triangles(), 4);
//! assert_eq!(fine.mesh.num_vertices(), 6);
//! assert_eq!(fine.fields[0].values()[3..], [0.5, 1.5, 1.0]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod error;
pub mod field;
pub mod hierarchy;
pub mod io;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use trigrid::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::boundary::{classify_boundary, BoundaryFlags};
    pub use crate::algo::dirichlet::{collect_dirichlet, BoundaryCondition, DirichletData};
    pub use crate::algo::refine::{refine, Refinement};
    pub use crate::algo::Progress;
    pub use crate::config::Config;
    pub use crate::error::{GridError, Result};
    pub use crate::field::ScalarField;
    pub use crate::hierarchy::{Level, MeshHierarchy};
    pub use crate::mesh::{build_from_triangles, EdgeKey, Triangle, TriMesh};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
