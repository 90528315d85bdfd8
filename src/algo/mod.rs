//! Grid algorithms.
//!
//! - **Refinement** ([`refine`]): uniform 1-to-4 split of every triangle with
//!   linear interpolation of vertex fields onto the new midpoints
//! - **Boundary classification** ([`boundary`]): per-vertex boundary flags
//!   from triangle incidence counts
//! - **Dirichlet data** ([`dirichlet`]): prescribed values along boundary
//!   edges from a pluggable [`BoundaryCondition`](dirichlet::BoundaryCondition)

pub mod boundary;
pub mod dirichlet;
mod progress;
pub mod refine;

pub use progress::Progress;
