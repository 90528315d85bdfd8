//! Grid file I/O.
//!
//! # Supported Formats
//!
//! | Format | Extension | Load | Save | Notes |
//! |--------|-----------|------|------|-------|
//! | Coordinate / connectivity pair | `.dat` | ✓ | ✗ | Plain text, 1-based indices |
//! | VTK UnstructuredGrid | `.vtu` | ✗ | ✓ | ASCII, vertex fields as point data |
//! | VTK collection | `.pvd` | ✗ | ✓ | Index over a numbered `.vtu` series |
//!
//! # Usage
//!
//! ```no_run
//! use trigrid::io::{dat, write_vtu};
//! use trigrid::field::ScalarField;
//!
//! let mesh = dat::load("data/coords-square.dat", "data/conn-square.dat").unwrap();
//! let flags = mesh.boundary_flags().to_field("boundary");
//! write_vtu("square.vtu", &mesh, &[flags]).unwrap();
//! ```

pub mod dat;
pub mod vtu;

pub use dat::load;
pub use vtu::{write_vtu, PvdEntry, PvdSeries};
