//! Error types for trigrid.
//!
//! Recoverable failures (bad input files, mismatched field lengths) are
//! reported through [`GridError`]. Programming errors such as indexing past
//! the end of a mesh panic instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`GridError`].
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors that can occur while building, refining or exporting grids.
#[derive(Error, Debug)]
pub enum GridError {
    /// The mesh has no triangles.
    #[error("mesh has no triangles")]
    EmptyMesh,

    /// A triangle references a vertex that does not exist.
    #[error("triangle {triangle} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The triangle index.
        triangle: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A triangle uses the same vertex more than once.
    #[error("triangle {triangle} is degenerate (has duplicate vertices)")]
    DegenerateTriangle {
        /// The triangle index.
        triangle: usize,
    },

    /// A scalar field does not match the vertex count of its mesh.
    #[error("field '{field}' has {actual} values but the mesh has {expected} vertices")]
    FieldLengthMismatch {
        /// Name of the offending field.
        field: String,
        /// The mesh vertex count.
        expected: usize,
        /// The field length.
        actual: usize,
    },

    /// The vertex count is too large for edge keys to stay collision free.
    #[error("mesh with {count} vertices is too large to refine")]
    TooManyVertices {
        /// The vertex count of the source mesh.
        count: usize,
    },

    /// A line of an input file could not be parsed.
    #[error("{}:{line}: {message}", path.display())]
    Parse {
        /// The file path.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error loading a grid from file.
    #[error("failed to load grid from {}: {message}", path.display())]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Error writing output.
    #[error("failed to save to {}: {message}", path.display())]
    SaveError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl GridError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        GridError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Create a field length mismatch error.
    pub fn field_mismatch(field: &str, expected: usize, actual: usize) -> Self {
        GridError::FieldLengthMismatch {
            field: field.to_string(),
            expected,
            actual,
        }
    }
}
