//! Per-vertex scalar data.
//!
//! A [`ScalarField`] is a named vector of `f64` values indexed like the
//! vertices of one particular mesh. The name is what visualization output
//! shows for the data.
//!
//! A field is tied to the vertex numbering of a single refinement level.
//! Moving data to the next level goes through
//! [`refine`](crate::algo::refine::refine), which interpolates onto the new
//! vertices and hands back a new field.

use std::fmt;
use std::ops::{Index, IndexMut};

use nalgebra::Point2;

use crate::mesh::TriMesh;

/// Name given to fields created without one.
pub const DEFAULT_FIELD_NAME: &str = "Vector";

/// A named array of per-vertex values.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    name: String,
    values: Vec<f64>,
}

impl Default for ScalarField {
    fn default() -> Self {
        Self::new(DEFAULT_FIELD_NAME)
    }
}

impl ScalarField {
    /// Create an empty field.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Create a field of `len` zeros.
    pub fn zeros(name: impl Into<String>, len: usize) -> Self {
        Self {
            name: name.into(),
            values: vec![0.0; len],
        }
    }

    /// Create a field from existing values.
    pub fn from_values(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Sample `f` at every vertex of `mesh`.
    pub fn from_fn<F>(name: impl Into<String>, mesh: &TriMesh, f: F) -> Self
    where
        F: Fn(&Point2<f64>) -> f64,
    {
        Self {
            name: name.into(),
            values: mesh.vertices().iter().map(f).collect(),
        }
    }

    /// The field name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the field.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the field holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Grow or shrink to `len` values. New entries are zero.
    pub fn resize(&mut self, len: usize) {
        self.values.resize(len, 0.0);
    }

    /// The values in vertex order.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Mutable access to the values.
    #[inline]
    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Consume the field and return its values.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Set `self[indices[k]] = values[k]` for every `k`.
    ///
    /// # Panics
    /// Panics if the slices differ in length or an index is out of range.
    pub fn set_values(&mut self, indices: &[usize], values: &[f64]) {
        assert_eq!(
            indices.len(),
            values.len(),
            "field '{}': {} indices but {} values",
            self.name,
            indices.len(),
            values.len()
        );
        for (&i, &v) in indices.iter().zip(values) {
            self.values[i] = v;
        }
    }

    /// Whether the field has one value per vertex of `mesh`.
    #[inline]
    pub fn matches(&self, mesh: &TriMesh) -> bool {
        self.values.len() == mesh.num_vertices()
    }
}

impl Index<usize> for ScalarField {
    type Output = f64;

    #[inline]
    fn index(&self, i: usize) -> &f64 {
        &self.values[i]
    }
}

impl IndexMut<usize> for ScalarField {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.values[i]
    }
}

impl fmt::Display for ScalarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.name)?;
        for (i, v) in self.values.iter().enumerate() {
            writeln!(f, "\t{}: {}", i, v)?;
        }
        Ok(())
    }
}
