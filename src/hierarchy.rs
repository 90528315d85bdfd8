//! Sequences of refinement levels.
//!
//! A [`MeshHierarchy`] owns one [`Level`] per refinement step. Level 0 is the
//! base grid; level `i + 1` is produced from level `i` by
//! [`refine`](crate::algo::refine::refine), carrying every field of level `i`
//! along by interpolation. Levels never share storage, and a level is not
//! touched again once the next one has been built.

use log::info;

use crate::algo::refine::refine_with_progress;
use crate::algo::Progress;
use crate::error::{GridError, Result};
use crate::field::ScalarField;
use crate::mesh::TriMesh;

/// One mesh together with the fields defined on its vertices.
#[derive(Debug, Clone, Default)]
pub struct Level {
    /// The mesh of this level.
    pub mesh: TriMesh,
    fields: Vec<ScalarField>,
}

impl Level {
    /// A level with no fields.
    pub fn new(mesh: TriMesh) -> Self {
        Self {
            mesh,
            fields: Vec::new(),
        }
    }

    /// A level with the given fields.
    ///
    /// # Errors
    /// [`GridError::FieldLengthMismatch`] if a field does not have one value
    /// per vertex.
    pub fn with_fields(mesh: TriMesh, fields: Vec<ScalarField>) -> Result<Self> {
        let mut level = Self::new(mesh);
        for field in fields {
            level.push_field(field)?;
        }
        Ok(level)
    }

    /// Attach another field.
    ///
    /// # Errors
    /// [`GridError::FieldLengthMismatch`] if the field does not have one
    /// value per vertex.
    pub fn push_field(&mut self, field: ScalarField) -> Result<()> {
        if !field.matches(&self.mesh) {
            return Err(GridError::field_mismatch(
                field.name(),
                self.mesh.num_vertices(),
                field.len(),
            ));
        }
        self.fields.push(field);
        Ok(())
    }

    /// All fields of this level.
    pub fn fields(&self) -> &[ScalarField] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&ScalarField> {
        self.fields.iter().find(|f| f.name() == name)
    }
}

/// A base grid and its successive uniform refinements.
#[derive(Debug, Clone)]
pub struct MeshHierarchy {
    levels: Vec<Level>,
}

impl MeshHierarchy {
    /// Start a hierarchy from a base level.
    pub fn new(mut base: Level) -> Self {
        base.mesh.update_boundary();
        Self { levels: vec![base] }
    }

    /// Build `num_levels` levels (the base plus `num_levels - 1` refinements).
    pub fn build(base: Level, num_levels: usize) -> Result<Self> {
        Self::build_with_progress(base, num_levels, &Progress::none())
    }

    /// Build with progress reporting; one step per level.
    pub fn build_with_progress(
        base: Level,
        num_levels: usize,
        progress: &Progress,
    ) -> Result<Self> {
        if num_levels == 0 {
            return Err(GridError::invalid_param(
                "num_levels",
                num_levels,
                "must be at least 1",
            ));
        }

        let mut hierarchy = Self::new(base);
        let steps = num_levels - 1;
        for step in 0..steps {
            progress.report(step, steps, "Refining levels");
            hierarchy.refine_next()?;
        }
        progress.report(steps, steps, "Refining levels");

        Ok(hierarchy)
    }

    /// Refine the finest level once and append the result.
    pub fn refine_next(&mut self) -> Result<&Level> {
        self.refine_next_with_progress(&Progress::none())
    }

    /// Refine the finest level once with per-triangle progress reporting.
    pub fn refine_next_with_progress(&mut self, progress: &Progress) -> Result<&Level> {
        let coarse = self.finest();
        let refined = refine_with_progress(&coarse.mesh, coarse.fields(), progress)?;

        let index = self.levels.len();
        info!(
            "Level {}: {} vertices, {} triangles",
            index,
            refined.mesh.num_vertices(),
            refined.mesh.num_triangles()
        );

        self.levels.push(Level {
            mesh: refined.mesh,
            fields: refined.fields,
        });
        Ok(self.finest())
    }

    /// Number of levels, including the base.
    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    /// Level `i` (0 is the base grid).
    ///
    /// # Panics
    /// Panics if `i >= self.num_levels()`.
    pub fn level(&self, i: usize) -> &Level {
        &self.levels[i]
    }

    /// Mutable access to level `i`, e.g. to attach per-level data.
    pub fn level_mut(&mut self, i: usize) -> &mut Level {
        &mut self.levels[i]
    }

    /// The base grid.
    pub fn coarsest(&self) -> &Level {
        &self.levels[0]
    }

    /// The most refined level.
    pub fn finest(&self) -> &Level {
        // never empty: `new` always stores the base level
        &self.levels[self.levels.len() - 1]
    }

    /// Iterate over the levels, coarse to fine.
    pub fn levels(&self) -> impl Iterator<Item = &Level> + '_ {
        self.levels.iter()
    }

    /// Take ownership of the levels.
    pub fn into_levels(self) -> Vec<Level> {
        self.levels
    }
}
