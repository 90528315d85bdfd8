//! Run configuration.
//!
//! A [`Config`] names the input grid files, how many levels to build and
//! where to write visualization output. It is built once at startup (by the
//! CLI from its arguments) and passed to whatever drives the refinement.

use std::path::{Path, PathBuf};

use crate::error::{GridError, Result};

/// Default coordinate file.
pub const DEFAULT_COORDS_PATH: &str = "data/coords-square.dat";

/// Default connectivity file.
pub const DEFAULT_CONN_PATH: &str = "data/conn-square.dat";

/// Default total number of levels, including the base grid.
pub const DEFAULT_LEVELS: usize = 8;

/// Default prefix for `.pvd`/`.vtu` output.
pub const DEFAULT_OUTPUT_PREFIX: &str = "data/test";

/// Settings for one refinement run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Vertex coordinate file.
    pub coords_path: PathBuf,

    /// Triangle connectivity file (1-based indices).
    pub conn_path: PathBuf,

    /// Total number of levels, including the base grid.
    pub levels: usize,

    /// Output files are written as `<prefix>.pvd` and `<prefix>_<level>.vtu`.
    pub output_prefix: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            coords_path: PathBuf::from(DEFAULT_COORDS_PATH),
            conn_path: PathBuf::from(DEFAULT_CONN_PATH),
            levels: DEFAULT_LEVELS,
            output_prefix: PathBuf::from(DEFAULT_OUTPUT_PREFIX),
        }
    }
}

impl Config {
    /// Create a configuration for the given input files, with default settings.
    pub fn new(coords_path: impl AsRef<Path>, conn_path: impl AsRef<Path>) -> Self {
        Self {
            coords_path: coords_path.as_ref().to_path_buf(),
            conn_path: conn_path.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Set the total number of levels.
    pub fn with_levels(mut self, levels: usize) -> Self {
        self.levels = levels;
        self
    }

    /// Set the output prefix.
    pub fn with_output_prefix(mut self, prefix: impl AsRef<Path>) -> Self {
        self.output_prefix = prefix.as_ref().to_path_buf();
        self
    }

    /// Check that the settings describe a runnable job.
    pub fn validate(&self) -> Result<()> {
        if self.levels == 0 {
            return Err(GridError::invalid_param(
                "levels",
                self.levels,
                "must be at least 1",
            ));
        }
        if self.output_prefix.as_os_str().is_empty() {
            return Err(GridError::invalid_param(
                "output_prefix",
                "\"\"",
                "must not be empty",
            ));
        }
        Ok(())
    }
}
