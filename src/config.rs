//! Project configuration file.
//!
//! One TOML file describes both where exported mesh files go and how the
//! solver is built:
//!
//! ```toml
//! [export]
//! base_folder = "MESH-default"
//! free_surface_group = "acoustic_free_surface"
//! absorbing_group = "absorbing"
//! projection = "xz"
//!
//! [export.files]
//! mesh = "mesh"
//! node_coords = "node_coords"
//! materials = "materials"
//! free_surface = "free_surface"
//! nonconforming_adjacencies = "nonconforming_adjacencies"
//!
//! [solver]
//! repo_dir = "terrarium/SPECFEMPP"
//! jobs = 8
//! ```
//!
//! Every section is optional. An `[export.files]` table is the complete list
//! of files to write; without it the default set is used.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::builder::SolverBuildConfig;
use crate::io::{
    DEFAULT_ABSORBING_GROUP, DEFAULT_FREE_SURFACE_GROUP, ExportFileConfig, PlaneProjection,
};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        /// Config file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML for this schema.
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        /// Config file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: toml::de::Error,
    },
}

/// Export section of the project configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSection {
    /// Files to write.
    #[serde(flatten)]
    pub files: ExportFileConfig,

    /// Group bound to the acoustic free surface; `""` disables the role.
    #[serde(default = "default_free_surface_group")]
    pub free_surface_group: String,

    /// Group bound to the absorbing boundary; `""` disables the role.
    #[serde(default = "default_absorbing_group")]
    pub absorbing_group: String,

    /// Plane the nodes are projected to.
    #[serde(default)]
    pub projection: PlaneProjection,
}

fn default_free_surface_group() -> String {
    DEFAULT_FREE_SURFACE_GROUP.to_string()
}

fn default_absorbing_group() -> String {
    DEFAULT_ABSORBING_GROUP.to_string()
}

impl ExportSection {
    /// Default export section writing to `base_folder`.
    pub fn new(base_folder: impl Into<PathBuf>) -> Self {
        Self {
            files: ExportFileConfig::new(base_folder),
            free_surface_group: default_free_surface_group(),
            absorbing_group: default_absorbing_group(),
            projection: PlaneProjection::default(),
        }
    }

    /// Free surface role name, `None` when disabled.
    pub fn free_surface_role(&self) -> Option<&str> {
        non_empty(&self.free_surface_group)
    }

    /// Absorbing role name, `None` when disabled.
    pub fn absorbing_role(&self) -> Option<&str> {
        non_empty(&self.absorbing_group)
    }
}

impl Default for ExportSection {
    fn default() -> Self {
        Self::new("MESH-default")
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Top-level project configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Mesh export settings.
    #[serde(default)]
    pub export: ExportSection,

    /// Solver build settings.
    #[serde(default)]
    pub solver: SolverBuildConfig,
}

impl ProjectConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
