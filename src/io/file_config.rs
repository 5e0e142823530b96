//! File output configuration for the exporter.
//!
//! Every file the exporter can produce is an [`ExportArtifact`]. The
//! configuration maps each artifact to a filename under a base folder;
//! artifacts without a filename are not exported.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use meshfem_export::io::{ExportArtifact, ExportFileConfig};
//!
//! let config = ExportFileConfig::new("out")
//!     .with_file(ExportArtifact::NonconformingAdjacencies, "nc_adjacencies");
//!
//! assert_eq!(
//!     config.resolve(ExportArtifact::Mesh).unwrap(),
//!     Path::new("out").join("mesh")
//! );
//! assert!(config.resolve(ExportArtifact::AbsorbingCpml).is_err());
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for file output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileConfigError {
    /// The artifact has no filename.
    #[error("file output `{0}` is not set; cannot resolve its path")]
    NotConfigured(ExportArtifact),
}

/// A file the exporter can write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportArtifact {
    /// Element connectivity.
    Mesh,
    /// Node coordinates.
    NodeCoords,
    /// Per-element materials.
    Materials,
    /// Acoustic free surface edges.
    FreeSurface,
    /// Elements on the symmetry axis (axisymmetric runs).
    AxialElements,
    /// Absorbing boundary edges.
    AbsorbingSurface,
    /// Acoustic forcing boundary edges.
    AcousticForcingSurface,
    /// CPML absorbing layer elements.
    AbsorbingCpml,
    /// Tangential detection curve.
    TangentialDetectionCurve,
    /// Nonconforming element adjacencies.
    NonconformingAdjacencies,
}

impl ExportArtifact {
    /// All artifacts in export order.
    pub const ALL: [ExportArtifact; 10] = [
        ExportArtifact::NodeCoords,
        ExportArtifact::Mesh,
        ExportArtifact::Materials,
        ExportArtifact::FreeSurface,
        ExportArtifact::AxialElements,
        ExportArtifact::AbsorbingSurface,
        ExportArtifact::AcousticForcingSurface,
        ExportArtifact::AbsorbingCpml,
        ExportArtifact::TangentialDetectionCurve,
        ExportArtifact::NonconformingAdjacencies,
    ];

    /// Configuration key of the artifact.
    pub fn key(self) -> &'static str {
        match self {
            ExportArtifact::Mesh => "mesh",
            ExportArtifact::NodeCoords => "node_coords",
            ExportArtifact::Materials => "materials",
            ExportArtifact::FreeSurface => "free_surface",
            ExportArtifact::AxialElements => "axial_elements",
            ExportArtifact::AbsorbingSurface => "absorbing_surface",
            ExportArtifact::AcousticForcingSurface => "acoustic_forcing_surface",
            ExportArtifact::AbsorbingCpml => "absorbing_cpml",
            ExportArtifact::TangentialDetectionCurve => "tangential_detection_curve",
            ExportArtifact::NonconformingAdjacencies => "nonconforming_adjacencies",
        }
    }

    /// Artifact with the given configuration key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.key() == key)
    }

    /// Default filename; identical to the key.
    pub fn default_filename(self) -> &'static str {
        self.key()
    }

    /// Whether the default configuration exports this artifact.
    pub fn enabled_by_default(self) -> bool {
        matches!(
            self,
            ExportArtifact::Mesh
                | ExportArtifact::NodeCoords
                | ExportArtifact::Materials
                | ExportArtifact::FreeSurface
                | ExportArtifact::AbsorbingSurface
        )
    }
}

impl fmt::Display for ExportArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_file", self.key())
    }
}

/// Serializes the filename table keyed by [`ExportArtifact::key`].
mod files_by_key {
    use std::collections::BTreeMap;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::ExportArtifact;

    pub fn serialize<S: Serializer>(
        files: &BTreeMap<ExportArtifact, String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let by_key: BTreeMap<&str, &str> = files
            .iter()
            .map(|(a, name)| (a.key(), name.as_str()))
            .collect();
        by_key.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<ExportArtifact, String>, D::Error> {
        BTreeMap::<String, String>::deserialize(deserializer)?
            .into_iter()
            .map(|(key, name)| {
                ExportArtifact::from_key(&key)
                    .map(|a| (a, name))
                    .ok_or_else(|| D::Error::custom(format!("unknown file output `{}`", key)))
            })
            .collect()
    }
}

fn default_files() -> BTreeMap<ExportArtifact, String> {
    ExportArtifact::ALL
        .into_iter()
        .filter(|a| a.enabled_by_default())
        .map(|a| (a, a.default_filename().to_string()))
        .collect()
}

/// Which files to write, and where.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportFileConfig {
    /// Destination folder; created by the exporter if missing.
    pub base_folder: PathBuf,

    /// Filenames relative to `base_folder`. Missing artifacts are disabled.
    #[serde(default = "default_files", with = "files_by_key")]
    files: BTreeMap<ExportArtifact, String>,
}

impl ExportFileConfig {
    /// Default configuration under `base_folder`.
    ///
    /// Mesh, node coordinates, materials, free surface and absorbing surface
    /// are enabled with their default filenames; everything else is disabled.
    pub fn new(base_folder: impl Into<PathBuf>) -> Self {
        Self {
            base_folder: base_folder.into(),
            files: default_files(),
        }
    }

    /// Configuration with every artifact disabled.
    pub fn empty(base_folder: impl Into<PathBuf>) -> Self {
        Self {
            base_folder: base_folder.into(),
            files: BTreeMap::new(),
        }
    }

    /// Enable an artifact under the given filename.
    pub fn with_file(mut self, artifact: ExportArtifact, filename: impl Into<String>) -> Self {
        self.files.insert(artifact, filename.into());
        self
    }

    /// Enable an artifact under its default filename.
    pub fn with_default_file(self, artifact: ExportArtifact) -> Self {
        self.with_file(artifact, artifact.default_filename())
    }

    /// Disable an artifact.
    pub fn without_file(mut self, artifact: ExportArtifact) -> Self {
        self.files.remove(&artifact);
        self
    }

    /// Configured filename of an artifact.
    pub fn filename(&self, artifact: ExportArtifact) -> Option<&str> {
        self.files.get(&artifact).map(String::as_str)
    }

    /// Whether an artifact will be exported.
    pub fn is_enabled(&self, artifact: ExportArtifact) -> bool {
        self.files.contains_key(&artifact)
    }

    /// Enabled artifacts in export order.
    pub fn enabled(&self) -> impl Iterator<Item = ExportArtifact> + '_ {
        ExportArtifact::ALL.into_iter().filter(|a| self.is_enabled(*a))
    }

    /// Path of an artifact: `base_folder / filename`.
    pub fn resolve(&self, artifact: ExportArtifact) -> Result<PathBuf, FileConfigError> {
        self.filename(artifact)
            .map(|name| self.base_folder.join(name))
            .ok_or(FileConfigError::NotConfigured(artifact))
    }
}

impl From<PathBuf> for ExportFileConfig {
    fn from(base_folder: PathBuf) -> Self {
        Self::new(base_folder)
    }
}

impl From<&Path> for ExportFileConfig {
    fn from(base_folder: &Path) -> Self {
        Self::new(base_folder)
    }
}

impl From<&str> for ExportFileConfig {
    fn from(base_folder: &str) -> Self {
        Self::new(base_folder)
    }
}
