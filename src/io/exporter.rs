//! Mesh exporter.
//!
//! Writes a [`Model`] to the set of text files read by the meshfem front
//! end of the solver. Which files are written, and where, is decided by an
//! [`ExportFileConfig`].
//!
//! ## Export Order
//! 1. Node coordinates
//! 2. Mesh (connectivity)
//! 3. Materials
//! 4. Free surface
//! 5. Absorbing surface (if enabled)
//! 6. Acoustic forcing surface, absorbing CPML, tangential detection curve
//!    (if enabled; count-only placeholders)
//! 7. Nonconforming adjacencies (if enabled)
//!
//! The first four are always resolved, so disabling one of them is an error.
//! An error aborts the export; files already written are left in place.
//!
//! ## Example
//! ```no_run
//! use meshfem_export::io::Exporter;
//! use meshfem_export::mesh::Model;
//!
//! # fn run(model: &Model) -> Result<(), meshfem_export::io::ExportError> {
//! let summary = Exporter::new(model, "MESH-default")?
//!     .with_absorbing_group(None)
//!     .export_mesh()?;
//! println!("wrote {} files", summary.len());
//! # Ok(())
//! # }
//! ```

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use thiserror::Error;

use super::file_config::{ExportArtifact, ExportFileConfig, FileConfigError};
use super::meshfem_format::{
    write_connectivity, write_materials, write_node_coords, write_nonconforming_adjacencies,
    write_placeholder, write_surface_edges, PlaneProjection,
};
use crate::mesh::{BoundaryRole, Model, ModelError};

/// Physical group used for the acoustic free surface unless overridden.
pub const DEFAULT_FREE_SURFACE_GROUP: &str = "acoustic_free_surface";

/// Physical group used for the absorbing boundary unless overridden.
pub const DEFAULT_ABSORBING_GROUP: &str = "absorbing";

const NULL_FREE_SURFACE: &str = "_NULL_AFS_";
const NULL_ABSORBING: &str = "_NULL_ABS_";

/// Error type for mesh export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// I/O error not tied to an artifact file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Writing an artifact file failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// File being written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// An artifact path could not be resolved.
    #[error(transparent)]
    Config(#[from] FileConfigError),

    /// The model violates an invariant.
    #[error("invalid mesh model: {0}")]
    Model(#[from] ModelError),
}

/// Files written by one export.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Artifacts in the order they were written.
    pub written: Vec<(ExportArtifact, PathBuf)>,
}

impl ExportSummary {
    /// Number of files written.
    pub fn len(&self) -> usize {
        self.written.len()
    }

    /// Whether nothing was written.
    pub fn is_empty(&self) -> bool {
        self.written.is_empty()
    }

    /// Whether an artifact was written.
    pub fn contains(&self, artifact: ExportArtifact) -> bool {
        self.written.iter().any(|(a, _)| *a == artifact)
    }

    /// Path an artifact was written to.
    pub fn path(&self, artifact: ExportArtifact) -> Option<&Path> {
        self.written
            .iter()
            .find(|(a, _)| *a == artifact)
            .map(|(_, p)| p.as_path())
    }
}

/// Writes a mesh model to meshfem files.
///
/// The exporter borrows the model and never mutates it. It is meant to be
/// built, run once with [`Exporter::export_mesh`], and dropped.
#[derive(Debug, Clone)]
pub struct Exporter<'a> {
    model: &'a Model,
    file_outputs: ExportFileConfig,
    free_surface: BoundaryRole<'a>,
    absorbing: BoundaryRole<'a>,
    projection: PlaneProjection,
}

impl<'a> Exporter<'a> {
    /// Create an exporter for `model`.
    ///
    /// `file_outputs` is either a full [`ExportFileConfig`] or a destination
    /// folder, which gets the default configuration. The model is validated
    /// here so a broken model fails before any file is touched. Boundary roles
    /// bind to [`DEFAULT_FREE_SURFACE_GROUP`] and [`DEFAULT_ABSORBING_GROUP`].
    pub fn new(
        model: &'a Model,
        file_outputs: impl Into<ExportFileConfig>,
    ) -> Result<Self, ExportError> {
        model.validate()?;
        Ok(Self {
            model,
            file_outputs: file_outputs.into(),
            free_surface: resolve_role(model, Some(DEFAULT_FREE_SURFACE_GROUP), NULL_FREE_SURFACE),
            absorbing: resolve_role(model, Some(DEFAULT_ABSORBING_GROUP), NULL_ABSORBING),
            projection: PlaneProjection::default(),
        })
    }

    /// Bind the acoustic free surface to a group, or disable it with `None`.
    pub fn with_free_surface_group(mut self, name: Option<&str>) -> Self {
        self.free_surface = resolve_role(self.model, name, NULL_FREE_SURFACE);
        self
    }

    /// Bind the absorbing boundary to a group, or disable it with `None`.
    pub fn with_absorbing_group(mut self, name: Option<&str>) -> Self {
        self.absorbing = resolve_role(self.model, name, NULL_ABSORBING);
        self
    }

    /// Select the plane the nodes are projected to.
    pub fn with_projection(mut self, projection: PlaneProjection) -> Self {
        self.projection = projection;
        self
    }

    /// Folder the files are written to.
    pub fn destination_folder(&self) -> &Path {
        &self.file_outputs.base_folder
    }

    /// File output configuration.
    pub fn file_outputs(&self) -> &ExportFileConfig {
        &self.file_outputs
    }

    /// Role bound to the acoustic free surface.
    pub fn free_surface_role(&self) -> BoundaryRole<'a> {
        self.free_surface
    }

    /// Role bound to the absorbing boundary.
    pub fn absorbing_role(&self) -> BoundaryRole<'a> {
        self.absorbing
    }

    /// Write every enabled artifact.
    pub fn export_mesh(&self) -> Result<ExportSummary, ExportError> {
        let dest = self.destination_folder();
        if !dest.exists() {
            debug!("Creating destination folder {}", dest.display());
            fs::create_dir_all(dest)?;
        }

        let model = self.model;
        let mut summary = ExportSummary::default();

        self.write_artifact(ExportArtifact::NodeCoords, &mut summary, |w| {
            Ok(write_node_coords(w, &model.nodes, self.projection)?)
        })?;

        self.write_artifact(ExportArtifact::Mesh, &mut summary, |w| {
            Ok(write_connectivity(w, &model.elements)?)
        })?;

        self.write_artifact(ExportArtifact::Materials, &mut summary, |w| {
            Ok(write_materials(w, &model.materials)?)
        })?;

        let free_surface = self.free_surface.group();
        self.write_artifact(ExportArtifact::FreeSurface, &mut summary, |w| {
            Ok(write_surface_edges(w, model, free_surface, false)?)
        })?;

        if self.file_outputs.is_enabled(ExportArtifact::AxialElements) {
            warn!("Axial element export is not supported; skipping");
        }

        if self.file_outputs.is_enabled(ExportArtifact::AbsorbingSurface) {
            let absorbing = self.absorbing.group();
            self.write_artifact(ExportArtifact::AbsorbingSurface, &mut summary, |w| {
                Ok(write_surface_edges(w, model, absorbing, true)?)
            })?;
        }

        for artifact in [
            ExportArtifact::AcousticForcingSurface,
            ExportArtifact::AbsorbingCpml,
            ExportArtifact::TangentialDetectionCurve,
        ] {
            if self.file_outputs.is_enabled(artifact) {
                self.write_artifact(artifact, &mut summary, |w| Ok(write_placeholder(w)?))?;
            }
        }

        if self
            .file_outputs
            .is_enabled(ExportArtifact::NonconformingAdjacencies)
        {
            self.write_artifact(ExportArtifact::NonconformingAdjacencies, &mut summary, |w| {
                write_nonconforming_adjacencies(w, &model.nonconforming_interfaces)
            })?;
        }

        info!(
            "Exported {} files to {}",
            summary.len(),
            self.destination_folder().display()
        );
        Ok(summary)
    }

    /// Resolve, create and fill one artifact file.
    ///
    /// The file handle is dropped when this returns, on success or error.
    fn write_artifact<F>(
        &self,
        artifact: ExportArtifact,
        summary: &mut ExportSummary,
        body: F,
    ) -> Result<(), ExportError>
    where
        F: FnOnce(&mut BufWriter<File>) -> Result<(), ExportError>,
    {
        let path = self.file_outputs.resolve(artifact)?;
        let with_path = |e: ExportError| match e {
            ExportError::Io(source) => ExportError::Write {
                path: path.clone(),
                source,
            },
            other => other,
        };

        let file = File::create(&path).map_err(|e| with_path(e.into()))?;
        let mut writer = BufWriter::new(file);
        body(&mut writer)
            .and_then(|()| Ok(writer.flush()?))
            .map_err(with_path)?;

        info!("Wrote {} to {}", artifact.key(), path.display());
        summary.written.push((artifact, path));
        Ok(())
    }
}

fn resolve_role<'a>(
    model: &'a Model,
    name: Option<&str>,
    null_label: &'static str,
) -> BoundaryRole<'a> {
    let role = BoundaryRole::resolve(&model.physical_groups, name, null_label);
    match (name, role) {
        (Some(name), BoundaryRole::Null { .. }) => {
            warn!(
                "Physical group '{}' not found in model; exporting it as empty ({})",
                name, null_label
            );
        }
        (None, _) => debug!("Boundary role {} disabled", null_label),
        (Some(_), BoundaryRole::Bound { name, group }) => {
            debug!("Bound physical group '{}' ({} edges)", name, group.len());
        }
    }
    role
}
