//! Reading and writing mesh files.
//!
//! This module provides:
//! - **Meshfem export**: the [`Exporter`] writing a model to the text files
//!   read by the solver's mesh front end, configured by [`ExportFileConfig`]
//! - **Line encoders**: one function per file layout in [`meshfem_format`]
//! - **Model files**: JSON (de)serialization of the mesh model
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use meshfem_export::io::{read_model_json, ExportArtifact, ExportFileConfig, Exporter};
//!
//! let model = read_model_json(Path::new("model.json")).unwrap();
//! let files = ExportFileConfig::new("MESH-default")
//!     .with_default_file(ExportArtifact::NonconformingAdjacencies);
//! Exporter::new(&model, files).unwrap().export_mesh().unwrap();
//! ```

mod exporter;
mod file_config;
pub mod meshfem_format;
mod model_file;

pub use exporter::{
    DEFAULT_ABSORBING_GROUP, DEFAULT_FREE_SURFACE_GROUP, ExportError, ExportSummary, Exporter,
};
pub use file_config::{ExportArtifact, ExportFileConfig, FileConfigError};
pub use meshfem_format::PlaneProjection;
pub use model_file::{ModelFileError, read_model_json, write_model_json};
