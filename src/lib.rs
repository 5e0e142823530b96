//! # meshfem-export
//!
//! Exports 2D spectral-element meshes to the text files read by the
//! SPECFEM++ meshfem front end, and builds the solver that consumes them.
//!
//! This crate provides:
//! - Mesh model with explicit element topology (QUA9, QUA4)
//! - Physical groups and boundary roles (free surface, absorbing)
//! - Nonconforming element interfaces
//! - Meshfem file export with per-file configuration
//! - JSON model files and TOML project configuration
//! - Solver build orchestration (git, CMake)

pub mod builder;
pub mod config;
pub mod io;
pub mod mesh;
pub mod types;

// Re-export main types for convenience
pub use builder::{SolverBuildConfig, SolverBuildError, SolverBuilder};
pub use config::{ConfigError, ProjectConfig};
pub use io::{
    ExportArtifact, ExportError, ExportFileConfig, ExportSummary, Exporter, PlaneProjection,
    read_model_json, write_model_json,
};
pub use mesh::{
    BoundaryEdge, BoundaryRole, ElementTopology, MaterialId, Model, ModelError,
    NonconformingInterfaces, PhysicalGroup,
};
pub use types::{EdgeType, ElementIndex, NodeIndex};
