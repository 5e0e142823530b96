//! Build orchestration of the external solver.
//!
//! The solver consumes the exported mesh files. Building it means cloning
//! its repository, pinning a revision, and running CMake; every step is a
//! subprocess and nothing here runs unless [`SolverBuilder::run`] (or one
//! of its steps) is called explicitly.
//!
//! # Example
//!
//! ```no_run
//! use meshfem_export::builder::{SolverBuildConfig, SolverBuilder};
//!
//! let config = SolverBuildConfig::default().with_jobs(8);
//! SolverBuilder::new(config).run().unwrap();
//! ```

mod config;
mod runner;

pub use config::{BuildType, DEFAULT_COMMIT, DEFAULT_REPO_URL, SolverBuildConfig};
pub use runner::{SolverBuildError, SolverBuilder};
