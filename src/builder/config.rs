//! Build configuration of the external solver.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Upstream repository of the solver.
pub const DEFAULT_REPO_URL: &str = "https://github.com/PrincetonUniversity/SPECFEMPP";

/// Solver revision the mesh format is known to match.
pub const DEFAULT_COMMIT: &str = "d54f53173eabafcdeab90313f5466bd4cf2ff9b3";

/// CMake build type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildType {
    /// Optimized build.
    #[default]
    Release,
    /// Debug symbols, no optimization.
    Debug,
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildType::Release => write!(f, "Release"),
            BuildType::Debug => write!(f, "Debug"),
        }
    }
}

/// How to fetch, configure and compile the solver.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverBuildConfig {
    /// Git URL to clone from.
    pub repo_url: String,
    /// Checkout directory.
    pub repo_dir: PathBuf,
    /// Revision to check out after cloning; `None` keeps the default branch.
    pub commit: Option<String>,
    /// CMake build directory; defaults to `<repo_dir>/build`.
    pub build_dir: Option<PathBuf>,
    /// CMake build type.
    pub build_type: BuildType,
    /// `CMAKE_C_COMPILER`
    pub c_compiler: Option<String>,
    /// `CMAKE_CXX_COMPILER`
    pub cxx_compiler: Option<String>,
    /// `CMAKE_Fortran_COMPILER`
    pub fortran_compiler: Option<String>,
    /// Extra `-D` definitions passed to CMake.
    pub cmake_definitions: BTreeMap<String, String>,
    /// Parallel build jobs.
    pub jobs: usize,
    /// Capture subprocess output into the log instead of inheriting stdio.
    pub capture_output: bool,
}

impl Default for SolverBuildConfig {
    fn default() -> Self {
        let cmake_definitions = [
            ("SPECFEM_ENABLE_VTK", "OFF"),
            ("Kokkos_ENABLE_SERIAL", "ON"),
            ("Kokkos_ENABLE_AGGRESSIVE_VECTORIZATION", "ON"),
            ("SPECFEM_ENABLE_SIMD", "ON"),
            ("Kokkos_ENABLE_ATOMICS_BYPASS", "OFF"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            repo_url: DEFAULT_REPO_URL.to_string(),
            repo_dir: PathBuf::from("terrarium").join("SPECFEMPP"),
            commit: Some(DEFAULT_COMMIT.to_string()),
            build_dir: None,
            build_type: BuildType::Release,
            c_compiler: Some("gcc-13".to_string()),
            cxx_compiler: Some("g++-13".to_string()),
            fortran_compiler: Some("gfortran-13".to_string()),
            cmake_definitions,
            jobs: 4,
            capture_output: false,
        }
    }
}

impl SolverBuildConfig {
    /// Set the checkout directory.
    pub fn with_repo_dir(mut self, repo_dir: impl Into<PathBuf>) -> Self {
        self.repo_dir = repo_dir.into();
        self
    }

    /// Set the build directory.
    pub fn with_build_dir(mut self, build_dir: impl Into<PathBuf>) -> Self {
        self.build_dir = Some(build_dir.into());
        self
    }

    /// Set the number of parallel build jobs (at least one).
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Set the CMake build type.
    pub fn with_build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    /// Add or replace a CMake definition.
    pub fn with_definition(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.cmake_definitions.insert(key.into(), value.into());
        self
    }

    /// Effective build directory.
    pub fn build_dir(&self) -> PathBuf {
        self.build_dir
            .clone()
            .unwrap_or_else(|| self.repo_dir.join("build"))
    }

    /// All `-D` definitions in the order they are passed to CMake.
    pub fn definitions(&self) -> Vec<(String, String)> {
        let mut defs: Vec<(String, String)> = self
            .cmake_definitions
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        defs.push(("CMAKE_BUILD_TYPE".to_string(), self.build_type.to_string()));
        let compilers = [
            ("CMAKE_C_COMPILER", &self.c_compiler),
            ("CMAKE_CXX_COMPILER", &self.cxx_compiler),
            ("CMAKE_Fortran_COMPILER", &self.fortran_compiler),
        ];
        for (key, value) in compilers {
            if let Some(value) = value {
                defs.push((key.to_string(), value.clone()));
            }
        }
        defs
    }
}
