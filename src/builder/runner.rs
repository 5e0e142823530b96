//! Runs the solver build as a sequence of subprocesses.

use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use log::{debug, info, warn};
use thiserror::Error;

use super::config::SolverBuildConfig;

/// Error type for solver build steps.
#[derive(Debug, Error)]
pub enum SolverBuildError {
    /// The program could not be started.
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        /// Program name.
        program: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A directory needed by a step could not be created.
    #[error("failed to create {}: {source}", path.display())]
    Prepare {
        /// Directory being created.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The program exited unsuccessfully.
    #[error("`{program}` failed with {status}{}", stderr_suffix(.stderr))]
    Failed {
        /// Program name.
        program: String,
        /// Exit status.
        status: ExitStatus,
        /// Captured standard error, if output was captured.
        stderr: Option<String>,
    },
}

fn stderr_suffix(stderr: &Option<String>) -> String {
    match stderr {
        Some(s) if !s.trim().is_empty() => format!(": {}", s.trim()),
        _ => String::new(),
    }
}

/// Fetches, configures and compiles the solver.
///
/// Each step is exposed as a `*_command` constructor and a runner, so the
/// exact command lines can be inspected without executing them.
#[derive(Debug, Clone)]
pub struct SolverBuilder {
    config: SolverBuildConfig,
}

impl SolverBuilder {
    /// Create a builder.
    pub fn new(config: SolverBuildConfig) -> Self {
        Self { config }
    }

    /// The build configuration.
    pub fn config(&self) -> &SolverBuildConfig {
        &self.config
    }

    /// `git clone <url> <repo_dir>`
    pub fn clone_command(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.arg("clone")
            .arg(&self.config.repo_url)
            .arg(&self.config.repo_dir);
        cmd
    }

    /// `git checkout <commit>` inside the checkout, if a commit is pinned.
    pub fn checkout_command(&self) -> Option<Command> {
        let commit = self.config.commit.as_ref()?;
        let mut cmd = Command::new("git");
        cmd.arg("checkout").arg(commit).current_dir(&self.config.repo_dir);
        Some(cmd)
    }

    /// `cmake -S <repo_dir> -B <build_dir> -D<key>=<value> ...`
    pub fn configure_command(&self) -> Command {
        let mut cmd = Command::new("cmake");
        cmd.arg("-S")
            .arg(&self.config.repo_dir)
            .arg("-B")
            .arg(self.config.build_dir());
        for (key, value) in self.config.definitions() {
            cmd.arg(format!("-D{}={}", key, value));
        }
        cmd
    }

    /// `cmake --build <build_dir> --parallel <jobs>`
    pub fn build_command(&self) -> Command {
        let mut cmd = Command::new("cmake");
        cmd.arg("--build")
            .arg(self.config.build_dir())
            .arg("--parallel")
            .arg(self.config.jobs.to_string());
        cmd
    }

    /// Clone the repository unless the checkout directory already exists.
    pub fn clone_repository(&self) -> Result<(), SolverBuildError> {
        if self.config.repo_dir.exists() {
            info!(
                "Solver checkout {} exists; skipping clone",
                self.config.repo_dir.display()
            );
            return Ok(());
        }
        if let Some(parent) = self.config.repo_dir.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| SolverBuildError::Prepare {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        info!("Cloning {}", self.config.repo_url);
        self.execute(self.clone_command())
    }

    /// Check out the pinned revision.
    ///
    /// A failed checkout is logged and the build continues on the current
    /// revision.
    pub fn checkout(&self) -> Result<(), SolverBuildError> {
        let Some(cmd) = self.checkout_command() else {
            return Ok(());
        };
        match self.execute(cmd) {
            Err(SolverBuildError::Failed { status, .. }) => {
                warn!("git checkout failed with {}; continuing", status);
                Ok(())
            }
            other => other,
        }
    }

    /// Run the CMake configure step.
    pub fn configure(&self) -> Result<(), SolverBuildError> {
        info!("Configuring solver in {}", self.config.build_dir().display());
        self.execute(self.configure_command())
    }

    /// Run the CMake build step.
    pub fn build(&self) -> Result<(), SolverBuildError> {
        info!("Building solver with {} jobs", self.config.jobs);
        self.execute(self.build_command())
    }

    /// Clone, check out, configure and build, stopping at the first error.
    pub fn run(&self) -> Result<(), SolverBuildError> {
        self.clone_repository()?;
        self.checkout()?;
        self.configure()?;
        self.build()?;
        info!("Solver build finished");
        Ok(())
    }

    fn execute(&self, mut cmd: Command) -> Result<(), SolverBuildError> {
        let program = program_name(cmd.get_program());
        debug!("Running {:?}", cmd);

        let spawn_err = |source| SolverBuildError::Spawn {
            program: program.clone(),
            source,
        };

        if self.config.capture_output {
            let output = cmd
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .output()
                .map_err(spawn_err)?;
            let stdout = String::from_utf8_lossy(&output.stdout);
            for line in stdout.lines() {
                debug!("[{}] {}", program, line);
            }
            if !output.status.success() {
                return Err(SolverBuildError::Failed {
                    program,
                    status: output.status,
                    stderr: Some(String::from_utf8_lossy(&output.stderr).into_owned()),
                });
            }
        } else {
            let status = cmd.status().map_err(spawn_err)?;
            if !status.success() {
                return Err(SolverBuildError::Failed {
                    program,
                    status,
                    stderr: None,
                });
            }
        }
        Ok(())
    }
}

fn program_name(program: &OsStr) -> String {
    program.to_string_lossy().into_owned()
}
