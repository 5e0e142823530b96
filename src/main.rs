//! meshfem-export command line.
//!
//! ```text
//! meshfem-export export --model model.json --output MESH-default
//! meshfem-export inspect --model model.json
//! meshfem-export build-solver --config project.toml --jobs 8
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{info, LevelFilter};

use meshfem_export::config::{ExportSection, ProjectConfig};
use meshfem_export::{Exporter, PlaneProjection, SolverBuilder, read_model_json};

/// Export 2D meshes to SPECFEM++ meshfem files and build the solver.
#[derive(Parser)]
#[command(name = "meshfem-export")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Export 2D meshes for the SPECFEM++ meshfem reader", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a model to meshfem files
    Export(ExportArgs),
    /// Summarize a model file
    Inspect(InspectArgs),
    /// Clone, configure and compile the solver
    BuildSolver(BuildArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum ProjectionArg {
    Xz,
    Xy,
}

impl From<ProjectionArg> for PlaneProjection {
    fn from(arg: ProjectionArg) -> Self {
        match arg {
            ProjectionArg::Xz => PlaneProjection::Xz,
            ProjectionArg::Xy => PlaneProjection::Xy,
        }
    }
}

#[derive(Args)]
struct ExportArgs {
    /// Model file (JSON)
    #[arg(short, long)]
    model: PathBuf,

    /// Destination folder; overrides the config file's base folder
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Project config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Physical group used as the acoustic free surface
    #[arg(long, conflicts_with = "no_free_surface")]
    free_surface: Option<String>,

    /// Export an empty free surface
    #[arg(long)]
    no_free_surface: bool,

    /// Physical group used as the absorbing boundary
    #[arg(long, conflicts_with = "no_absorbing")]
    absorbing: Option<String>,

    /// Export an empty absorbing surface
    #[arg(long)]
    no_absorbing: bool,

    /// In-plane axes of the exported coordinates
    #[arg(long, value_enum)]
    projection: Option<ProjectionArg>,
}

#[derive(Args)]
struct InspectArgs {
    /// Model file (JSON)
    #[arg(short, long)]
    model: PathBuf,
}

#[derive(Args)]
struct BuildArgs {
    /// Project config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Parallel build jobs
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Capture subprocess output into the log
    #[arg(long)]
    capture_output: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_target(false)
        .init();

    match cli.command {
        Commands::Export(args) => export(args),
        Commands::Inspect(args) => inspect(args),
        Commands::BuildSolver(args) => build_solver(args),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<ProjectConfig> {
    match path {
        Some(path) => Ok(ProjectConfig::load(path)?),
        None => Ok(ProjectConfig::default()),
    }
}

fn export(args: ExportArgs) -> Result<()> {
    let model = read_model_json(&args.model)?;
    let mut section: ExportSection = load_config(args.config.as_ref())?.export;

    if let Some(output) = args.output {
        section.files.base_folder = output;
    }
    if let Some(name) = args.free_surface {
        section.free_surface_group = name;
    }
    if args.no_free_surface {
        section.free_surface_group.clear();
    }
    if let Some(name) = args.absorbing {
        section.absorbing_group = name;
    }
    if args.no_absorbing {
        section.absorbing_group.clear();
    }
    if let Some(projection) = args.projection {
        section.projection = projection.into();
    }

    let summary = Exporter::new(&model, section.files.clone())?
        .with_free_surface_group(section.free_surface_role())
        .with_absorbing_group(section.absorbing_role())
        .with_projection(section.projection)
        .export_mesh()
        .with_context(|| {
            format!(
                "exporting {} to {}",
                args.model.display(),
                section.files.base_folder.display()
            )
        })?;

    for (artifact, path) in &summary.written {
        info!("  {:<28} {}", artifact.key(), path.display());
    }
    Ok(())
}

fn inspect(args: InspectArgs) -> Result<()> {
    let model = read_model_json(&args.model)?;

    info!("Model: {}", args.model.display());
    info!("  nodes:     {}", model.n_nodes());
    info!(
        "  elements:  {} ({})",
        model.n_elements(),
        model.topology.name()
    );
    info!(
        "  interfaces: {} nonconforming pairs",
        model.nonconforming_interfaces.num_pairs()
    );
    for (name, group) in &model.physical_groups {
        info!("  group {:<24} {} edges", name, group.len());
    }
    Ok(())
}

fn build_solver(args: BuildArgs) -> Result<()> {
    let mut config = load_config(args.config.as_ref())?.solver;
    if let Some(jobs) = args.jobs {
        config = config.with_jobs(jobs);
    }
    if args.capture_output {
        config.capture_output = true;
    }

    SolverBuilder::new(config)
        .run()
        .context("building the solver")?;
    Ok(())
}
