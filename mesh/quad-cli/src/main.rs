//! Repeated Catmull-Clark refinement of a quad mesh.
//!
//! Loads a `.dat` mesh, writes it as `Step0.vtu`, then refines it
//! `--max-step` times, writing `Step<k>.vtu` after each step.
//!
//! ```text
//! quad-subdiv --input model/2d_example.dat --output-dir result --max-step 3
//! ```
//!
//! Log verbosity follows `--log-level`, which accepts any `RUST_LOG`-style
//! filter such as `debug` or `quad_subdivide=trace`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use quad_subdivide::refine;
use quad_types::{MeshTopology, QuadTopology};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Catmull-Clark subdivision of quad meshes
///
/// Every step is written as a VTK unstructured grid for `ParaView`.
#[derive(Debug, Parser)]
#[command(name = "quad-subdiv")]
#[command(about = "Catmull-Clark subdivision of quad meshes", long_about = None)]
#[command(version)]
struct Cli {
    /// Input mesh in .dat format
    #[arg(short, long)]
    input: PathBuf,

    /// Existing directory that receives Step<k>.vtu files
    #[arg(short, long, default_value = "result")]
    output_dir: PathBuf,

    /// Number of subdivision steps
    #[arg(short, long, default_value_t = 3)]
    max_step: u32,

    /// Log filter, e.g. "info" or "quad_subdivide=debug"
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(&cli.log_level);
    run(&cli)
}

fn init_logger(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|err| {
        eprintln!("Invalid log filter {level:?}: {err}; using \"info\"");
        EnvFilter::new("info")
    });

    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("Failed to initialize logger: {err}");
    }
}

fn run(cli: &Cli) -> Result<()> {
    if !cli.output_dir.is_dir() {
        bail!(
            "output directory {} does not exist",
            cli.output_dir.display()
        );
    }

    info!("Input file:  {}", cli.input.display());
    info!("Output dir:  {}", cli.output_dir.display());
    info!("Max step:    {}", cli.max_step);

    let start = Instant::now();
    let mesh = quad_io::load_dat(&cli.input)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;
    let topology = MeshTopology::from_mesh(mesh);
    info!(
        "Iteration 0    {:8.2e}s    {}",
        start.elapsed().as_secs_f64(),
        topology.counts()
    );
    write_step(&topology, &cli.output_dir, 0)?;

    for step in 1..=cli.max_step {
        let start = Instant::now();
        let refined =
            refine(&topology).with_context(|| format!("subdivision step {step} failed"))?;
        info!(
            "Iteration {step}    {:8.2e}s    {}",
            start.elapsed().as_secs_f64(),
            refined.counts()
        );
        write_step(&topology, &cli.output_dir, step)?;
    }

    info!("Subdivision finished");
    Ok(())
}

fn step_path(dir: &Path, step: u32) -> PathBuf {
    dir.join(format!("Step{step}.vtu"))
}

fn write_step(topology: &MeshTopology, dir: &Path, step: u32) -> Result<()> {
    let path = step_path(dir, step);
    quad_io::save_vtu(topology.snapshot().as_ref(), &path)
        .with_context(|| format!("failed to write {}", path.display()))
}
