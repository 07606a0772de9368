use std::path::PathBuf;

use clap::Parser;
use clt::report::{format_clamp_note, format_details, format_statistics, write_artifact};
use clt::{Overrides, RunConfig, init_logging};
use clt_core::{DensityPreset, simulate};
use color_eyre::eyre::WrapErr;

#[derive(Parser, Debug)]
#[command(name = "clt")]
#[command(about = "Sample an arbitrary density and watch trial means become normal")]
struct Args {
    /// YAML run file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Density to sample (normal, bimodal, parabolic, uniform, step, lopsided)
    #[arg(short, long)]
    density: Option<DensityPreset>,

    /// Lower bound of the domain
    #[arg(long, allow_hyphen_values = true)]
    xmin: Option<f64>,

    /// Upper bound of the domain
    #[arg(long, allow_hyphen_values = true)]
    xmax: Option<f64>,

    /// Cells in the discrete CDF
    #[arg(short, long)]
    numpoints: Option<usize>,

    /// Samples averaged per trial
    #[arg(short, long)]
    iterations: Option<usize>,

    /// Number of trials
    #[arg(short, long)]
    means: Option<usize>,

    #[arg(short, long)]
    seed: Option<u64>,

    /// Run trials on the rayon thread pool
    #[arg(long)]
    parallel: bool,

    /// Locate brackets with a linear scan instead of binary search
    #[arg(long)]
    linear_search: bool,

    /// Fail on draws outside the CDF range instead of clamping them
    #[arg(long)]
    reject_out_of_range: bool,

    /// Write the full run as JSON to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            density: self.density,
            xmin: self.xmin,
            xmax: self.xmax,
            numpoints: self.numpoints,
            iterations: self.iterations,
            means: self.means,
            seed: self.seed,
            parallel: self.parallel,
            linear_search: self.linear_search,
            reject_out_of_range: self.reject_out_of_range,
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level)?;

    let mut run = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    args.overrides().apply(&mut run);

    let result = simulate(run.density, &run.simulation)
        .wrap_err_with(|| format!("simulation of the {} density failed", run.density))?;

    print!("{}", format_statistics(&result.comparison));
    println!();
    print!("{}", format_details(&run, &result));
    if let Some(note) = format_clamp_note(&result.metrics) {
        eprintln!("{note}");
    }

    if let Some(path) = &args.output {
        write_artifact(path, &run, &result)?;
    }

    Ok(())
}
