//! Textual report and JSON artifact for a finished run

use std::path::Path;

use clt_core::metrics::SamplingMetrics;
use clt_core::{
    Comparison, DiscreteCdf, MeanDistribution, MomentPrediction, SimulationResult,
    histogram::Histogram,
};
use color_eyre::eyre::WrapErr;
use serde::Serialize;

use crate::io::atomic_write;
use crate::settings::RunConfig;

/// Predicted against experimental statistics of the trial means
#[must_use]
pub fn format_statistics(comparison: &Comparison) -> String {
    let mut out = String::from("STATISTICS\n");
    out.push_str(&format!("{:<8}{:<16}{}\n", "", "Predicted", "Experimental"));
    out.push_str(&format!(
        "{:<8}{:<16.6}{:.6}\n",
        "Mean:", comparison.predicted_mean, comparison.experimental_mean
    ));
    out.push_str(&format!(
        "{:<8}{:<16.6}{:.6}\n",
        "Stdev:", comparison.predicted_std_dev, comparison.experimental_std_dev
    ));
    out
}

/// Run size, how far the observed mean sits from the prediction, and where
/// the histogram of means peaks
#[must_use]
pub fn format_details(run: &RunConfig, result: &SimulationResult) -> String {
    let sim = &run.simulation;
    let mut out = format!(
        "Samples: {} ({} trials of {})\n",
        sim.total_samples(),
        sim.num_means,
        sim.num_iterations
    );
    out.push_str(&format!(
        "Mean z-score: {:.3}\n",
        result.comparison.mean_z_score()
    ));
    if let Some(bin) = result.histogram.mode_bin() {
        out.push_str(&format!(
            "Histogram mode: {:.4}\n",
            result.histogram.bin_center(bin)
        ));
    }
    out
}

/// One line about boundary clamping, if any draws were clamped
#[must_use]
pub fn format_clamp_note(metrics: &SamplingMetrics) -> Option<String> {
    if metrics.clamped() == 0 {
        return None;
    }
    Some(format!(
        "note: {} of {} draws fell outside the CDF range and were clamped ({:.4}%)",
        metrics.clamped(),
        metrics.samples,
        metrics.clamp_rate() * 100.0
    ))
}

#[derive(Debug, Serialize)]
struct DensityTable<'a> {
    name: &'a str,
    points: &'a [(f64, f64)],
}

/// Everything needed to plot or audit a run
#[derive(Debug, Serialize)]
struct Artifact<'a> {
    config: &'a RunConfig,
    density: DensityTable<'a>,
    cdf: &'a DiscreteCdf,
    means: &'a MeanDistribution,
    histogram: &'a Histogram,
    prediction: &'a MomentPrediction,
    comparison: &'a Comparison,
    metrics: &'a SamplingMetrics,
}

pub fn artifact_json(run: &RunConfig, result: &SimulationResult) -> serde_json::Result<String> {
    let artifact = Artifact {
        config: run,
        density: DensityTable {
            name: &result.density,
            points: &result.density_table,
        },
        cdf: &result.cdf,
        means: &result.means,
        histogram: &result.histogram,
        prediction: &result.prediction,
        comparison: &result.comparison,
        metrics: &result.metrics,
    };
    serde_json::to_string_pretty(&artifact)
}

/// Serialize the run and write it to `path` atomically
pub fn write_artifact(
    path: &Path,
    run: &RunConfig,
    result: &SimulationResult,
) -> color_eyre::Result<()> {
    let json = artifact_json(run, result).wrap_err("failed to serialize run artifact")?;
    atomic_write(path, &json)
        .wrap_err_with(|| format!("failed to write artifact to {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = json.len(), "wrote run artifact");
    Ok(())
}
