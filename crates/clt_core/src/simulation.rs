//! Full simulation run
//!
//! [`simulate`] wires the pipeline together: validate the configuration,
//! normalize the density, build the CDF, predict the moments, run the trials,
//! and compare the predicted spread of the means with the observed one.

use serde::Serialize;
use tracing::{debug, info};

use crate::cdf::DiscreteCdf;
use crate::config::SimulationConfig;
use crate::density::Density;
use crate::error::{ConfigError, Result};
use crate::histogram::Histogram;
use crate::metrics::SamplingMetrics;
use crate::moments::{MomentPrediction, predict};
use crate::normalize::normalize;
use crate::random::RandomSource;
use crate::sampler::Sampler;
use crate::trials::{MeanDistribution, TrialAggregator};

/// Predicted versus experimental statistics of the trial means
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    pub predicted_mean: f64,
    pub experimental_mean: f64,
    pub predicted_std_dev: f64,
    pub experimental_std_dev: f64,
    pub num_means: usize,
}

impl Comparison {
    #[must_use]
    pub fn mean_error(&self) -> f64 {
        self.experimental_mean - self.predicted_mean
    }

    #[must_use]
    pub fn std_dev_error(&self) -> f64 {
        self.experimental_std_dev - self.predicted_std_dev
    }

    /// Distance between the means in units of the predicted standard error
    #[must_use]
    pub fn mean_z_score(&self) -> f64 {
        let standard_error = self.predicted_std_dev / (self.num_means as f64).sqrt();
        if standard_error == 0.0 {
            return 0.0;
        }
        self.mean_error() / standard_error
    }

    /// Relative deviation of the experimental spread from the prediction
    #[must_use]
    pub fn std_dev_ratio(&self) -> f64 {
        if self.predicted_std_dev == 0.0 {
            return 1.0;
        }
        self.experimental_std_dev / self.predicted_std_dev
    }
}

/// Everything a run produces, ready for reporting or plotting
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    /// Name of the density strategy
    pub density: String,
    /// Normalized density tabulated over the domain
    pub density_table: Vec<(f64, f64)>,
    pub cdf: DiscreteCdf,
    pub means: MeanDistribution,
    pub histogram: Histogram,
    pub prediction: MomentPrediction,
    pub comparison: Comparison,
    pub metrics: SamplingMetrics,
}

/// Run the full pipeline with a fresh random source seeded from `config.seed`
pub fn simulate<D: Density>(density: D, config: &SimulationConfig) -> Result<SimulationResult> {
    let mut source = RandomSource::from_seed(config.seed);
    simulate_with_source(density, config, &mut source)
}

/// Run the full pipeline drawing from `source`.
///
/// Normalize, build the CDF, predict moments, run the trials, and compare.
/// Fails before any sampling if the configuration or the density is invalid.
pub fn simulate_with_source<D: Density>(
    density: D,
    config: &SimulationConfig,
    source: &mut RandomSource,
) -> Result<SimulationResult> {
    config.validate()?;
    let domain = config.domain()?;
    let label = density.label();

    debug!(
        density = %label,
        xmin = domain.xmin,
        xmax = domain.xmax,
        numpoints = config.numpoints,
        num_iterations = config.num_iterations,
        num_means = config.num_means,
        seed = source.seed(),
        "starting simulation"
    );

    let pdf = normalize(density, domain, config.probe_points(), &config.integration)?;
    let density_table = pdf.tabulate(config.numpoints);
    let cdf = DiscreteCdf::build(&pdf, config.numpoints)?;
    let prediction = predict(&pdf, config.num_iterations, &config.integration)?;

    let sampler = Sampler::new(cdf)
        .with_policy(config.boundary)
        .with_search(config.search);
    let run = TrialAggregator::new(config.num_iterations, config.num_means).run(
        &sampler,
        source,
        config.execution,
    )?;

    let histogram = run
        .means
        .histogram(config.histogram_bins(), domain.xmin, domain.xmax)
        .ok_or(ConfigError::ZeroHistogramBins)?;

    let comparison = Comparison {
        predicted_mean: prediction.mean,
        experimental_mean: run.means.mean(),
        predicted_std_dev: prediction.std_dev_of_mean,
        experimental_std_dev: run.means.std_dev(),
        num_means: run.means.len(),
    };

    info!(
        density = %label,
        predicted_mean = comparison.predicted_mean,
        experimental_mean = comparison.experimental_mean,
        predicted_std_dev = comparison.predicted_std_dev,
        experimental_std_dev = comparison.experimental_std_dev,
        "simulation complete"
    );

    Ok(SimulationResult {
        density: label,
        density_table,
        cdf: sampler.into_cdf(),
        means: run.means,
        histogram,
        prediction,
        comparison,
        metrics: run.metrics,
    })
}
