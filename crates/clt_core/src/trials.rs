//! Trial aggregation
//!
//! A trial draws `num_iterations` samples and keeps only their mean. Running
//! `num_means` trials yields the [`MeanDistribution`] whose spread the Central
//! Limit Theorem predicts.
//!
//! Two execution schemes are available:
//! - [`ExecutionMode::Sequential`]: every trial consumes the next draws of the
//!   one shared [`RandomSource`].
//! - [`ExecutionMode::Parallel`]: trial `i` consumes its own stream
//!   `source.fork(i)` and trials run on the rayon pool. Results are collected
//!   in trial order, so a fixed seed reproduces the same distribution for any
//!   thread count. The two schemes produce different (equally valid) streams.

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, Result};
use crate::histogram::Histogram;
use crate::metrics::SamplingMetrics;
use crate::random::RandomSource;
use crate::sampler::Sampler;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    #[default]
    Sequential,
    Parallel,
}

/// Trial means collected over a run, in trial order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeanDistribution {
    values: Vec<f64>,
}

impl MeanDistribution {
    #[must_use]
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    fn sum_sq_dev(&self) -> f64 {
        let mean = self.mean();
        self.values.iter().map(|v| (v - mean).powi(2)).sum()
    }

    /// Population variance (divides by `n`)
    #[must_use]
    pub fn variance(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.sum_sq_dev() / self.values.len() as f64
    }

    /// Population standard deviation, the figure reported against the
    /// predicted standard deviation of a trial mean
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Unbiased sample variance (divides by `n - 1`)
    #[must_use]
    pub fn sample_variance(&self) -> f64 {
        if self.values.len() < 2 {
            return 0.0;
        }
        self.sum_sq_dev() / (self.values.len() - 1) as f64
    }

    #[must_use]
    pub fn sample_std_dev(&self) -> f64 {
        self.sample_variance().sqrt()
    }

    /// Standard error of the distribution's mean
    #[must_use]
    pub fn standard_error(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.std_dev() / (self.values.len() as f64).sqrt()
    }

    #[must_use]
    pub fn min(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }

    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    /// Bin the trial means into `bins` equal-width bins over `[lo, hi)`
    #[must_use]
    pub fn histogram(&self, bins: usize, lo: f64, hi: f64) -> Option<Histogram> {
        let mut histogram = Histogram::new(bins, lo, hi)?;
        for &value in &self.values {
            histogram.fill(value);
        }
        Some(histogram)
    }
}

/// Output of [`TrialAggregator::run`]
#[derive(Debug, Clone)]
pub struct TrialRun {
    pub means: MeanDistribution,
    pub metrics: SamplingMetrics,
}

/// Runs `num_means` trials of `num_iterations` samples each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialAggregator {
    pub num_iterations: usize,
    pub num_means: usize,
}

impl TrialAggregator {
    #[must_use]
    pub fn new(num_iterations: usize, num_means: usize) -> Self {
        Self {
            num_iterations,
            num_means,
        }
    }

    pub fn run(
        &self,
        sampler: &Sampler,
        source: &mut RandomSource,
        mode: ExecutionMode,
    ) -> Result<TrialRun> {
        let run = match mode {
            ExecutionMode::Sequential => self.run_sequential(sampler, source)?,
            ExecutionMode::Parallel => self.run_parallel(sampler, source)?,
        };

        if run.metrics.clamped() > 0 {
            warn!(
                clamped_below = run.metrics.clamped_below,
                clamped_above = run.metrics.clamped_above,
                samples = run.metrics.samples,
                "uniform draws fell outside the CDF range and were clamped"
            );
        }
        debug!(
            trials = run.means.len(),
            mean = run.means.mean(),
            std_dev = run.means.std_dev(),
            "trials complete"
        );

        Ok(run)
    }

    /// A trial needs at least one sample and a run at least one trial
    fn check(&self) -> Result<()> {
        if self.num_iterations == 0 {
            return Err(ConfigError::ZeroIterations.into());
        }
        if self.num_means == 0 {
            return Err(ConfigError::ZeroMeans.into());
        }
        Ok(())
    }

    /// All trials draw from `source` in order
    pub fn run_sequential(&self, sampler: &Sampler, source: &mut RandomSource) -> Result<TrialRun> {
        self.check()?;
        let mut metrics = SamplingMetrics::new();
        let mut values = Vec::with_capacity(self.num_means);

        for _ in 0..self.num_means {
            values.push(run_trial(sampler, source, self.num_iterations, &mut metrics)?);
        }

        Ok(TrialRun {
            means: MeanDistribution::from_values(values),
            metrics,
        })
    }

    /// Trial `i` draws from `source.fork(i)`; `source` itself is not advanced
    #[cfg(feature = "parallel")]
    pub fn run_parallel(&self, sampler: &Sampler, source: &mut RandomSource) -> Result<TrialRun> {
        self.check()?;
        let num_iterations = self.num_iterations;
        let source = &*source;

        let trials = (0..self.num_means)
            .into_par_iter()
            .map(|i| -> Result<(f64, SamplingMetrics)> {
                let mut stream = source.fork(i as u64);
                let mut metrics = SamplingMetrics::new();
                let mean = run_trial(sampler, &mut stream, num_iterations, &mut metrics)?;
                Ok((mean, metrics))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut metrics = SamplingMetrics::new();
        let mut values = Vec::with_capacity(trials.len());
        for (mean, trial_metrics) in trials {
            metrics.merge(&trial_metrics);
            values.push(mean);
        }

        Ok(TrialRun {
            means: MeanDistribution::from_values(values),
            metrics,
        })
    }

    #[cfg(not(feature = "parallel"))]
    pub fn run_parallel(&self, sampler: &Sampler, source: &mut RandomSource) -> Result<TrialRun> {
        warn!("built without the `parallel` feature; running trials sequentially");
        self.run_sequential(sampler, source)
    }
}

/// Draw one trial and return its mean. The sample buffer lives only for the
/// duration of the call.
fn run_trial(
    sampler: &Sampler,
    source: &mut RandomSource,
    num_iterations: usize,
    metrics: &mut SamplingMetrics,
) -> Result<f64> {
    let mut trial = Vec::with_capacity(num_iterations);
    for _ in 0..num_iterations {
        let located = sampler.draw(source)?;
        metrics.record_sample(&located);
        trial.push(located.x);
    }
    metrics.record_trial();

    Ok(trial.iter().sum::<f64>() / trial.len() as f64)
}
