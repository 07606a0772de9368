//! Simulation Builder
//!
//! Fluent construction of a [`SimulationConfig`], validated on `build`.
//!
//! # Example
//!
//! ```ignore
//! use clt_core::config::SimulationBuilder;
//!
//! let config = SimulationBuilder::new()
//!     .domain(0.0, 10.0)
//!     .iterations(100)
//!     .means(10_000)
//!     .seed(1234)
//!     .parallel()
//!     .build()?;
//! ```

use super::SimulationConfig;
use crate::error::ConfigError;
use crate::integrate::IntegrationConfig;
use crate::sampler::{BoundaryPolicy, SearchStrategy};
use crate::trials::ExecutionMode;

#[derive(Debug, Clone, Default)]
pub struct SimulationBuilder {
    config: SimulationConfig,
}

impl SimulationBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    #[must_use]
    pub fn from_config(config: SimulationConfig) -> Self {
        Self { config }
    }

    // =========================================================================
    // Domain and resolution
    // =========================================================================

    #[must_use]
    pub fn domain(mut self, xmin: f64, xmax: f64) -> Self {
        self.config.xmin = xmin;
        self.config.xmax = xmax;
        self
    }

    #[must_use]
    pub fn numpoints(mut self, numpoints: usize) -> Self {
        self.config.numpoints = numpoints;
        self
    }

    #[must_use]
    pub fn probe_points(mut self, probe_points: usize) -> Self {
        self.config.probe_points = Some(probe_points);
        self
    }

    #[must_use]
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.config.histogram_bins = Some(bins);
        self
    }

    // =========================================================================
    // Experiment size
    // =========================================================================

    /// Samples per trial
    #[must_use]
    pub fn iterations(mut self, num_iterations: usize) -> Self {
        self.config.num_iterations = num_iterations;
        self
    }

    /// Number of trials
    #[must_use]
    pub fn means(mut self, num_means: usize) -> Self {
        self.config.num_means = num_means;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    // =========================================================================
    // Execution and numerics
    // =========================================================================

    #[must_use]
    pub fn execution(mut self, execution: ExecutionMode) -> Self {
        self.config.execution = execution;
        self
    }

    /// Shorthand for `execution(ExecutionMode::Parallel)`
    #[must_use]
    pub fn parallel(self) -> Self {
        self.execution(ExecutionMode::Parallel)
    }

    #[must_use]
    pub fn boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.config.boundary = boundary;
        self
    }

    #[must_use]
    pub fn search(mut self, search: SearchStrategy) -> Self {
        self.config.search = search;
        self
    }

    #[must_use]
    pub fn integration(mut self, integration: IntegrationConfig) -> Self {
        self.config.integration = integration;
        self
    }

    #[must_use]
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.config.integration.tolerance = tolerance;
        self
    }

    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
