//! Simulation configuration
//!
//! The main configuration type is `SimulationConfig`, which holds everything a
//! run needs apart from the density itself. Every field has a default, so a
//! partial YAML or JSON document deserializes into a complete configuration.
//!
//! # Builder DSL
//!
//! ```ignore
//! use clt_core::config::SimulationBuilder;
//!
//! let config = SimulationBuilder::new()
//!     .domain(0.0, 10.0)
//!     .numpoints(1000)
//!     .iterations(100)
//!     .means(10_000)
//!     .seed(1234)
//!     .build()?;
//! ```

use serde::{Deserialize, Serialize};

use crate::density::Domain;
use crate::error::ConfigError;
use crate::integrate::IntegrationConfig;
use crate::sampler::{BoundaryPolicy, SearchStrategy};
use crate::trials::ExecutionMode;

pub mod builder;

pub use builder::SimulationBuilder;

fn default_xmin() -> f64 {
    0.0
}

fn default_xmax() -> f64 {
    10.0
}

fn default_numpoints() -> usize {
    1000
}

fn default_num_iterations() -> usize {
    100
}

fn default_num_means() -> usize {
    10_000
}

fn default_seed() -> u64 {
    1234
}

/// Complete simulation configuration
///
/// # Conceptual Organization
///
/// **Domain and resolution**: `xmin`, `xmax`, `numpoints`, `probe_points`
///
/// **Experiment size**: `num_iterations` samples per trial, `num_means` trials
///
/// **Reproducibility and execution**: `seed`, `execution`
///
/// **Numerics**: `integration`, `boundary`, `search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Lower bound of the density's support
    #[serde(default = "default_xmin")]
    pub xmin: f64,

    /// Upper bound of the density's support
    #[serde(default = "default_xmax")]
    pub xmax: f64,

    /// Number of cells in the discrete CDF
    #[serde(default = "default_numpoints")]
    pub numpoints: usize,

    /// Samples averaged in each trial
    #[serde(default = "default_num_iterations")]
    pub num_iterations: usize,

    /// Trials collected into the mean distribution
    #[serde(default = "default_num_means")]
    pub num_means: usize,

    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Points probed for negative density values (default: `numpoints`)
    #[serde(default)]
    pub probe_points: Option<usize>,

    /// Bins of the trial-mean histogram over the domain (default: `numpoints`)
    #[serde(default)]
    pub histogram_bins: Option<usize>,

    #[serde(default)]
    pub boundary: BoundaryPolicy,

    #[serde(default)]
    pub search: SearchStrategy,

    #[serde(default)]
    pub execution: ExecutionMode,

    #[serde(default)]
    pub integration: IntegrationConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            xmin: default_xmin(),
            xmax: default_xmax(),
            numpoints: default_numpoints(),
            num_iterations: default_num_iterations(),
            num_means: default_num_means(),
            seed: default_seed(),
            probe_points: None,
            histogram_bins: None,
            boundary: BoundaryPolicy::default(),
            search: SearchStrategy::default(),
            execution: ExecutionMode::default(),
            integration: IntegrationConfig::default(),
        }
    }
}

impl SimulationConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every option before any computation runs
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.domain()?;
        if self.numpoints < 2 {
            return Err(ConfigError::TooFewPoints(self.numpoints));
        }
        if self.num_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.num_means == 0 {
            return Err(ConfigError::ZeroMeans);
        }
        if self.probe_points == Some(0) {
            return Err(ConfigError::ZeroProbePoints);
        }
        if self.histogram_bins == Some(0) {
            return Err(ConfigError::ZeroHistogramBins);
        }
        self.integration.validate()
    }

    pub fn domain(&self) -> Result<Domain, ConfigError> {
        Domain::new(self.xmin, self.xmax)
    }

    #[must_use]
    pub fn probe_points(&self) -> usize {
        self.probe_points.unwrap_or(self.numpoints)
    }

    #[must_use]
    pub fn histogram_bins(&self) -> usize {
        self.histogram_bins.unwrap_or(self.numpoints)
    }

    /// Total number of samples a run draws
    #[must_use]
    pub fn total_samples(&self) -> usize {
        self.num_iterations.saturating_mul(self.num_means)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_run() {
        let config = SimulationConfig::default();
        assert_eq!(config.xmin, 0.0);
        assert_eq!(config.xmax, 10.0);
        assert_eq!(config.numpoints, 1000);
        assert_eq!(config.num_iterations, 100);
        assert_eq!(config.num_means, 10_000);
        assert_eq!(config.seed, 1234);
        assert_eq!(config.probe_points(), 1000);
        assert_eq!(config.histogram_bins(), 1000);
        assert_eq!(config.total_samples(), 1_000_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_errors() {
        let cases = [
            (
                SimulationConfig {
                    xmin: 3.0,
                    xmax: 1.0,
                    ..Default::default()
                },
                ConfigError::InvalidDomain {
                    xmin: 3.0,
                    xmax: 1.0,
                },
            ),
            (
                SimulationConfig {
                    numpoints: 1,
                    ..Default::default()
                },
                ConfigError::TooFewPoints(1),
            ),
            (
                SimulationConfig {
                    num_iterations: 0,
                    ..Default::default()
                },
                ConfigError::ZeroIterations,
            ),
            (
                SimulationConfig {
                    num_means: 0,
                    ..Default::default()
                },
                ConfigError::ZeroMeans,
            ),
            (
                SimulationConfig {
                    probe_points: Some(0),
                    ..Default::default()
                },
                ConfigError::ZeroProbePoints,
            ),
            (
                SimulationConfig {
                    histogram_bins: Some(0),
                    ..Default::default()
                },
                ConfigError::ZeroHistogramBins,
            ),
        ];

        for (config, expected) in cases {
            assert_eq!(config.validate(), Err(expected));
        }
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{ "xmax": 4.0, "seed": 9, "search": "linear" }"#).unwrap();
        assert_eq!(config.xmax, 4.0);
        assert_eq!(config.seed, 9);
        assert_eq!(config.search, SearchStrategy::Linear);
        assert_eq!(config.numpoints, 1000);
        assert_eq!(config.boundary, BoundaryPolicy::Clamp);
        assert_eq!(config.integration, IntegrationConfig::default());
    }
}
