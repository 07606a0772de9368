//! Run configuration for the command line
//!
//! A run is a density preset plus a [`SimulationConfig`]. Both can come from a
//! YAML file:
//!
//! ```yaml
//! density: bimodal
//! simulation:
//!   numpoints: 500
//!   num_iterations: 50
//!   num_means: 20000
//!   seed: 7
//!   execution: parallel
//! ```
//!
//! Command-line flags are applied on top with [`Overrides::apply`].

use std::fs;
use std::path::Path;

use clt_core::{BoundaryPolicy, DensityPreset, ExecutionMode, SearchStrategy, SimulationConfig};
use color_eyre::eyre::{WrapErr, eyre};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub density: DensityPreset,

    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl RunConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    /// Read and parse a YAML run file
    pub fn load(path: &Path) -> color_eyre::Result<Self> {
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .map_err(|e| eyre!("failed to parse config file {}: {e}", path.display()))?;
        tracing::debug!(path = %path.display(), density = %config.density, "loaded config file");
        Ok(config)
    }
}

/// Values given on the command line; `None` and `false` leave the file value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub density: Option<DensityPreset>,
    pub xmin: Option<f64>,
    pub xmax: Option<f64>,
    pub numpoints: Option<usize>,
    pub iterations: Option<usize>,
    pub means: Option<usize>,
    pub seed: Option<u64>,
    pub parallel: bool,
    pub linear_search: bool,
    pub reject_out_of_range: bool,
}

impl Overrides {
    pub fn apply(&self, run: &mut RunConfig) {
        let sim = &mut run.simulation;

        if let Some(density) = self.density {
            run.density = density;
        }
        if let Some(xmin) = self.xmin {
            sim.xmin = xmin;
        }
        if let Some(xmax) = self.xmax {
            sim.xmax = xmax;
        }
        if let Some(numpoints) = self.numpoints {
            sim.numpoints = numpoints;
        }
        if let Some(iterations) = self.iterations {
            sim.num_iterations = iterations;
        }
        if let Some(means) = self.means {
            sim.num_means = means;
        }
        if let Some(seed) = self.seed {
            sim.seed = seed;
        }
        if self.parallel {
            sim.execution = ExecutionMode::Parallel;
        }
        if self.linear_search {
            sim.search = SearchStrategy::Linear;
        }
        if self.reject_out_of_range {
            sim.boundary = BoundaryPolicy::Reject;
        }
    }
}
