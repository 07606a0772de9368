//! Numerical quadrature
//!
//! Composite Simpson's rule driven by successive trapezoid refinement: every
//! refinement halves the panel width, reuses all previous evaluations, and
//! stops once the Simpson estimate has agreed with its predecessor on two
//! refinements in a row. A single agreement is not enough: for integrands
//! with jumps the error can repeat exactly between two panel counts.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::density::Domain;
use crate::error::{ConfigError, Result, SimulationError};

fn default_tolerance() -> f64 {
    1e-6
}

fn default_initial_panels() -> usize {
    128
}

fn default_max_refinements() -> usize {
    20
}

/// Convergence settings for [`integrate`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntegrationConfig {
    /// Relative tolerance between consecutive Simpson estimates
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Panel count of the coarsest trapezoid pass
    #[serde(default = "default_initial_panels")]
    pub initial_panels: usize,
    /// Maximum number of panel doublings
    #[serde(default = "default_max_refinements")]
    pub max_refinements: usize,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            initial_panels: default_initial_panels(),
            max_refinements: default_max_refinements(),
        }
    }
}

impl IntegrationConfig {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(ConfigError::InvalidIntegration(
                "tolerance must be positive and finite",
            ));
        }
        if self.initial_panels == 0 {
            return Err(ConfigError::InvalidIntegration(
                "initial_panels must be positive",
            ));
        }
        // Convergence needs three Simpson estimates; the upper bound keeps the
        // panel count representable.
        if !(3..=30).contains(&self.max_refinements) {
            return Err(ConfigError::InvalidIntegration(
                "max_refinements must be between 3 and 30",
            ));
        }
        Ok(())
    }
}

/// Result of a converged quadrature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integral {
    pub value: f64,
    /// Difference between the last two Simpson estimates
    pub error_estimate: f64,
    /// Number of integrand evaluations spent
    pub evaluations: usize,
}

/// Integrate `f` over `domain`.
///
/// `quantity` names what is being integrated and only appears in the error
/// reported when the estimate fails to converge.
pub fn integrate<F>(
    f: F,
    domain: Domain,
    config: &IntegrationConfig,
    quantity: &'static str,
) -> Result<Integral>
where
    F: Fn(f64) -> f64,
{
    let a = domain.xmin;
    let width = domain.width();

    let mut panels = config.initial_panels;
    let h = width / panels as f64;
    let interior: f64 = (1..panels).map(|i| f(a + i as f64 * h)).sum();
    let mut trapezoid = h * (0.5 * f(a) + 0.5 * f(domain.xmax) + interior);
    let mut evaluations = panels + 1;

    let mut previous: Option<f64> = None;
    let mut agreements = 0;
    let mut estimate = f64::NAN;
    let mut error = f64::INFINITY;

    for refinement in 1..=config.max_refinements {
        let h_new = width / (2 * panels) as f64;
        let midpoints: f64 = (0..panels)
            .map(|i| f(a + (2 * i + 1) as f64 * h_new))
            .sum();
        evaluations += panels;

        let refined = 0.5 * trapezoid + h_new * midpoints;
        estimate = (4.0 * refined - trapezoid) / 3.0;

        if !estimate.is_finite() {
            return Err(SimulationError::IntegrationFailure {
                quantity,
                estimate,
                error,
                refinements: refinement,
            });
        }

        if let Some(prev) = previous {
            error = (estimate - prev).abs();
            if error > config.tolerance * estimate.abs().max(1.0) {
                agreements = 0;
            } else if agreements == 1 {
                trace!(quantity, refinement, estimate, error, "quadrature converged");
                return Ok(Integral {
                    value: estimate,
                    error_estimate: error,
                    evaluations,
                });
            } else {
                agreements = 1;
            }
        }

        previous = Some(estimate);
        trapezoid = refined;
        panels *= 2;
    }

    Err(SimulationError::IntegrationFailure {
        quantity,
        estimate,
        error,
        refinements: config.max_refinements,
    })
}
