//! Analytic moments of a density and the CLT prediction for trial means

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::density::{Density, ProbabilityDensity};
use crate::error::Result;
use crate::integrate::{IntegrationConfig, integrate};

/// Moments of a normalized density plus the predicted spread of the mean of
/// `num_iterations` independent samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentPrediction {
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub num_iterations: usize,
    /// `std_dev / sqrt(num_iterations)`
    pub std_dev_of_mean: f64,
}

/// Integrate `x p(x)` and `x^2 p(x)` over the density's domain.
///
/// Independent of any sampling run.
pub fn predict<D: Density>(
    density: &ProbabilityDensity<D>,
    num_iterations: usize,
    integration: &IntegrationConfig,
) -> Result<MomentPrediction> {
    let domain = density.domain();

    let mean = integrate(|x| x * density.eval(x), domain, integration, "first moment")?.value;
    let second = integrate(
        |x| x * x * density.eval(x),
        domain,
        integration,
        "second moment",
    )?
    .value;

    // Cancellation can leave a tiny negative variance for very narrow densities
    let variance = (second - mean * mean).max(0.0);
    let std_dev = variance.sqrt();
    let std_dev_of_mean = (variance / num_iterations as f64).sqrt();

    debug!(mean, variance, std_dev_of_mean, "predicted moments");

    Ok(MomentPrediction {
        mean,
        variance,
        std_dev,
        num_iterations,
        std_dev_of_mean,
    })
}
