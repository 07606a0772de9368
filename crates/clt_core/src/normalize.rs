//! Density validation and normalization

use tracing::debug;

use crate::density::{Density, Domain, ProbabilityDensity};
use crate::error::{Result, SimulationError};
use crate::integrate::{IntegrationConfig, integrate};

/// Evaluate `density` on `probe_points + 1` evenly spaced points and fail on
/// the first negative or non-finite value.
pub fn check_non_negative<D: Density>(
    density: &D,
    domain: Domain,
    probe_points: usize,
) -> Result<()> {
    for x in domain.grid(probe_points.max(1)) {
        let value = density.eval(x);
        if !value.is_finite() || value < 0.0 {
            return Err(SimulationError::InvalidDensity { x, value });
        }
    }
    Ok(())
}

/// Validate `density` and rescale it so it integrates to one over `domain`.
pub fn normalize<D: Density>(
    density: D,
    domain: Domain,
    probe_points: usize,
    integration: &IntegrationConfig,
) -> Result<ProbabilityDensity<D>> {
    check_non_negative(&density, domain, probe_points)?;

    let integral = integrate(|x| density.eval(x), domain, integration, "density")?;
    if integral.value <= 0.0 {
        return Err(SimulationError::InvalidDensity {
            x: domain.xmin,
            value: integral.value,
        });
    }

    let scale = 1.0 / integral.value;
    debug!(
        density = %density.label(),
        integral = integral.value,
        scale,
        evaluations = integral.evaluations,
        "normalized density"
    );

    Ok(ProbabilityDensity::new(density, domain, scale))
}
