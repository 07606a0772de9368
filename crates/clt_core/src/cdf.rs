//! Discrete cumulative distribution function
//!
//! The CDF is approximated by a left Riemann sum over a fixed partition of the
//! domain. The last point lands within O(step) of one.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::density::{Density, ProbabilityDensity};
use crate::error::{ConfigError, Result};

/// Monotone sequence of `(x, y)` points approximating a CDF
///
/// Deserialized values go through [`DiscreteCdf::from_parts`], so every
/// instance has at least two points with increasing `x` and non-decreasing `y`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CdfParts")]
pub struct DiscreteCdf {
    xs: Vec<f64>,
    ys: Vec<f64>,
    step: f64,
}

#[derive(Deserialize)]
struct CdfParts {
    xs: Vec<f64>,
    ys: Vec<f64>,
    step: f64,
}

impl TryFrom<CdfParts> for DiscreteCdf {
    type Error = ConfigError;

    fn try_from(parts: CdfParts) -> std::result::Result<Self, ConfigError> {
        Self::from_parts(parts.xs, parts.ys, parts.step)
    }
}

impl DiscreteCdf {
    /// Assemble a CDF from precomputed points, checking its shape
    pub fn from_parts(
        xs: Vec<f64>,
        ys: Vec<f64>,
        step: f64,
    ) -> std::result::Result<Self, ConfigError> {
        if xs.len() < 2 {
            return Err(ConfigError::TooFewPoints(xs.len()));
        }
        if xs.len() != ys.len() {
            return Err(ConfigError::InvalidCdf("xs and ys differ in length"));
        }
        if !(step.is_finite() && step > 0.0) {
            return Err(ConfigError::InvalidCdf("step must be positive"));
        }
        if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
            return Err(ConfigError::InvalidCdf("points must be finite"));
        }
        if xs.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::InvalidCdf("x must be strictly increasing"));
        }
        if ys.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(ConfigError::InvalidCdf("y must be non-decreasing"));
        }
        Ok(Self { xs, ys, step })
    }

    /// Accumulate `density` over `numpoints` cells of equal width.
    ///
    /// Cell `i` starts at `x_i = xmin + i * step` and `y_i` is the area of
    /// cells `0..=i` measured with each cell's left edge.
    pub fn build<D: Density>(density: &ProbabilityDensity<D>, numpoints: usize) -> Result<Self> {
        if numpoints < 2 {
            return Err(ConfigError::TooFewPoints(numpoints).into());
        }

        let domain = density.domain();
        let step = domain.width() / numpoints as f64;
        let mut xs = Vec::with_capacity(numpoints);
        let mut ys = Vec::with_capacity(numpoints);

        let mut area = 0.0;
        for i in 0..numpoints {
            let x = domain.xmin + i as f64 * step;
            area += density.eval(x) * step;
            xs.push(x);
            ys.push(area);
        }

        debug!(numpoints, step, total = area, "built discrete CDF");

        Ok(Self { xs, ys, step })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    #[must_use]
    pub fn first(&self) -> (f64, f64) {
        (self.xs[0], self.ys[0])
    }

    #[must_use]
    pub fn last(&self) -> (f64, f64) {
        let last = self.len() - 1;
        (self.xs[last], self.ys[last])
    }

    /// `(x, y)` pairs in order
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }

    /// `(y, x)` pairs, i.e. the inverse CDF as a curve
    pub fn inverse_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.ys.iter().copied().zip(self.xs.iter().copied())
    }
}
