//! Probability density functions
//!
//! A density is any non-negative function over a closed interval. The
//! pipeline is generic over the [`Density`] trait so arbitrary callables can be
//! injected; [`DensityPreset`] bundles a handful of ready-made shapes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Closed interval `[xmin, xmax]` that supports a density
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub xmin: f64,
    pub xmax: f64,
}

impl Domain {
    pub fn new(xmin: f64, xmax: f64) -> Result<Self, ConfigError> {
        if !xmin.is_finite() || !xmax.is_finite() || xmin >= xmax {
            return Err(ConfigError::InvalidDomain { xmin, xmax });
        }
        Ok(Self { xmin, xmax })
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.xmin && x <= self.xmax
    }

    /// `n + 1` evenly spaced points from `xmin` to `xmax` inclusive
    pub fn grid(&self, n: usize) -> impl Iterator<Item = f64> + '_ {
        let step = self.width() / n as f64;
        (0..=n).map(move |i| {
            if i == n {
                self.xmax
            } else {
                self.xmin + i as f64 * step
            }
        })
    }
}

/// A (possibly unnormalized) density strategy
pub trait Density: Send + Sync {
    fn eval(&self, x: f64) -> f64;

    /// Human readable name used in logs and reports
    fn label(&self) -> String {
        "custom".to_string()
    }
}

impl<F> Density for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    #[inline]
    fn eval(&self, x: f64) -> f64 {
        self(x)
    }
}

/// Built-in example densities
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DensityPreset {
    /// Gaussian bump centred at 5 with standard deviation 2
    Normal,
    /// `sin(x) + 10`
    Bimodal,
    /// `x^2`
    Parabolic,
    Uniform,
    /// Indicator of `[1, 5)`
    Step,
    /// Skewed shape whose most probable value differs from its mean
    #[default]
    Lopsided,
}

impl DensityPreset {
    pub const ALL: [DensityPreset; 6] = [
        DensityPreset::Normal,
        DensityPreset::Bimodal,
        DensityPreset::Parabolic,
        DensityPreset::Uniform,
        DensityPreset::Step,
        DensityPreset::Lopsided,
    ];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DensityPreset::Normal => "normal",
            DensityPreset::Bimodal => "bimodal",
            DensityPreset::Parabolic => "parabolic",
            DensityPreset::Uniform => "uniform",
            DensityPreset::Step => "step",
            DensityPreset::Lopsided => "lopsided",
        }
    }
}

impl Density for DensityPreset {
    fn eval(&self, x: f64) -> f64 {
        match self {
            DensityPreset::Normal => (-(x - 5.0) * (x - 5.0) / 8.0).exp(),
            DensityPreset::Bimodal => x.sin() + 10.0,
            DensityPreset::Parabolic => x * x,
            DensityPreset::Uniform => 1.0,
            DensityPreset::Step => {
                if (1.0..5.0).contains(&x) {
                    1.0
                } else {
                    0.0
                }
            }
            DensityPreset::Lopsided => x.exp() * (-(x - 3.0) * (x - 3.0) / 10.0).exp(),
        }
    }

    fn label(&self) -> String {
        self.name().to_string()
    }
}

impl fmt::Display for DensityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DensityPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        DensityPreset::ALL
            .into_iter()
            .find(|preset| preset.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = DensityPreset::ALL.iter().map(|p| p.name()).collect();
                format!("unknown density '{s}' (expected one of: {})", names.join(", "))
            })
    }
}

/// A validated density rescaled to integrate to one over its domain
///
/// Built by [`crate::normalize::normalize`]; evaluates to zero outside the
/// domain.
#[derive(Clone)]
pub struct ProbabilityDensity<D> {
    raw: D,
    domain: Domain,
    scale: f64,
}

impl<D: Density> fmt::Debug for ProbabilityDensity<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbabilityDensity")
            .field("label", &self.raw.label())
            .field("domain", &self.domain)
            .field("scale", &self.scale)
            .finish()
    }
}

impl<D: Density> ProbabilityDensity<D> {
    pub(crate) fn new(raw: D, domain: Domain, scale: f64) -> Self {
        Self { raw, domain, scale }
    }

    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        if self.domain.contains(x) {
            self.scale * self.raw.eval(x)
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Normalization constant applied to the raw density
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn raw(&self) -> &D {
        &self.raw
    }

    pub fn label(&self) -> String {
        self.raw.label()
    }

    /// Evaluate on `n + 1` evenly spaced points for plotting
    pub fn tabulate(&self, n: usize) -> Vec<(f64, f64)> {
        self.domain.grid(n).map(|x| (x, self.eval(x))).collect()
    }
}
