//! Inverse-transform sampling over a discrete CDF
//!
//! A uniform draw `u` resolves to `x_k` for the first bracket `k` with
//! `y_k <= u <= y_{k+1}`. Draws outside `[y_0, y_{N-1}]` have no bracket;
//! [`BoundaryPolicy`] decides whether they are clamped to the nearest end or
//! reported as [`SimulationError::SampleOutOfBracket`].

use serde::{Deserialize, Serialize};

use crate::cdf::DiscreteCdf;
use crate::error::{Result, SimulationError};
use crate::random::RandomSource;

/// What to do with a draw outside the CDF's range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Clamp into `[y_0, y_{N-1}]` and search as usual
    #[default]
    Clamp,
    /// Fail with `SampleOutOfBracket`
    Reject,
}

/// How the bracket is located
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    /// O(N) scan over consecutive pairs
    Linear,
    /// O(log N) search over the monotone y values
    #[default]
    Binary,
}

/// Which end of the CDF a clamped draw was moved to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Boundary {
    Below,
    Above,
}

/// A resolved draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Located {
    /// Bracket index `k`
    pub index: usize,
    /// Sampled value `x_k`
    pub x: f64,
    pub clamped: Option<Boundary>,
}

/// Owns a [`DiscreteCdf`] and maps uniform draws onto its x values
#[derive(Debug, Clone)]
pub struct Sampler {
    cdf: DiscreteCdf,
    policy: BoundaryPolicy,
    search: SearchStrategy,
}

impl Sampler {
    #[must_use]
    pub fn new(cdf: DiscreteCdf) -> Self {
        Self {
            cdf,
            policy: BoundaryPolicy::default(),
            search: SearchStrategy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: SearchStrategy) -> Self {
        self.search = search;
        self
    }

    pub fn cdf(&self) -> &DiscreteCdf {
        &self.cdf
    }

    #[must_use]
    pub fn into_cdf(self) -> DiscreteCdf {
        self.cdf
    }

    #[must_use]
    pub fn policy(&self) -> BoundaryPolicy {
        self.policy
    }

    #[must_use]
    pub fn search(&self) -> SearchStrategy {
        self.search
    }

    /// Resolve `u` to a bracket of the CDF
    pub fn locate(&self, u: f64) -> Result<Located> {
        let ys = self.cdf.ys();
        let lower = ys[0];
        let upper = ys[ys.len() - 1];

        let (target, clamped) = if u.is_nan() {
            return Err(SimulationError::SampleOutOfBracket { u, lower, upper });
        } else if u < lower {
            (lower, Some(Boundary::Below))
        } else if u > upper {
            (upper, Some(Boundary::Above))
        } else {
            (u, None)
        };

        if clamped.is_some() && self.policy == BoundaryPolicy::Reject {
            return Err(SimulationError::SampleOutOfBracket { u, lower, upper });
        }

        let index = match self.search {
            SearchStrategy::Linear => linear_bracket(ys, target),
            SearchStrategy::Binary => binary_bracket(ys, target),
        };

        Ok(Located {
            index,
            x: self.cdf.xs()[index],
            clamped,
        })
    }

    /// Map a uniform draw to a sampled value
    pub fn sample(&self, u: f64) -> Result<f64> {
        self.locate(u).map(|located| located.x)
    }

    /// Draw from `source` and resolve it
    pub fn draw(&self, source: &mut RandomSource) -> Result<Located> {
        self.locate(source.uniform())
    }
}

/// First `k` with `ys[k] <= t <= ys[k + 1]`; `t` must lie in `[ys[0], ys[N-1]]`
fn linear_bracket(ys: &[f64], t: f64) -> usize {
    ys.windows(2)
        .position(|pair| pair[0] <= t && t <= pair[1])
        .unwrap_or(ys.len() - 2)
}

/// Same result as [`linear_bracket`]: the first `k` whose upper edge reaches `t`
fn binary_bracket(ys: &[f64], t: f64) -> usize {
    ys[1..].partition_point(|&y| y < t)
}
