//! Central Limit Theorem simulation library
//!
//! This crate draws samples from an arbitrary non-negative density and shows
//! that the means of repeated trials approach a normal distribution. It
//! provides:
//! - Injectable density strategies with built-in presets
//! - Normalization with non-negativity validation
//! - A discrete CDF built from left Riemann sums
//! - Inverse-transform sampling with explicit out-of-range handling
//! - Sequential or parallel trial aggregation from a seeded random source
//! - Analytic moment prediction by numerical integration
//!
//! # Example
//!
//! ```ignore
//! use clt_core::{DensityPreset, SimulationBuilder, simulate};
//!
//! let config = SimulationBuilder::new()
//!     .domain(0.0, 10.0)
//!     .iterations(100)
//!     .means(10_000)
//!     .seed(1234)
//!     .build()?;
//!
//! let result = simulate(DensityPreset::Lopsided, &config)?;
//! println!(
//!     "predicted {:.4} ± {:.4}, observed {:.4} ± {:.4}",
//!     result.comparison.predicted_mean,
//!     result.comparison.predicted_std_dev,
//!     result.comparison.experimental_mean,
//!     result.comparison.experimental_std_dev,
//! );
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod cdf;
pub mod density;
pub mod error;
pub mod histogram;
pub mod integrate;
pub mod metrics;
pub mod moments;
pub mod normalize;
pub mod random;
pub mod sampler;
pub mod simulation;
pub mod trials;

// ============================================================================
// Configuration
// ============================================================================

pub mod config;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use cdf::DiscreteCdf;
pub use config::{SimulationBuilder, SimulationConfig};
pub use density::{Density, DensityPreset, Domain, ProbabilityDensity};
pub use error::{ConfigError, SimulationError};
pub use moments::MomentPrediction;
pub use random::RandomSource;
pub use sampler::{BoundaryPolicy, Sampler, SearchStrategy};
pub use simulation::{Comparison, SimulationResult, simulate, simulate_with_source};
pub use trials::{ExecutionMode, MeanDistribution, TrialAggregator};
