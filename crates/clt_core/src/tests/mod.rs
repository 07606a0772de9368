//! Integration tests for the CLT simulation pipeline
//!
//! Tests are organized by topic:
//! - `scenarios` - Reference runs with known analytic answers
//! - `convergence` - Law of large numbers and CLT behaviour
//! - `reproducibility` - Seeded runs and execution modes

mod convergence;
mod reproducibility;
mod scenarios;
