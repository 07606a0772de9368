//! Convergence behaviour
//!
//! These tests verify that:
//! - One long trial's mean lands on the predicted mean (law of large numbers)
//! - The spread of trial means matches sigma / sqrt(n) for a skewed density
//! - Means of a flat, discontinuous density are close to normally distributed

use crate::cdf::DiscreteCdf;
use crate::config::SimulationBuilder;
use crate::density::{DensityPreset, Domain};
use crate::integrate::IntegrationConfig;
use crate::moments::predict;
use crate::normalize::normalize;
use crate::random::RandomSource;
use crate::sampler::Sampler;
use crate::simulation::simulate;
use crate::trials::{ExecutionMode, TrialAggregator};

#[test]
fn test_single_long_trial_converges_to_predicted_mean() {
    let integration = IntegrationConfig::default();
    let pdf = normalize(
        DensityPreset::Lopsided,
        Domain::new(0.0, 10.0).unwrap(),
        1000,
        &integration,
    )
    .unwrap();
    let num_iterations = 200_000;
    let prediction = predict(&pdf, num_iterations, &integration).unwrap();
    let sampler = Sampler::new(DiscreteCdf::build(&pdf, 1000).unwrap());

    let run = TrialAggregator::new(num_iterations, 1)
        .run(
            &sampler,
            &mut RandomSource::from_seed(2024),
            ExecutionMode::Sequential,
        )
        .unwrap();
    let observed = run.means.values()[0];

    let allowed = 5.0 * prediction.std_dev_of_mean + 2.0 * sampler.cdf().step();
    assert!(
        (observed - prediction.mean).abs() < allowed,
        "trial mean {observed} vs predicted {} (allowed {allowed})",
        prediction.mean
    );
}

#[test]
fn test_spread_of_means_matches_clt_for_skewed_density() {
    let config = SimulationBuilder::new()
        .iterations(50)
        .means(20_000)
        .seed(31)
        .build()
        .unwrap();
    let result = simulate(DensityPreset::Lopsided, &config).unwrap();

    let ratio = result.comparison.std_dev_ratio();
    assert!(
        (ratio - 1.0).abs() < 0.04,
        "experimental/predicted stdev ratio {ratio}"
    );
}

#[test]
fn test_spread_of_means_matches_clt_for_bimodal_density() {
    let config = SimulationBuilder::new()
        .iterations(30)
        .means(40_000)
        .seed(8)
        .build()
        .unwrap();
    let result = simulate(DensityPreset::Bimodal, &config).unwrap();

    // With 40k trials the sampling error of the stdev is well under 1%
    let error = (result.comparison.std_dev_ratio() - 1.0).abs();
    assert!(error < 0.03, "ratio error {error}");
}

#[test]
fn test_means_of_step_density_look_normal() {
    let config = SimulationBuilder::new()
        .iterations(40)
        .means(20_000)
        .seed(99)
        .build()
        .unwrap();
    let result = simulate(DensityPreset::Step, &config).unwrap();

    let mean = result.means.mean();
    let std_dev = result.means.std_dev();
    let within = |k: f64| {
        result
            .means
            .values()
            .iter()
            .filter(|v| (*v - mean).abs() <= k * std_dev)
            .count() as f64
            / result.means.len() as f64
    };

    // Normal coverage: 68.3% within one sigma, 95.4% within two
    assert!((within(1.0) - 0.683).abs() < 0.02, "1 sigma: {}", within(1.0));
    assert!((within(2.0) - 0.954).abs() < 0.01, "2 sigma: {}", within(2.0));
}
