//! Reference scenarios
//!
//! These tests verify that:
//! - A uniform density reproduces the textbook CLT prediction
//! - The moment predictor matches closed-form answers
//! - A density with a negative region is rejected before any sampling

use crate::config::{SimulationBuilder, SimulationConfig};
use crate::density::{DensityPreset, Domain};
use crate::error::SimulationError;
use crate::integrate::IntegrationConfig;
use crate::moments::predict;
use crate::normalize::normalize;
use crate::random::RandomSource;
use crate::simulation::{simulate, simulate_with_source};

/// Uniform on [0, 10] with the reference run size
#[test]
fn test_uniform_reference_run() {
    let config = SimulationBuilder::new()
        .domain(0.0, 10.0)
        .numpoints(1000)
        .iterations(100)
        .means(10_000)
        .seed(1234)
        .build()
        .unwrap();

    let result = simulate(DensityPreset::Uniform, &config).unwrap();
    let comparison = result.comparison;

    let expected_std = 10.0 / 12f64.sqrt() / 10.0;
    assert!((comparison.predicted_mean - 5.0).abs() < 1e-9);
    assert!((comparison.predicted_std_dev - expected_std).abs() < 1e-9);

    // Each sample is the left edge of the cell below the draw, which shifts
    // the experimental mean down by up to two cells.
    let standard_error = expected_std / (config.num_means as f64).sqrt();
    let allowed = 4.0 * standard_error + 2.0 * result.cdf.step();
    assert!(
        comparison.mean_error().abs() < allowed,
        "experimental mean {} too far from {}",
        comparison.experimental_mean,
        comparison.predicted_mean
    );

    assert!(
        (comparison.std_dev_ratio() - 1.0).abs() < 0.05,
        "experimental stdev {} vs predicted {}",
        comparison.experimental_std_dev,
        comparison.predicted_std_dev
    );

    assert_eq!(result.means.len(), 10_000);
    assert_eq!(result.metrics.samples, 1_000_000);
}

/// x^2 on [0, 10] has mean 7.5
#[test]
fn test_parabolic_predicted_mean() {
    let config = IntegrationConfig::default();
    let domain = Domain::new(0.0, 10.0).unwrap();
    let pdf = normalize(|x: f64| x * x, domain, 1000, &config).unwrap();
    let prediction = predict(&pdf, 100, &config).unwrap();

    assert!(
        (prediction.mean - 7.5).abs() < 1e-6,
        "predicted mean {}",
        prediction.mean
    );
    assert!((prediction.variance - 3.75).abs() < 1e-6);
}

/// A density dipping below zero never reaches the sampler
#[test]
fn test_negative_density_is_rejected_before_sampling() {
    let dipping = |x: f64| {
        if (2.0..3.0).contains(&x) {
            -1.0
        } else {
            1.0
        }
    };
    let config = SimulationConfig::default();
    let mut source = RandomSource::from_seed(config.seed);

    let err = simulate_with_source(dipping, &config, &mut source).unwrap_err();
    match err {
        SimulationError::InvalidDensity { x, value } => {
            assert!((2.0..3.0).contains(&x), "reported x = {x}");
            assert_eq!(value, -1.0);
        }
        other => panic!("expected InvalidDensity, got {other:?}"),
    }
    assert_eq!(source.draws(), 0);
}

/// Out-of-range draws are reported, not skipped, under the reject policy
#[test]
fn test_reject_policy_surfaces_out_of_bracket_draws() {
    // The left Riemann sum of an increasing density stops short of one, so
    // some draws in a long run land above the last CDF value.
    let config = SimulationBuilder::new()
        .numpoints(50)
        .iterations(100)
        .means(100)
        .boundary(crate::sampler::BoundaryPolicy::Reject)
        .build()
        .unwrap();

    let err = simulate(DensityPreset::Parabolic, &config).unwrap_err();
    assert!(matches!(err, SimulationError::SampleOutOfBracket { .. }));

    // The same run under the default policy clamps instead
    let clamped = SimulationConfig {
        boundary: crate::sampler::BoundaryPolicy::Clamp,
        ..config
    };
    let result = simulate(DensityPreset::Parabolic, &clamped).unwrap();
    assert!(result.metrics.clamped_above > 0);
    assert_eq!(result.metrics.samples, 10_000);
}

/// Every preset survives the full pipeline
#[test]
fn test_all_presets_run() {
    let config = SimulationBuilder::new()
        .numpoints(300)
        .iterations(20)
        .means(200)
        .build()
        .unwrap();

    for preset in DensityPreset::ALL {
        let result = simulate(preset, &config).unwrap();
        let comparison = result.comparison;
        assert!(comparison.experimental_mean.is_finite(), "{preset}");
        assert!(comparison.predicted_std_dev > 0.0, "{preset}");
        assert!(
            comparison.mean_error().abs() < 0.5,
            "{preset}: predicted {} observed {}",
            comparison.predicted_mean,
            comparison.experimental_mean
        );
    }
}
