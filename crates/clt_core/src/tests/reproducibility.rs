//! Reproducibility of seeded runs
//!
//! These tests verify that:
//! - Identical configurations produce identical mean distributions
//! - Changing the seed changes the draws
//! - Linear and binary bracket search give the same run
//! - Parallel runs are reproducible regardless of scheduling

use crate::config::SimulationBuilder;
use crate::density::DensityPreset;
use crate::sampler::SearchStrategy;
use crate::simulation::simulate;

#[test]
fn test_fixed_seed_reproduces_run() {
    let config = SimulationBuilder::new()
        .iterations(20)
        .means(500)
        .seed(1234)
        .build()
        .unwrap();

    let first = simulate(DensityPreset::Lopsided, &config).unwrap();
    let second = simulate(DensityPreset::Lopsided, &config).unwrap();
    assert_eq!(first.means, second.means);
    assert_eq!(first.histogram, second.histogram);
    assert_eq!(first.metrics, second.metrics);
}

#[test]
fn test_different_seed_changes_run() {
    let base = SimulationBuilder::new().iterations(20).means(500);
    let a = simulate(DensityPreset::Normal, &base.clone().seed(1).build().unwrap()).unwrap();
    let b = simulate(DensityPreset::Normal, &base.seed(2).build().unwrap()).unwrap();
    assert_ne!(a.means, b.means);
}

#[test]
fn test_search_strategy_does_not_change_results() {
    let base = SimulationBuilder::new().numpoints(400).iterations(20).means(300);
    let linear = simulate(
        DensityPreset::Bimodal,
        &base.clone().search(SearchStrategy::Linear).build().unwrap(),
    )
    .unwrap();
    let binary = simulate(
        DensityPreset::Bimodal,
        &base.search(SearchStrategy::Binary).build().unwrap(),
    )
    .unwrap();
    assert_eq!(linear.means, binary.means);
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_runs_are_reproducible() {
    let config = SimulationBuilder::new()
        .iterations(25)
        .means(2_000)
        .seed(4321)
        .parallel()
        .build()
        .unwrap();

    let first = simulate(DensityPreset::Step, &config).unwrap();
    let second = simulate(DensityPreset::Step, &config).unwrap();
    assert_eq!(first.means, second.means);
    assert_eq!(first.metrics.samples, 50_000);
    assert_eq!(first.metrics.trials, 2_000);

    // Still a valid CLT run
    assert!((first.comparison.std_dev_ratio() - 1.0).abs() < 0.1);
}
