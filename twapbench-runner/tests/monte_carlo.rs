//! Monte Carlo repetition: distribution summaries and seed behaviour.

use proptest::prelude::*;
use twapbench_runner::{load_samples, run_monte_carlo, BacktestConfig, MetricDistribution};

fn config_with(iterations: usize) -> BacktestConfig {
    let mut config = BacktestConfig::default();
    config.monte_carlo.iterations = iterations;
    config
}

proptest! {
    #[test]
    fn distribution_quantiles_are_ordered(
        values in prop::collection::vec(-1_000.0f64..1_000.0, 1..200)
    ) {
        let d = MetricDistribution::from_values(&values).unwrap();
        prop_assert!(d.min <= d.p05);
        prop_assert!(d.p05 <= d.median);
        prop_assert!(d.median <= d.p95);
        prop_assert!(d.p95 <= d.max);
        prop_assert!(d.min <= d.mean && d.mean <= d.max);
        prop_assert!(d.std_dev >= 0.0);
    }
}

#[test]
fn zero_noise_collapses_the_distribution() {
    let mut config = config_with(16);
    config.execution.noise_std = 0.0;
    let samples = load_samples(&config).unwrap();
    let mc = run_monte_carlo(&samples, &config).unwrap();

    assert_eq!(mc.slippage.max, 0.0);
    assert_eq!(mc.slippage.min, 0.0);
    assert_eq!(mc.execution_cost.std_dev, 0.0);
    assert!(mc
        .samples
        .iter()
        .all(|s| s.avg_executed_price == mc.avg_expected_price));
}

#[test]
fn iteration_seeds_are_distinct() {
    let config = config_with(50);
    let samples = load_samples(&config).unwrap();
    let mc = run_monte_carlo(&samples, &config).unwrap();

    let mut seeds: Vec<u64> = mc.samples.iter().map(|s| s.seed).collect();
    seeds.sort_unstable();
    seeds.dedup();
    assert_eq!(seeds.len(), 50);
    assert!(mc.samples.iter().enumerate().all(|(i, s)| s.iteration == i as u64));
}

#[test]
fn master_seed_changes_every_iteration() {
    let samples = load_samples(&config_with(10)).unwrap();
    let a = run_monte_carlo(&samples, &config_with(10)).unwrap();
    let mut other = config_with(10);
    other.execution.seed = 7;
    let b = run_monte_carlo(&samples, &other).unwrap();

    assert_eq!(a.benchmark_vwap, b.benchmark_vwap);
    assert!(a
        .samples
        .iter()
        .zip(&b.samples)
        .all(|(x, y)| x.slippage != y.slippage));
}

#[test]
fn custom_benchmark_window_is_fixed_across_iterations() {
    let mut config = config_with(8);
    config.benchmark.start_idx = Some(0);
    config.benchmark.end_idx = Some(29);
    let samples = load_samples(&config).unwrap();
    let mc = run_monte_carlo(&samples, &config).unwrap();

    let expected = twapbench_core::compute_vwap(&samples[..30]).unwrap();
    assert_eq!(mc.benchmark_vwap, expected);
}
