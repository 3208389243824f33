//! End-to-end reference scenario: 60 minute-spaced samples, a Gaussian
//! random walk from 100, volumes in [50, 200), 100 shares over the full
//! window with σ = 0.02 fill noise.
//!
//! Exact values depend on the RNG algorithm, so the run is verified
//! structurally plus bit-for-bit determinism.

use rand::rngs::StdRng;
use rand::SeedableRng;
use twapbench_core::data::{generate_samples, SyntheticConfig};
use twapbench_core::{
    compute_metrics, compute_vwap, compute_vwap_window, simulate_twap, ExecError,
    ExecutionWindow, FillNoise, MetricsResult, Sample,
};

fn reference_series() -> Vec<Sample> {
    generate_samples(&SyntheticConfig::default()).unwrap()
}

fn run(samples: &[Sample], noise: FillNoise, seed: u64) -> Result<MetricsResult, ExecError> {
    let vwap = compute_vwap(samples)?;
    let window = ExecutionWindow::full(samples.len())?;
    let mut rng = StdRng::seed_from_u64(seed);
    let fills = simulate_twap(samples, 100, window, &noise, &mut rng)?;
    compute_metrics(vwap, &fills)
}

#[test]
fn reference_scenario_is_structurally_sound() {
    let samples = reference_series();
    assert_eq!(samples.len(), 60);

    let m = run(&samples, FillNoise::default(), 42).unwrap();

    let lo = samples.iter().map(|s| s.price).fold(f64::INFINITY, f64::min);
    let hi = samples.iter().map(|s| s.price).fold(f64::NEG_INFINITY, f64::max);

    assert!(m.benchmark_vwap >= lo && m.benchmark_vwap <= hi);
    assert!(m.avg_expected_price >= lo && m.avg_expected_price <= hi);
    // the cost is bounded by the price range plus a few noise σ
    assert!(m.execution_cost.abs() <= (hi - lo) + 0.1);
    // mean of 60 N(0, 0.02) draws: σ ≈ 0.0026, so 0.02 is ~7.7σ
    assert!(m.slippage.abs() < 0.02);
    assert!((m.execution_cost - (m.avg_executed_price - m.benchmark_vwap)).abs() < 1e-12);
    assert!((m.slippage - (m.avg_executed_price - m.avg_expected_price)).abs() < 1e-12);
}

#[test]
fn reference_scenario_is_reproducible() {
    let samples = reference_series();
    let a = run(&samples, FillNoise::default(), 42).unwrap();
    let b = run(&samples, FillNoise::default(), 42).unwrap();
    assert_eq!(a.benchmark_vwap.to_bits(), b.benchmark_vwap.to_bits());
    assert_eq!(a.avg_executed_price.to_bits(), b.avg_executed_price.to_bits());
    assert_eq!(a.execution_cost.to_bits(), b.execution_cost.to_bits());
    assert_eq!(a.slippage.to_bits(), b.slippage.to_bits());

    let c = run(&samples, FillNoise::default(), 7).unwrap();
    assert_ne!(a.avg_executed_price.to_bits(), c.avg_executed_price.to_bits());
    // the benchmark does not depend on the fill seed
    assert_eq!(a.benchmark_vwap.to_bits(), c.benchmark_vwap.to_bits());
}

#[test]
fn full_window_expected_price_is_arithmetic_mean_not_vwap() {
    let samples = reference_series();
    let m = run(&samples, FillNoise::default(), 42).unwrap();

    let arithmetic = samples.iter().map(|s| s.price).sum::<f64>() / samples.len() as f64;
    assert!((m.avg_expected_price - arithmetic).abs() < 1e-12);

    // volumes are non-uniform, so the volume-weighted benchmark differs
    let volumes_vary = samples.windows(2).any(|w| w[0].volume != w[1].volume);
    assert!(volumes_vary);
    assert_ne!(m.avg_expected_price, m.benchmark_vwap);
}

#[test]
fn zero_noise_scenario_has_zero_slippage() {
    let m = run(&reference_series(), FillNoise::none(), 42).unwrap();
    assert_eq!(m.slippage, 0.0);
    assert_eq!(m.avg_executed_price, m.avg_expected_price);
}

#[test]
fn sub_window_execution_with_full_series_benchmark() {
    let samples = reference_series();
    let full_vwap = compute_vwap(&samples).unwrap();
    let window = ExecutionWindow::new(10, 29);

    let mut rng = StdRng::seed_from_u64(42);
    let fills = simulate_twap(&samples, 100, window, &FillNoise::default(), &mut rng).unwrap();
    assert_eq!(fills.len(), 20);
    assert!(fills.iter().all(|f| f.shares == 5));

    let m = compute_metrics(full_vwap, &fills).unwrap();
    assert_eq!(m.benchmark_vwap, full_vwap);

    // benchmark window is independent of the execution window
    let window_vwap = compute_vwap_window(&samples, &window).unwrap();
    assert_ne!(window_vwap, full_vwap);
}

#[test]
fn failures_short_circuit_the_run() {
    let mut samples = reference_series();
    for s in samples.iter_mut() {
        s.volume = 0;
    }
    let err = run(&samples, FillNoise::default(), 42).unwrap_err();
    assert!(matches!(err, ExecError::DivisionByZero(_)));

    let err = run(&[], FillNoise::default(), 42).unwrap_err();
    assert!(err.is_invalid_input());
}
