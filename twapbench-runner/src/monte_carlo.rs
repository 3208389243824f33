//! Monte Carlo repetition of the fill simulation.
//!
//! The series and benchmark are fixed; only the fill noise changes between
//! iterations. Iteration `i` draws from sub-seed `(execution.seed, "fills", i)`
//! of the RNG hierarchy, so results are identical for any rayon thread count
//! and iteration 0 matches the single-run result.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use twapbench_core::rng::{RngHierarchy, FILL_STREAM};
use twapbench_core::{
    compute_metrics, compute_vwap, compute_vwap_window, simulate_twap, ExecError, ExecutionWindow,
    Sample,
};

use crate::config::{BacktestConfig, ConfigError};

// ─── Result types ────────────────────────────────────────────────────

/// One Monte Carlo iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct McSample {
    pub iteration: u64,
    pub seed: u64,
    pub avg_executed_price: f64,
    pub execution_cost: f64,
    pub slippage: f64,
}

/// Summary statistics of one metric across iterations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricDistribution {
    pub mean: f64,
    /// Sample standard deviation (n - 1). Zero for a single iteration.
    pub std_dev: f64,
    pub min: f64,
    pub p05: f64,
    pub median: f64,
    pub p95: f64,
    pub max: f64,
}

impl MetricDistribution {
    /// Summarize `values`. Returns `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let std_dev = if n > 1 {
            let var = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            var.sqrt()
        } else {
            0.0
        };

        Some(Self {
            mean,
            std_dev,
            min: sorted[0],
            p05: percentile_sorted(&sorted, 5.0),
            median: percentile_sorted(&sorted, 50.0),
            p95: percentile_sorted(&sorted, 95.0),
            max: sorted[n - 1],
        })
    }
}

/// Complete result of a Monte Carlo run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McResult {
    pub run_id: String,
    pub master_seed: u64,
    pub iterations: usize,
    pub benchmark_vwap: f64,
    pub avg_expected_price: f64,
    pub execution_window: ExecutionWindow,
    pub samples: Vec<McSample>,
    pub execution_cost: MetricDistribution,
    pub slippage: MetricDistribution,
}

/// Errors from Monte Carlo repetition.
#[derive(Debug, Error)]
pub enum McError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("monte carlo needs at least one iteration")]
    NoIterations,
    #[error("benchmark failed: {0}")]
    Benchmark(#[source] ExecError),
    #[error("iteration {iteration} failed: {source}")]
    IterationFailed {
        iteration: u64,
        #[source]
        source: ExecError,
    },
}

// ─── MC execution ────────────────────────────────────────────────────

/// Run `config.monte_carlo.iterations` independent fill simulations over
/// `samples` in parallel.
pub fn run_monte_carlo(samples: &[Sample], config: &BacktestConfig) -> Result<McResult, McError> {
    let iterations = config.monte_carlo.iterations;
    if iterations == 0 {
        return Err(McError::NoIterations);
    }
    let noise = config.fill_noise()?;
    let benchmark_window = config.benchmark_window(samples.len());
    let execution_window = config.execution_window(samples.len());
    let hierarchy = RngHierarchy::new(config.execution.seed);
    let total_shares = config.execution.total_shares;

    let benchmark_vwap = match samples {
        [] => compute_vwap(samples),
        _ => compute_vwap_window(samples, &benchmark_window),
    }
    .map_err(McError::Benchmark)?;
    debug!(iterations, vwap = benchmark_vwap, "starting monte carlo");

    let runs: Vec<(McSample, f64)> = (0..iterations as u64)
        .into_par_iter()
        .map(|iteration| {
            let seed = hierarchy.sub_seed(FILL_STREAM, iteration);
            let mut rng = hierarchy.rng_for(FILL_STREAM, iteration);
            let metrics = simulate_twap(samples, total_shares, execution_window, &noise, &mut rng)
                .and_then(|fills| compute_metrics(benchmark_vwap, &fills))
                .map_err(|source| McError::IterationFailed { iteration, source })?;
            let sample = McSample {
                iteration,
                seed,
                avg_executed_price: metrics.avg_executed_price,
                execution_cost: metrics.execution_cost,
                slippage: metrics.slippage,
            };
            Ok((sample, metrics.avg_expected_price))
        })
        .collect::<Result<_, McError>>()?;

    // expected prices do not depend on the noise, every iteration agrees
    let avg_expected_price = runs[0].1;
    let mc_samples: Vec<McSample> = runs.into_iter().map(|(s, _)| s).collect();

    let costs: Vec<f64> = mc_samples.iter().map(|s| s.execution_cost).collect();
    let slippages: Vec<f64> = mc_samples.iter().map(|s| s.slippage).collect();
    let execution_cost = MetricDistribution::from_values(&costs).ok_or(McError::NoIterations)?;
    let slippage = MetricDistribution::from_values(&slippages).ok_or(McError::NoIterations)?;

    info!(
        iterations,
        mean_cost = execution_cost.mean,
        mean_slippage = slippage.mean,
        "monte carlo complete"
    );

    Ok(McResult {
        run_id: config.run_id(),
        master_seed: config.execution.seed,
        iterations,
        benchmark_vwap,
        avg_expected_price,
        execution_window,
        samples: mc_samples,
        execution_cost,
        slippage,
    })
}

/// Percentile of a sorted slice using linear interpolation.
fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n == 1 {
        return sorted[0];
    }
    let rank = (p / 100.0) * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = rank - lo as f64;
    sorted[lo] * (1.0 - frac) + sorted[hi] * frac
}
