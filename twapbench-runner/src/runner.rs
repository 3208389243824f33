//! Backtest runner: wires together data, benchmark, simulator, and metrics.
//!
//! Two entry points:
//! - `run_backtest()`: generates the synthetic series from the config, then runs.
//! - `run_backtest_on()`: takes a pre-built series. Used by tests and callers
//!   with their own data source.
//!
//! Stages run strictly in order (benchmark, simulation, aggregation) and the
//! first failure aborts the run.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use twapbench_core::data::{dataset_hash, generate_samples};
use twapbench_core::rng::{RngHierarchy, FILL_STREAM};
use twapbench_core::{
    compute_metrics, compute_vwap, compute_vwap_window, simulate_twap, ExecError, ExecutionWindow,
    FillRecord, MetricsResult, Sample, TwapSchedule,
};

use crate::config::{BacktestConfig, ConfigError, RunId};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Data(#[source] ExecError),
    #[error("benchmark failed: {0}")]
    Benchmark(#[source] ExecError),
    #[error("simulation failed: {0}")]
    Simulation(#[source] ExecError),
    #[error("metrics failed: {0}")]
    Metrics(#[source] ExecError),
}

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// How the parent order was sliced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub total_shares: u64,
    pub slice_count: usize,
    pub shares_per_slice: u64,
    pub allocated_shares: u64,
    pub unallocated_shares: u64,
}

impl From<&TwapSchedule> for ScheduleSummary {
    fn from(schedule: &TwapSchedule) -> Self {
        Self {
            total_shares: schedule.total_shares,
            slice_count: schedule.slice_count(),
            shares_per_slice: schedule.shares_per_slice(),
            allocated_shares: schedule.allocated_shares(),
            unallocated_shares: schedule.unallocated_shares(),
        }
    }
}

/// Complete result of a single backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub run_id: RunId,
    pub dataset_hash: String,
    pub sample_count: usize,
    pub config: BacktestConfig,
    pub execution_window: ExecutionWindow,
    pub benchmark_window: ExecutionWindow,
    pub schedule: ScheduleSummary,
    pub metrics: MetricsResult,
    pub fills: Vec<FillRecord>,
}

/// Default schema version for serde deserialization of older JSON without the field.
fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Generate the configured synthetic series.
pub fn load_samples(config: &BacktestConfig) -> Result<Vec<Sample>, RunError> {
    let samples = generate_samples(&config.data).map_err(RunError::Data)?;
    debug!(
        samples = samples.len(),
        seed = config.data.seed,
        "generated synthetic series"
    );
    Ok(samples)
}

/// Run a single backtest on the configured synthetic series.
pub fn run_backtest(config: &BacktestConfig) -> Result<BacktestResult, RunError> {
    config.validate()?;
    let samples = load_samples(config)?;
    run_backtest_on(&samples, config)
}

/// Run a single backtest on `samples`.
///
/// Fill noise is drawn from iteration 0 of the fill stream of
/// `config.execution.seed`, so Monte Carlo iteration 0 reproduces this run.
pub fn run_backtest_on(
    samples: &[Sample],
    config: &BacktestConfig,
) -> Result<BacktestResult, RunError> {
    let noise = config.fill_noise()?;
    let benchmark_window = config.benchmark_window(samples.len());
    let execution_window = config.execution_window(samples.len());

    // an empty series has no window to resolve
    let benchmark_vwap = match samples {
        [] => compute_vwap(samples),
        _ => compute_vwap_window(samples, &benchmark_window),
    }
    .map_err(RunError::Benchmark)?;
    debug!(
        vwap = benchmark_vwap,
        start = benchmark_window.start_idx,
        end = benchmark_window.end_idx,
        "computed benchmark"
    );

    let schedule = TwapSchedule::new(
        config.execution.total_shares,
        execution_window,
        samples.len(),
    )
    .map_err(RunError::Simulation)?;
    if schedule.unallocated_shares() > 0 {
        warn!(
            total_shares = schedule.total_shares,
            slices = schedule.slice_count(),
            dropped = schedule.unallocated_shares(),
            "floor division leaves shares unallocated"
        );
    }

    let mut rng = RngHierarchy::new(config.execution.seed).rng_for(FILL_STREAM, 0);
    let fills = simulate_twap(
        samples,
        config.execution.total_shares,
        execution_window,
        &noise,
        &mut rng,
    )
    .map_err(RunError::Simulation)?;
    debug!(fills = fills.len(), "simulated TWAP fills");

    let metrics = compute_metrics(benchmark_vwap, &fills).map_err(RunError::Metrics)?;
    info!(
        vwap = metrics.benchmark_vwap,
        avg_executed = metrics.avg_executed_price,
        cost = metrics.execution_cost,
        slippage = metrics.slippage,
        "backtest complete"
    );

    Ok(BacktestResult {
        schema_version: SCHEMA_VERSION,
        run_id: config.run_id(),
        dataset_hash: dataset_hash(samples),
        sample_count: samples.len(),
        config: config.clone(),
        execution_window,
        benchmark_window,
        schedule: ScheduleSummary::from(&schedule),
        metrics,
        fills,
    })
}
