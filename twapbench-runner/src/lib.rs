//! twapbench runner: backtest orchestration, configuration, Monte Carlo, reporting.
//!
//! This crate builds on `twapbench-core` to provide:
//! - TOML configuration with reference-run defaults
//! - Single-run orchestration: series → benchmark → fills → metrics
//! - Parallel Monte Carlo repetition of the fill simulation
//! - Human-readable reports and JSON/CSV artifacts
//!
//! Unlike the core, this crate emits `tracing` events.

pub mod config;
pub mod export;
pub mod monte_carlo;
pub mod report;
pub mod runner;

pub use config::{
    BacktestConfig, BenchmarkConfig, ConfigError, ExecutionConfig, MonteCarloConfig, RunId,
};
pub use export::{export_fills_csv, export_json, import_json, save_artifacts, save_mc_artifacts};
pub use monte_carlo::{run_monte_carlo, McError, McResult, McSample, MetricDistribution};
pub use report::{render_mc_report, render_metrics, render_report};
pub use runner::{
    load_samples, run_backtest, run_backtest_on, BacktestResult, RunError, ScheduleSummary,
    SCHEMA_VERSION,
};
