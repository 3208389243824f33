//! Execution metrics: one-shot aggregation of fills against a benchmark.
//!
//! Means are slice-weighted: every fill contributes equally regardless of its
//! share count.

use serde::{Deserialize, Serialize};

use crate::domain::FillRecord;
use crate::error::ExecError;

/// Result of one backtest run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    pub benchmark_vwap: f64,
    pub avg_executed_price: f64,
    pub avg_expected_price: f64,
    /// `avg_executed_price - benchmark_vwap`. Positive = paid above benchmark.
    pub execution_cost: f64,
    /// `avg_executed_price - avg_expected_price`.
    pub slippage: f64,
}

impl MetricsResult {
    /// Execution cost in basis points of the benchmark.
    pub fn execution_cost_bps(&self) -> f64 {
        self.execution_cost / self.benchmark_vwap * 10_000.0
    }

    /// Slippage in basis points of the average expected price.
    pub fn slippage_bps(&self) -> f64 {
        self.slippage / self.avg_expected_price * 10_000.0
    }
}

/// Aggregate fills into a `MetricsResult`.
///
/// Fails with `InvalidInput` when `fills` is empty.
pub fn compute_metrics(
    benchmark_vwap: f64,
    fills: &[FillRecord],
) -> Result<MetricsResult, ExecError> {
    if fills.is_empty() {
        return Err(ExecError::invalid_input("metrics require at least one fill"));
    }

    let avg_executed_price = mean(fills.iter().map(|f| f.executed_price), fills.len());
    let avg_expected_price = mean(fills.iter().map(|f| f.expected_price), fills.len());

    Ok(MetricsResult {
        benchmark_vwap,
        avg_executed_price,
        avg_expected_price,
        execution_cost: avg_executed_price - benchmark_vwap,
        slippage: avg_executed_price - avg_expected_price,
    })
}

fn mean(values: impl Iterator<Item = f64>, n: usize) -> f64 {
    values.sum::<f64>() / n as f64
}
