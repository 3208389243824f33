//! Human-readable reports.
//!
//! The headline block is four lines with 4-decimal formatting:
//! benchmark VWAP, average executed price, cost vs VWAP, slippage.

use twapbench_core::MetricsResult;

use crate::monte_carlo::{McResult, MetricDistribution};
use crate::runner::BacktestResult;

/// The four headline lines for a set of metrics.
pub fn render_metrics(metrics: &MetricsResult) -> String {
    format!(
        "Global VWAP (benchmark): {:.4}\n\
         Average Executed Price: {:.4}\n\
         Execution Cost vs VWAP: {:.4}\n\
         Slippage (Expected vs Actual): {:.4}\n",
        metrics.benchmark_vwap,
        metrics.avg_executed_price,
        metrics.execution_cost,
        metrics.slippage,
    )
}

/// Full single-run report: headline metrics followed by run details.
pub fn render_report(result: &BacktestResult) -> String {
    let mut out = render_metrics(&result.metrics);
    let m = &result.metrics;
    let s = &result.schedule;

    out.push_str(&format!(
        "\n--- Run ---\n\
         Run ID:            {}\n\
         Samples:           {}\n\
         Benchmark window:  [{}, {}]\n\
         Execution window:  [{}, {}]\n\
         Slices:            {}\n\
         Shares per slice:  {} ({} of {} allocated, {} dropped)\n\
         Avg Expected:      {:.4}\n\
         Cost (bps):        {:+.2}\n\
         Slippage (bps):    {:+.2}\n",
        short_id(&result.run_id),
        result.sample_count,
        result.benchmark_window.start_idx,
        result.benchmark_window.end_idx,
        result.execution_window.start_idx,
        result.execution_window.end_idx,
        s.slice_count,
        s.shares_per_slice,
        s.allocated_shares,
        s.total_shares,
        s.unallocated_shares,
        m.avg_expected_price,
        m.execution_cost_bps(),
        m.slippage_bps(),
    ));
    out
}

/// Monte Carlo summary: fixed benchmark plus cost and slippage distributions.
pub fn render_mc_report(result: &McResult) -> String {
    let mut out = format!(
        "=== Monte Carlo ({} iterations, seed {}) ===\n\
         Global VWAP (benchmark): {:.4}\n\
         Average Expected Price: {:.4}\n\
         Execution window: [{}, {}]\n\n",
        result.iterations,
        result.master_seed,
        result.benchmark_vwap,
        result.avg_expected_price,
        result.execution_window.start_idx,
        result.execution_window.end_idx,
    );
    out.push_str(&format!(
        "{:<16} {:>9} {:>9} {:>9} {:>9} {:>9}\n",
        "Metric", "Mean", "StdDev", "P05", "Median", "P95"
    ));
    out.push_str(&format!("{}\n", "-".repeat(66)));
    out.push_str(&distribution_row("Execution Cost", &result.execution_cost));
    out.push_str(&distribution_row("Slippage", &result.slippage));
    out
}

fn distribution_row(label: &str, d: &MetricDistribution) -> String {
    format!(
        "{:<16} {:>9.4} {:>9.4} {:>9.4} {:>9.4} {:>9.4}\n",
        label, d.mean, d.std_dev, d.p05, d.median, d.p95
    )
}

/// First 12 characters of a run id.
pub(crate) fn short_id(run_id: &str) -> &str {
    match run_id.char_indices().nth(12) {
        Some((end, _)) => &run_id[..end],
        None => run_id,
    }
}
