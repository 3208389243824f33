//! Export: JSON and CSV artifact generation.
//!
//! - **JSON**: full round-trip serialization with schema versioning
//! - **CSV**: per-slice fill tape for external analysis tools
//!
//! Persisted results carry a `schema_version` field. Newer versions are
//! rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use twapbench_core::FillRecord;

use crate::monte_carlo::{McResult, McSample};
use crate::report::short_id;
use crate::runner::{BacktestResult, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `BacktestResult` to pretty JSON.
pub fn export_json(result: &BacktestResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("failed to serialize BacktestResult to JSON")
}

/// Deserialize a `BacktestResult` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<BacktestResult> {
    let result: BacktestResult =
        serde_json::from_str(json).context("failed to deserialize BacktestResult from JSON")?;
    if result.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            result.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(result)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export fills as CSV.
///
/// Columns: index, timestamp, shares, expected_price, executed_price, deviation
pub fn export_fills_csv(fills: &[FillRecord]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "index",
        "timestamp",
        "shares",
        "expected_price",
        "executed_price",
        "deviation",
    ])?;

    for f in fills {
        wtr.write_record([
            &f.index.to_string(),
            &f.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
            &f.shares.to_string(),
            &format!("{:.6}", f.expected_price),
            &format!("{:.6}", f.executed_price),
            &format!("{:.6}", f.price_deviation()),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Export Monte Carlo iterations as CSV.
pub fn export_mc_samples_csv(samples: &[McSample]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "iteration",
        "seed",
        "avg_executed_price",
        "execution_cost",
        "slippage",
    ])?;
    for s in samples {
        wtr.write_record([
            &s.iteration.to_string(),
            &s.seed.to_string(),
            &format!("{:.6}", s.avg_executed_price),
            &format!("{:.6}", s.execution_cost),
            &format!("{:.6}", s.slippage),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the artifact set for a single backtest run.
///
/// Creates `{output_dir}/run_{run_id[..12]}/` containing:
/// - `result.json`: the full `BacktestResult`
/// - `fills.csv`: per-slice fill tape
///
/// Returns the path to the created directory.
pub fn save_artifacts(result: &BacktestResult, output_dir: &Path) -> Result<PathBuf> {
    let run_dir = create_run_dir(output_dir, "run", &result.run_id)?;

    let json = export_json(result)?;
    std::fs::write(run_dir.join("result.json"), json)
        .with_context(|| format!("failed to write result.json in {}", run_dir.display()))?;

    let fills_csv = export_fills_csv(&result.fills)?;
    std::fs::write(run_dir.join("fills.csv"), fills_csv)
        .with_context(|| format!("failed to write fills.csv in {}", run_dir.display()))?;

    Ok(run_dir)
}

/// Save the artifact set for a Monte Carlo run: `mc.json` and `mc_samples.csv`.
pub fn save_mc_artifacts(result: &McResult, output_dir: &Path) -> Result<PathBuf> {
    let run_dir = create_run_dir(output_dir, "mc", &result.run_id)?;

    let json = serde_json::to_string_pretty(result).context("failed to serialize McResult")?;
    std::fs::write(run_dir.join("mc.json"), json)
        .with_context(|| format!("failed to write mc.json in {}", run_dir.display()))?;

    let csv = export_mc_samples_csv(&result.samples)?;
    std::fs::write(run_dir.join("mc_samples.csv"), csv)
        .with_context(|| format!("failed to write mc_samples.csv in {}", run_dir.display()))?;

    Ok(run_dir)
}

fn create_run_dir(output_dir: &Path, prefix: &str, run_id: &str) -> Result<PathBuf> {
    let run_dir = output_dir.join(format!("{prefix}_{}", short_id(run_id)));
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;
    Ok(run_dir)
}
