//! VWAP benchmark.
//!
//! The benchmark conventionally spans the whole series, independent of the
//! execution window. `compute_vwap_window` allows a separately configured
//! benchmark window.

use crate::domain::{ExecutionWindow, Sample};
use crate::error::ExecError;

/// Volume-weighted average price: `Σ(price·volume) / Σ volume`.
///
/// Fails with `InvalidInput` for an empty series and `DivisionByZero` when
/// the total volume is zero. Never returns NaN for those cases.
pub fn compute_vwap(samples: &[Sample]) -> Result<f64, ExecError> {
    if samples.is_empty() {
        return Err(ExecError::invalid_input("VWAP requires at least one sample"));
    }

    let total_volume: u128 = samples.iter().map(|s| u128::from(s.volume)).sum();
    if total_volume == 0 {
        return Err(ExecError::DivisionByZero("total volume is zero"));
    }

    let notional: f64 = samples.iter().map(Sample::notional).sum();
    Ok(notional / total_volume as f64)
}

/// VWAP over the samples selected by `window`.
pub fn compute_vwap_window(
    samples: &[Sample],
    window: &ExecutionWindow,
) -> Result<f64, ExecError> {
    compute_vwap(window.select(samples)?)
}
