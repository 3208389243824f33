//! Naive TWAP fill simulation.

use rand::Rng;

use crate::domain::{ExecutionWindow, FillRecord, Sample};
use crate::error::ExecError;
use crate::execution::noise::FillNoise;
use crate::execution::schedule::TwapSchedule;

/// Simulate a TWAP execution of `total_shares` over `window`.
///
/// One fill per sample index, in ascending index order. The expected price
/// is the sample's price (no market impact); the executed price adds one
/// independent `noise` draw from `rng`. With identically seeded `rng` and
/// identical inputs the output is bit-for-bit reproducible.
///
/// # Errors
/// - `InvalidInput` if `total_shares == 0`
/// - `InvalidWindow` if `start_idx > end_idx` or either index is out of range
pub fn simulate_twap<R: Rng + ?Sized>(
    samples: &[Sample],
    total_shares: u64,
    window: ExecutionWindow,
    noise: &FillNoise,
    rng: &mut R,
) -> Result<Vec<FillRecord>, ExecError> {
    let schedule = TwapSchedule::new(total_shares, window, samples.len())?;
    let shares = schedule.shares_per_slice();

    let fills = schedule
        .slice_indices()
        .map(|index| {
            let sample = &samples[index];
            FillRecord {
                index,
                timestamp: sample.timestamp,
                shares,
                expected_price: sample.price,
                executed_price: noise.apply(sample.price, &mut *rng),
            }
        })
        .collect();

    Ok(fills)
}
