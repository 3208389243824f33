use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Simulated fill for one slice of a TWAP schedule.
///
/// `expected_price` is the slice's market price; `executed_price` is that
/// price plus fill noise. `shares` is informational: metrics weight every
/// slice equally regardless of share count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillRecord {
    pub index: usize,
    pub timestamp: NaiveDateTime,
    pub shares: u64,
    pub expected_price: f64,
    pub executed_price: f64,
}

impl FillRecord {
    /// Executed minus expected price for this slice.
    pub fn price_deviation(&self) -> f64 {
        self.executed_price - self.expected_price
    }
}
