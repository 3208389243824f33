//! Sample: the fundamental market data unit.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One price/volume observation.
///
/// Samples form an ordered sequence (chronological, as loaded). The core
/// trusts positional order and never re-sorts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    pub price: f64,
    pub volume: u64,
}

impl Sample {
    pub fn new(timestamp: NaiveDateTime, price: f64, volume: u64) -> Self {
        Self {
            timestamp,
            price,
            volume,
        }
    }

    /// Price times volume, the VWAP numerator term.
    pub fn notional(&self) -> f64 {
        self.price * self.volume as f64
    }

    /// Returns true if the price is NaN or infinite.
    pub fn is_void(&self) -> bool {
        !self.price.is_finite()
    }
}
