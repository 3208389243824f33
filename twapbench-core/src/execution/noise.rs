//! Fill noise: the stochastic part of the fill model.
//!
//! Executed price = expected price + ε, with ε ~ N(0, σ) drawn independently
//! per slice. σ is in price units.

use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::error::ExecError;

/// Default fill-noise standard deviation, in price units.
pub const DEFAULT_NOISE_STD: f64 = 0.02;

/// Zero-mean Gaussian fill noise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillNoise {
    std_dev: f64,
}

impl FillNoise {
    /// Noise with standard deviation `std_dev`. Rejects negative or
    /// non-finite values.
    pub fn new(std_dev: f64) -> Result<Self, ExecError> {
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(ExecError::invalid_input(format!(
                "fill noise std dev must be finite and >= 0, got {std_dev}"
            )));
        }
        Ok(Self { std_dev })
    }

    /// No noise: every fill executes exactly at its expected price.
    pub fn none() -> Self {
        Self { std_dev: 0.0 }
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Perturb `expected_price` with one noise draw.
    ///
    /// The zero-noise case returns `expected_price` unchanged without
    /// consuming randomness.
    pub fn apply<R: Rng + ?Sized>(&self, expected_price: f64, rng: &mut R) -> f64 {
        if self.std_dev == 0.0 {
            return expected_price;
        }
        let z: f64 = rng.sample(StandardNormal);
        expected_price + self.std_dev * z
    }
}

impl Default for FillNoise {
    fn default() -> Self {
        Self {
            std_dev: DEFAULT_NOISE_STD,
        }
    }
}
