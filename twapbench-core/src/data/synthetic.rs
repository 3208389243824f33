//! Synthetic price/volume series.
//!
//! Prices follow a Gaussian random walk, `price_i = initial + Σ_{j<=i} step_j`
//! with `step ~ N(0, step_std)`, so even the first sample is one step away
//! from `initial_price`. Volumes are uniform integers in
//! `[volume_min, volume_max)`, drawn after all price steps. Timestamps are
//! spaced `interval_secs` apart.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::domain::Sample;
use crate::error::ExecError;

/// Parameters of the synthetic series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticConfig {
    pub num_points: usize,
    pub start: NaiveDateTime,
    pub interval_secs: i64,
    pub initial_price: f64,
    pub step_std: f64,
    pub volume_min: u64,
    pub volume_max: u64,
    pub seed: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            num_points: 60,
            start: NaiveDate::from_ymd_opt(2021, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap_or_default(),
            interval_secs: 60,
            initial_price: 100.0,
            step_std: 0.1,
            volume_min: 50,
            volume_max: 200,
            seed: 42,
        }
    }
}

impl SyntheticConfig {
    pub fn validate(&self) -> Result<(), ExecError> {
        if self.num_points == 0 {
            return Err(ExecError::invalid_input("num_points must be positive"));
        }
        if self.interval_secs <= 0 {
            return Err(ExecError::invalid_input("interval_secs must be positive"));
        }
        if self.timestamp_at(self.num_points - 1).is_none() {
            return Err(ExecError::invalid_input(format!(
                "{} points every {}s from {} overflow the timestamp range",
                self.num_points, self.interval_secs, self.start
            )));
        }
        if !self.initial_price.is_finite() {
            return Err(ExecError::invalid_input("initial_price must be finite"));
        }
        if !self.step_std.is_finite() || self.step_std < 0.0 {
            return Err(ExecError::invalid_input(format!(
                "step_std must be finite and >= 0, got {}",
                self.step_std
            )));
        }
        if self.volume_min >= self.volume_max {
            return Err(ExecError::invalid_input(format!(
                "volume range [{}, {}) is empty",
                self.volume_min, self.volume_max
            )));
        }
        Ok(())
    }

    /// Timestamp of sample `i`, or `None` if it is not representable.
    fn timestamp_at(&self, i: usize) -> Option<NaiveDateTime> {
        let offset = i64::try_from(i).ok()?.checked_mul(self.interval_secs)?;
        self.start.checked_add_signed(TimeDelta::try_seconds(offset)?)
    }
}

/// Generate a series from `config` with its own seeded random source.
pub fn generate_samples(config: &SyntheticConfig) -> Result<Vec<Sample>, ExecError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    generate_samples_with(config, &mut rng)
}

/// Generate a series drawing from a caller-supplied random source.
///
/// `config.seed` is ignored.
pub fn generate_samples_with<R: Rng + ?Sized>(
    config: &SyntheticConfig,
    rng: &mut R,
) -> Result<Vec<Sample>, ExecError> {
    config.validate()?;

    let n = config.num_points;
    let steps: Vec<f64> = (0..n)
        .map(|_| {
            let z: f64 = rng.sample(StandardNormal);
            config.step_std * z
        })
        .collect();
    let volumes: Vec<u64> = (0..n)
        .map(|_| rng.gen_range(config.volume_min..config.volume_max))
        .collect();

    let mut level = 0.0;
    steps
        .into_iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (step, volume))| {
            level += step;
            let timestamp = config
                .timestamp_at(i)
                .ok_or_else(|| ExecError::invalid_input("sample timestamp out of range"))?;
            Ok(Sample::new(timestamp, config.initial_price + level, volume))
        })
        .collect()
}
