//! Serializable backtest configuration.
//!
//! Every field has a serde default matching the reference run (60 minute
//! samples, 100 shares over the whole series, σ = 0.02, seed 42), so an
//! empty TOML document is a valid config.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use twapbench_core::data::SyntheticConfig;
use twapbench_core::execution::DEFAULT_NOISE_STD;
use twapbench_core::{ExecError, ExecutionWindow, FillNoise};

/// Unique identifier for a backtest configuration (content-addressable hash).
pub type RunId = String;

/// Errors from loading or validating a config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Serializable configuration for a single backtest run.
///
/// ```toml
/// [data]
/// num_points = 60
/// seed = 42
///
/// [execution]
/// total_shares = 100
/// start_idx = 0
/// end_idx = 59
/// noise_std = 0.02
/// seed = 42
///
/// [benchmark]
/// # defaults to the whole series
///
/// [monte_carlo]
/// iterations = 200
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BacktestConfig {
    pub data: SyntheticConfig,
    pub execution: ExecutionConfig,
    pub benchmark: BenchmarkConfig,
    pub monte_carlo: MonteCarloConfig,
}

/// TWAP execution parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Parent order size.
    pub total_shares: u64,
    /// First slice index (defaults to 0).
    pub start_idx: Option<usize>,
    /// Last slice index, inclusive (defaults to the last sample).
    pub end_idx: Option<usize>,
    /// Fill-noise standard deviation in price units.
    pub noise_std: f64,
    /// Master seed for fill noise.
    pub seed: u64,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            total_shares: 100,
            start_idx: None,
            end_idx: None,
            noise_std: DEFAULT_NOISE_STD,
            seed: 42,
        }
    }
}

/// Benchmark window, independent of the execution window.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BenchmarkConfig {
    pub start_idx: Option<usize>,
    pub end_idx: Option<usize>,
}

/// Monte Carlo repetition settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MonteCarloConfig {
    pub iterations: usize,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self { iterations: 200 }
    }
}

impl BacktestConfig {
    /// Parse a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Check parameter ranges that do not depend on the series.
    ///
    /// Window bounds are checked against the series when the run starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.data.validate().map_err(invalid)?;
        if self.execution.total_shares == 0 {
            return Err(ConfigError::Invalid(
                "execution.total_shares must be positive".into(),
            ));
        }
        self.fill_noise()?;
        Ok(())
    }

    pub fn fill_noise(&self) -> Result<FillNoise, ConfigError> {
        FillNoise::new(self.execution.noise_std).map_err(invalid)
    }

    /// Execution window over a series of `len` samples.
    pub fn execution_window(&self, len: usize) -> ExecutionWindow {
        resolve_window(self.execution.start_idx, self.execution.end_idx, len)
    }

    /// Benchmark window over a series of `len` samples.
    pub fn benchmark_window(&self, len: usize) -> ExecutionWindow {
        resolve_window(self.benchmark.start_idx, self.benchmark.end_idx, len)
    }

    /// Computes a deterministic hash ID for this configuration.
    ///
    /// Two runs with identical configs have the same RunId.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("BacktestConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

fn resolve_window(start: Option<usize>, end: Option<usize>, len: usize) -> ExecutionWindow {
    ExecutionWindow::new(start.unwrap_or(0), end.unwrap_or(len.saturating_sub(1)))
}

fn invalid(err: ExecError) -> ConfigError {
    ConfigError::Invalid(err.to_string())
}
