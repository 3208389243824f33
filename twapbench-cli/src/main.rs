//! twapbench CLI: single TWAP backtests and Monte Carlo repetition.
//!
//! Commands:
//! - `run`: one backtest against the synthetic series, printed as a report or JSON
//! - `mc`: repeat the fill simulation with independent seeds and summarize
//!
//! Reports go to stdout, log events to stderr.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use twapbench_runner::{
    export_json, load_samples, render_mc_report, render_report, run_backtest, run_monte_carlo,
    save_artifacts, save_mc_artifacts, BacktestConfig,
};

#[derive(Parser)]
#[command(
    name = "twapbench",
    version,
    about = "twapbench: TWAP execution quality against a VWAP benchmark"
)]
struct Cli {
    /// Log level used when RUST_LOG is not set (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single backtest and print the report.
    Run {
        #[command(flatten)]
        overrides: Overrides,

        /// Print the full result as JSON instead of the text report.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Write result.json and fills.csv into a run directory here.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Repeat the fill simulation with independently seeded noise.
    Mc {
        #[command(flatten)]
        overrides: Overrides,

        /// Number of repetitions.
        #[arg(long)]
        iterations: Option<usize>,

        /// Write mc.json and mc_samples.csv into a run directory here.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

/// Flags that override values from the config file.
#[derive(Args)]
struct Overrides {
    /// Path to a TOML config file. Defaults to the reference run.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Parent order size in shares.
    #[arg(long)]
    shares: Option<u64>,

    /// First execution slice index.
    #[arg(long)]
    start_idx: Option<usize>,

    /// Last execution slice index (inclusive).
    #[arg(long)]
    end_idx: Option<usize>,

    /// Fill-noise standard deviation in price units.
    #[arg(long)]
    noise_std: Option<f64>,

    /// Seed for the fill noise.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of synthetic samples.
    #[arg(long)]
    points: Option<usize>,

    /// Seed for the synthetic series.
    #[arg(long)]
    data_seed: Option<u64>,
}

impl Overrides {
    fn load(&self) -> Result<BacktestConfig> {
        let mut config = match &self.config {
            Some(path) => BacktestConfig::from_file(path)?,
            None => BacktestConfig::default(),
        };
        if let Some(shares) = self.shares {
            config.execution.total_shares = shares;
        }
        if let Some(start) = self.start_idx {
            config.execution.start_idx = Some(start);
        }
        if let Some(end) = self.end_idx {
            config.execution.end_idx = Some(end);
        }
        if let Some(std) = self.noise_std {
            config.execution.noise_std = std;
        }
        if let Some(seed) = self.seed {
            config.execution.seed = seed;
        }
        if let Some(points) = self.points {
            config.data.num_points = points;
        }
        if let Some(seed) = self.data_seed {
            config.data.seed = seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Run {
            overrides,
            json,
            output_dir,
        } => run_cmd(&overrides, json, output_dir.as_deref()),
        Commands::Mc {
            overrides,
            iterations,
            output_dir,
        } => mc_cmd(&overrides, iterations, output_dir.as_deref()),
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_cmd(overrides: &Overrides, json: bool, output_dir: Option<&Path>) -> Result<()> {
    let config = overrides.load()?;
    let result = run_backtest(&config).context("backtest failed")?;

    if json {
        println!("{}", export_json(&result)?);
    } else {
        print!("{}", render_report(&result));
    }

    if let Some(dir) = output_dir {
        let run_dir = save_artifacts(&result, dir)?;
        info!(path = %run_dir.display(), "artifacts saved");
    }
    Ok(())
}

fn mc_cmd(
    overrides: &Overrides,
    iterations: Option<usize>,
    output_dir: Option<&Path>,
) -> Result<()> {
    let mut config = overrides.load()?;
    if let Some(n) = iterations {
        config.monte_carlo.iterations = n;
    }

    let samples = load_samples(&config)?;
    let result = run_monte_carlo(&samples, &config).context("monte carlo failed")?;
    print!("{}", render_mc_report(&result));

    if let Some(dir) = output_dir {
        let run_dir = save_mc_artifacts(&result, dir)?;
        info!(path = %run_dir.display(), "artifacts saved");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let cli = Cli::parse_from([
            "twapbench",
            "run",
            "--shares",
            "500",
            "--start-idx",
            "10",
            "--end-idx",
            "29",
            "--noise-std",
            "0",
        ]);
        let Commands::Run { overrides, .. } = cli.command else {
            panic!("expected run");
        };
        let config = overrides.load().unwrap();
        assert_eq!(config.execution.total_shares, 500);
        assert_eq!(config.execution.start_idx, Some(10));
        assert_eq!(config.execution.end_idx, Some(29));
        assert_eq!(config.execution.noise_std, 0.0);
        assert_eq!(config.data.num_points, 60);
    }

    #[test]
    fn invalid_override_is_rejected() {
        let cli = Cli::parse_from(["twapbench", "mc", "--shares", "0"]);
        let Commands::Mc { overrides, .. } = cli.command else {
            panic!("expected mc");
        };
        assert!(overrides.load().is_err());
    }

    #[test]
    fn log_level_is_global() {
        let cli = Cli::parse_from(["twapbench", "mc", "--iterations", "5", "--log-level", "debug"]);
        assert_eq!(cli.log_level, "debug");
    }
}
