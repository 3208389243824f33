//! Execution simulator: turns a TWAP schedule into simulated fills.
//!
//! Key concepts:
//! - **Schedule**: equal-weight time slicing, one slice per sample index
//! - **Fill noise**: zero-mean Gaussian perturbation of each slice's price
//! - **Fills**: `(expected, executed)` price pairs in slice order

pub mod noise;
pub mod schedule;
pub mod twap;

pub use noise::{FillNoise, DEFAULT_NOISE_STD};
pub use schedule::TwapSchedule;
pub use twap::simulate_twap;
