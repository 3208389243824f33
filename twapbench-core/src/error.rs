//! Error type shared by every computation in the core.

use thiserror::Error;

/// Errors raised by the benchmark, simulator, and metrics computations.
///
/// Every error aborts the run that produced it. There are no partial results.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid execution window [{start}, {end}] for a series of {len} samples")]
    InvalidWindow { start: usize, end: usize, len: usize },

    #[error("division by zero: {0}")]
    DivisionByZero(&'static str),
}

impl ExecError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// True for `InvalidInput` and for its specialised `DivisionByZero` case.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::DivisionByZero(_))
    }
}
