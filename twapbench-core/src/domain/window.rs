//! Execution window: an inclusive index range over a sample sequence.

use serde::{Deserialize, Serialize};

use crate::error::ExecError;

/// Inclusive `[start_idx, end_idx]` range of sample indices.
///
/// A window is only meaningful against a concrete series; `validate` checks
/// it against the series length and is called wherever a window is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionWindow {
    pub start_idx: usize,
    pub end_idx: usize,
}

impl ExecutionWindow {
    pub fn new(start_idx: usize, end_idx: usize) -> Self {
        Self { start_idx, end_idx }
    }

    /// Window covering a whole series of `len` samples.
    ///
    /// Fails for an empty series, which has no valid window.
    pub fn full(len: usize) -> Result<Self, ExecError> {
        if len == 0 {
            return Err(ExecError::InvalidWindow {
                start: 0,
                end: 0,
                len,
            });
        }
        Ok(Self::new(0, len - 1))
    }

    /// Check `start_idx <= end_idx <= len - 1`.
    pub fn validate(&self, len: usize) -> Result<(), ExecError> {
        if self.start_idx > self.end_idx || self.end_idx >= len {
            return Err(ExecError::InvalidWindow {
                start: self.start_idx,
                end: self.end_idx,
                len,
            });
        }
        Ok(())
    }

    /// Number of slices (sample indices) in the window. Always >= 1 for a
    /// validated window.
    pub fn slice_count(&self) -> usize {
        self.end_idx.saturating_sub(self.start_idx) + 1
    }

    /// Borrow the window's samples, validating it first.
    pub fn select<'a, T>(&self, items: &'a [T]) -> Result<&'a [T], ExecError> {
        self.validate(items.len())?;
        Ok(&items[self.start_idx..=self.end_idx])
    }
}
