//! TWAP schedule: equal-weight time slicing of a parent order.
//!
//! One slice per sample index in the window. Shares per slice are the floor
//! of `total_shares / slice_count`; the remainder is dropped, not carried to
//! a later slice.

use serde::{Deserialize, Serialize};

use crate::domain::ExecutionWindow;
use crate::error::ExecError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwapSchedule {
    pub window: ExecutionWindow,
    pub total_shares: u64,
}

impl TwapSchedule {
    /// Build a schedule for a series of `len` samples.
    ///
    /// Fails with `InvalidInput` for zero shares and `InvalidWindow` when the
    /// window does not fit the series.
    pub fn new(total_shares: u64, window: ExecutionWindow, len: usize) -> Result<Self, ExecError> {
        if total_shares == 0 {
            return Err(ExecError::invalid_input("total_shares must be positive"));
        }
        window.validate(len)?;
        Ok(Self {
            window,
            total_shares,
        })
    }

    pub fn slice_count(&self) -> usize {
        self.window.slice_count()
    }

    pub fn shares_per_slice(&self) -> u64 {
        self.total_shares / self.slice_count() as u64
    }

    /// Shares actually assigned across all slices.
    pub fn allocated_shares(&self) -> u64 {
        self.shares_per_slice() * self.slice_count() as u64
    }

    /// Shares lost to floor division.
    pub fn unallocated_shares(&self) -> u64 {
        self.total_shares - self.allocated_shares()
    }

    /// Sample indices of the slices, in execution order.
    pub fn slice_indices(&self) -> std::ops::RangeInclusive<usize> {
        self.window.start_idx..=self.window.end_idx
    }
}
