//! Monthly leave record model.
//!
//! This module defines the [`MonthlyLeaveRecord`] struct that tracks one
//! employee's paid-leave quota for one calendar month, and the
//! [`LeaveViolation`] payload reported when a balance cannot cover a
//! requested status.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One employee's paid-leave quota for one (year, month).
///
/// Invariant: `available == max(allocated + carried_forward - used, 0)`.
/// Records are created lazily; a month with no stored record is
/// synthesized from the active policy with `carried_forward = 0`.
///
/// # Example
///
/// ```
/// use leave_engine::models::MonthlyLeaveRecord;
/// use rust_decimal::Decimal;
///
/// let record = MonthlyLeaveRecord::new(2025, 7, Decimal::from(2), Decimal::from(1));
/// assert_eq!(record.available, Decimal::from(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyLeaveRecord {
    /// The calendar year this record covers.
    pub year: i32,
    /// The calendar month this record covers (1-12).
    pub month: u32,
    /// The quota granted for this month, derived from policy.
    pub allocated: Decimal,
    /// Unused balance rolled over from the prior month.
    pub carried_forward: Decimal,
    /// Leave days consumed this month.
    pub used: Decimal,
    /// Current remaining balance.
    pub available: Decimal,
}

impl MonthlyLeaveRecord {
    /// Creates a fresh record with nothing used yet.
    pub fn new(year: i32, month: u32, allocated: Decimal, carried_forward: Decimal) -> Self {
        Self {
            year,
            month,
            allocated,
            carried_forward,
            used: Decimal::ZERO,
            available: allocated + carried_forward,
        }
    }

    /// Returns true if this record covers the given (year, month).
    pub fn covers(&self, year: i32, month: u32) -> bool {
        self.year == year && self.month == month
    }

    /// Consumes `amount` leave days, recomputing `available`.
    ///
    /// This is the mutation that accompanies a committed `leave` or
    /// `half-day` attendance record. `available` is clamped at zero.
    pub fn consume(&mut self, amount: Decimal) {
        self.used += amount;
        self.recompute_available();
    }

    /// Recomputes `available` from the other three fields, clamping the
    /// result at zero.
    pub fn recompute_available(&mut self) {
        self.available = (self.allocated + self.carried_forward - self.used).max(Decimal::ZERO);
    }

    /// Returns true if the stored `available` matches the invariant
    /// `max(allocated + carried_forward - used, 0)`.
    pub fn balances_consistent(&self) -> bool {
        self.available == (self.allocated + self.carried_forward - self.used).max(Decimal::ZERO)
    }
}

/// A per-employee insufficient-balance rejection.
///
/// Produced at batch-build time when a selected status requires a larger
/// leave deduction than the employee's closing balance covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveViolation {
    /// The employee whose balance fell short.
    pub employee_id: String,
    /// The deduction the selected status requires.
    pub required: Decimal,
    /// The employee's closing balance for the target month.
    pub closing: Decimal,
}
