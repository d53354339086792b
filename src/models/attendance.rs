//! Attendance models and status types.
//!
//! This module defines the closed [`AttendanceStatus`] enum, the
//! uncommitted [`AttendanceEntry`] draft produced by batch building, and
//! the committed [`AttendanceRecord`] carrying a store-assigned id.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::LeavePolicy;

/// Represents the attendance status for one employee on one date.
///
/// The set is closed: an invalid status is a compile error, not a string
/// comparison that silently fails.
///
/// # Example
///
/// ```
/// use leave_engine::models::AttendanceStatus;
///
/// let status: AttendanceStatus = serde_json::from_str("\"half-day\"").unwrap();
/// assert_eq!(status, AttendanceStatus::HalfDay);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    /// The employee attended for the full day.
    Present,
    /// The employee did not attend and took no leave.
    Absent,
    /// The employee attended for part of the day.
    HalfDay,
    /// The employee took a paid leave day.
    Leave,
}

impl AttendanceStatus {
    /// Returns the leave-balance deduction this status requires.
    ///
    /// A full leave day deducts 1; a half day deducts the policy's
    /// half-day fraction; present and absent deduct nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::config::LeavePolicy;
    /// use leave_engine::models::AttendanceStatus;
    /// use rust_decimal::Decimal;
    ///
    /// let policy = LeavePolicy::default();
    /// assert_eq!(
    ///     AttendanceStatus::Leave.leave_deduction(&policy),
    ///     Decimal::ONE
    /// );
    /// assert_eq!(
    ///     AttendanceStatus::Present.leave_deduction(&policy),
    ///     Decimal::ZERO
    /// );
    /// ```
    pub fn leave_deduction(&self, policy: &LeavePolicy) -> Decimal {
        match self {
            AttendanceStatus::Leave => Decimal::ONE,
            AttendanceStatus::HalfDay => policy.half_day_deduction,
            AttendanceStatus::Present | AttendanceStatus::Absent => Decimal::ZERO,
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "present"),
            AttendanceStatus::Absent => write!(f, "absent"),
            AttendanceStatus::HalfDay => write!(f, "half-day"),
            AttendanceStatus::Leave => write!(f, "leave"),
        }
    }
}

/// An uncommitted attendance draft for one employee on one date.
///
/// Batch building emits entries, not records: the store assigns ids at
/// commit time, which keeps the batch builder a pure function whose
/// output is identical across calls with identical inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    /// The employee the entry is for.
    pub employee_id: String,
    /// The calendar date the entry covers.
    pub date: NaiveDate,
    /// The attendance status.
    pub status: AttendanceStatus,
    /// The location the entry was marked at.
    pub location: String,
}

/// A committed attendance record.
///
/// At most one record exists per (employee, date); the authoritative
/// store enforces this at commit, and the reconciler protects it
/// client-side before submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The store-assigned record id.
    pub id: Uuid,
    /// The employee the record is for.
    pub employee_id: String,
    /// The calendar date the record covers.
    pub date: NaiveDate,
    /// The attendance status. Status is the only field edited after
    /// commit; records are never deleted.
    pub status: AttendanceStatus,
    /// The location the record was marked at.
    pub location: String,
}

impl AttendanceRecord {
    /// Promotes an entry into a committed record with the given id.
    pub fn from_entry(entry: &AttendanceEntry, id: Uuid) -> Self {
        Self {
            id,
            employee_id: entry.employee_id.clone(),
            date: entry.date,
            status: entry.status,
            location: entry.location.clone(),
        }
    }
}
