//! Salary report models.
//!
//! This module contains the [`DayCounts`] bucket type shared by the
//! monthly aggregator and the salary calculator, the per-employee
//! [`SalaryReportLine`], and the [`SalaryReport`] wrapper produced on
//! demand. Report lines are ephemeral: they are recomputed from
//! attendance records, employees, and advances, never persisted.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AttendanceStatus;

/// Day-type counters for one employee (or one day) within a month.
///
/// `unrecorded` counts calendar days with no attendance record at all;
/// reporting never defaults those to present.
///
/// # Example
///
/// ```
/// use leave_engine::models::{AttendanceStatus, DayCounts};
///
/// let mut counts = DayCounts::default();
/// counts.record(AttendanceStatus::Present);
/// counts.record(AttendanceStatus::HalfDay);
/// assert_eq!(counts.recorded_total(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCounts {
    /// Days marked present.
    pub present: u32,
    /// Days marked absent.
    pub absent: u32,
    /// Days marked half-day.
    pub half_day: u32,
    /// Days marked leave.
    pub leave: u32,
    /// Days with no attendance record.
    pub unrecorded: u32,
}

impl DayCounts {
    /// Increments the bucket matching `status`.
    pub fn record(&mut self, status: AttendanceStatus) {
        match status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::Absent => self.absent += 1,
            AttendanceStatus::HalfDay => self.half_day += 1,
            AttendanceStatus::Leave => self.leave += 1,
        }
    }

    /// Increments the unrecorded-day counter.
    pub fn record_missing(&mut self) {
        self.unrecorded += 1;
    }

    /// Total days covered by an attendance record.
    pub fn recorded_total(&self) -> u32 {
        self.present + self.absent + self.half_day + self.leave
    }

    /// Total days including unrecorded ones.
    pub fn total(&self) -> u32 {
        self.recorded_total() + self.unrecorded
    }
}

/// One employee's salary computation for one month.
///
/// All monetary fields carry full `Decimal` precision; call
/// [`SalaryReportLine::rounded`] for the two-decimal presentation view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryReportLine {
    /// The employee the line is for.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// The report month (1-12).
    pub month: u32,
    /// The report year.
    pub year: i32,
    /// Day-type counts for the month.
    pub counts: DayCounts,
    /// Pay for attended and leave days before deductions.
    pub gross_salary: Decimal,
    /// Gross salary after deductions (none are modeled here).
    pub net_salary: Decimal,
    /// The advance deducted for the month.
    pub advance: Decimal,
    /// Net salary minus the advance.
    pub total_salary: Decimal,
}

impl SalaryReportLine {
    /// Returns a copy with monetary fields rounded to two decimals.
    ///
    /// Rounding happens only here, at presentation time, so no rounding
    /// error compounds across the month-long computation.
    pub fn rounded(&self) -> SalaryReportLine {
        let round = |value: Decimal| -> Decimal {
            value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        };
        SalaryReportLine {
            gross_salary: round(self.gross_salary),
            net_salary: round(self.net_salary),
            advance: round(self.advance),
            total_salary: round(self.total_salary),
            ..self.clone()
        }
    }
}

/// A complete salary report for one month and location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryReport {
    /// Unique identifier for this report generation.
    pub report_id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that produced the report.
    pub engine_version: String,
    /// The report month (1-12).
    pub month: u32,
    /// The report year.
    pub year: i32,
    /// The location the report covers.
    pub location: String,
    /// One line per roster employee.
    pub lines: Vec<SalaryReportLine>,
}
