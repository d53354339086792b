//! Employee model and related types.
//!
//! This module defines the Employee struct and its paid-leave summary
//! for representing workers in the leave and attendance engine.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::MonthlyLeaveRecord;

/// A rolled-up view of an employee's paid-leave position.
///
/// Mirrors the most recent [`MonthlyLeaveRecord`]; refreshed whenever a
/// monthly record is written back through the roster provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaidLeaveSummary {
    /// Remaining balance for the latest recorded month.
    pub available: Decimal,
    /// Leave days consumed in the latest recorded month.
    pub used: Decimal,
    /// Balance rolled into the latest recorded month.
    pub carried_forward: Decimal,
}

/// Represents an employee subject to leave accrual and attendance marking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The organization-assigned employee code (e.g., "EMP-0042").
    pub employee_code: String,
    /// The employee's display name.
    pub name: String,
    /// The work location the employee is rostered at.
    pub location: String,
    /// The department the employee belongs to.
    pub department: String,
    /// The employee's designation or job title.
    pub designation: String,
    /// The monthly base salary.
    pub salary: Decimal,
    /// The date the employee joined the organization.
    pub joining_date: NaiveDate,
    /// Rolled-up paid-leave position.
    #[serde(default)]
    pub paid_leaves: PaidLeaveSummary,
    /// One record per (year, month) the employee has been active.
    #[serde(default)]
    pub monthly_leaves: Vec<MonthlyLeaveRecord>,
}

impl Employee {
    /// Looks up the stored monthly leave record for (year, month), if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::models::{Employee, MonthlyLeaveRecord, PaidLeaveSummary};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     employee_code: "EMP-0001".to_string(),
    ///     name: "Asha Verma".to_string(),
    ///     location: "pune".to_string(),
    ///     department: "operations".to_string(),
    ///     designation: "technician".to_string(),
    ///     salary: Decimal::from(30000),
    ///     joining_date: NaiveDate::from_ymd_opt(2023, 4, 1).unwrap(),
    ///     paid_leaves: PaidLeaveSummary::default(),
    ///     monthly_leaves: vec![MonthlyLeaveRecord::new(
    ///         2025,
    ///         7,
    ///         Decimal::from(2),
    ///         Decimal::ZERO,
    ///     )],
    /// };
    /// assert!(employee.monthly_record(2025, 7).is_some());
    /// assert!(employee.monthly_record(2025, 8).is_none());
    /// ```
    pub fn monthly_record(&self, year: i32, month: u32) -> Option<&MonthlyLeaveRecord> {
        self.monthly_leaves.iter().find(|r| r.covers(year, month))
    }

    /// Replaces or inserts the monthly record covering `record`'s month,
    /// then refreshes the paid-leave summary.
    pub fn upsert_monthly_record(&mut self, record: MonthlyLeaveRecord) {
        match self
            .monthly_leaves
            .iter_mut()
            .find(|r| r.covers(record.year, record.month))
        {
            Some(existing) => *existing = record,
            None => self.monthly_leaves.push(record),
        }
        self.refresh_summary();
    }

    /// Refreshes the paid-leave summary from the latest monthly record.
    pub fn refresh_summary(&mut self) {
        if let Some(latest) = self
            .monthly_leaves
            .iter()
            .max_by_key(|r| (r.year, r.month))
        {
            self.paid_leaves = PaidLeaveSummary {
                available: latest.available,
                used: latest.used,
                carried_forward: latest.carried_forward,
            };
        }
    }
}
