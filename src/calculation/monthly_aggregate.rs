//! Monthly attendance aggregation.
//!
//! This module folds a month of per-day attendance records into
//! per-employee day-type counts and day-by-day organization-wide totals.
//! Aggregation is read-only reporting: days with no record are counted as
//! unrecorded, never defaulted to present.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, AttendanceStatus, DayCounts, Employee};

/// Returns the number of days in a calendar month (proleptic Gregorian).
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::days_in_month;
///
/// assert_eq!(days_in_month(2025, 6).unwrap(), 30);
/// assert_eq!(days_in_month(2024, 2).unwrap(), 29);
/// assert!(days_in_month(2025, 13).is_err());
/// ```
pub fn days_in_month(year: i32, month: u32) -> EngineResult<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(EngineError::InvalidDate { year, month })?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(EngineError::InvalidDate { year, month })?;
    Ok((next_first - first).num_days() as u32)
}

/// Aggregated attendance for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyAttendance {
    /// The aggregated year.
    pub year: i32,
    /// The aggregated month (1-12).
    pub month: u32,
    /// Day-type counts per employee across the month.
    pub per_employee: HashMap<String, DayCounts>,
    /// Day-type counts per calendar day across the roster.
    pub per_day: BTreeMap<NaiveDate, DayCounts>,
    /// The Sundays of the month. Flagged for presentation, still counted.
    pub sundays: Vec<NaiveDate>,
}

impl MonthlyAttendance {
    /// Returns the day-type counts for one employee.
    pub fn employee_counts(&self, employee_id: &str) -> Option<&DayCounts> {
        self.per_employee.get(employee_id)
    }
}

/// Aggregates a month of attendance records for a set of employees.
///
/// Walks every day of the month and every employee, bucketing at most
/// one matching record per (employee, day) into both the per-employee
/// and per-day maps. Days without a record count as unrecorded. Records
/// outside the month, or for employees not in `employees`, are ignored.
///
/// # Errors
///
/// Returns `DuplicateAttendance` if two records cover the same
/// (employee, date) pair: that violates the uniqueness invariant and the
/// aggregator refuses to pick one silently. Returns `InvalidDate` for an
/// unrepresentable (year, month).
pub fn aggregate(
    records: &[AttendanceRecord],
    employees: &[Employee],
    month: u32,
    year: i32,
) -> EngineResult<MonthlyAttendance> {
    let days = days_in_month(year, month)?;
    let roster_ids: HashSet<&str> = employees.iter().map(|e| e.id.as_str()).collect();

    let mut by_employee_day: HashMap<(&str, NaiveDate), AttendanceStatus> = HashMap::new();
    for record in records {
        if record.date.year() != year || record.date.month() != month {
            continue;
        }
        if !roster_ids.contains(record.employee_id.as_str()) {
            continue;
        }
        if by_employee_day
            .insert((record.employee_id.as_str(), record.date), record.status)
            .is_some()
        {
            return Err(EngineError::DuplicateAttendance {
                employee_id: record.employee_id.clone(),
                date: record.date,
            });
        }
    }

    let mut per_employee: HashMap<String, DayCounts> = employees
        .iter()
        .map(|e| (e.id.clone(), DayCounts::default()))
        .collect();
    let mut per_day: BTreeMap<NaiveDate, DayCounts> = BTreeMap::new();
    let mut sundays = Vec::new();

    for day in 1..=days {
        // Every day of the range is representable once days_in_month
        // succeeded.
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            return Err(EngineError::InvalidDate { year, month });
        };
        if date.weekday() == Weekday::Sun {
            sundays.push(date);
        }
        let day_counts = per_day.entry(date).or_default();

        for employee in employees {
            let employee_counts = per_employee
                .entry(employee.id.clone())
                .or_default();
            match by_employee_day.get(&(employee.id.as_str(), date)) {
                Some(status) => {
                    employee_counts.record(*status);
                    day_counts.record(*status);
                }
                None => {
                    employee_counts.record_missing();
                    day_counts.record_missing();
                }
            }
        }
    }

    Ok(MonthlyAttendance {
        year,
        month,
        per_employee,
        per_day,
        sundays,
    })
}
