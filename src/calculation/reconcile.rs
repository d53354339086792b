//! Bulk attendance reconciliation.
//!
//! This module builds a complete, conflict-free attendance batch for one
//! date and location: explicitly selected employees get their chosen
//! status, every other roster member defaults to present, and the batch
//! fails closed if any roster employee already has a record for the
//! date.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::config::LeavePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceEntry, AttendanceRecord, AttendanceStatus, Employee, LeaveViolation,
};

use super::leave_ledger::{balance_permits, opening_closing, resolve_monthly_record};

/// Builds the attendance batch for one date and location.
///
/// # Arguments
///
/// * `roster` - All employees at `location`
/// * `explicit_statuses` - Operator-selected statuses, keyed by employee id
/// * `existing` - Attendance already recorded for `date`
/// * `date` - The target date
/// * `location` - The location the batch is marked at
/// * `policy` - The active leave policy, for the balance gate
///
/// # Behavior
///
/// 1. Any roster employee that already has a record for `date` rejects
///    the whole batch; the error names exactly those employees and no
///    partial commit occurs.
/// 2. Every selected leave or half-day status must pass the closing
///    balance gate for the employee's month; all violations are
///    collected before rejecting.
/// 3. Every roster employee not explicitly selected is emitted as
///    present. Silence means attendance, not absence.
///
/// The returned batch holds exactly one entry per roster employee, in
/// roster order, all carrying the same date and location. The function
/// is pure: identical inputs produce an identical batch.
///
/// # Errors
///
/// * `UnknownEmployee` - an explicit selection is not on the roster
/// * `AlreadyMarked` - at least one roster employee has a record for `date`
/// * `InsufficientLeave` - at least one selection fails the balance gate
pub fn build_batch(
    roster: &[Employee],
    explicit_statuses: &HashMap<String, AttendanceStatus>,
    existing: &[AttendanceRecord],
    date: NaiveDate,
    location: &str,
    policy: &LeavePolicy,
) -> EngineResult<Vec<AttendanceEntry>> {
    let roster_ids: HashSet<&str> = roster.iter().map(|e| e.id.as_str()).collect();

    let mut unknown: Vec<&String> = explicit_statuses
        .keys()
        .filter(|id| !roster_ids.contains(id.as_str()))
        .collect();
    if !unknown.is_empty() {
        unknown.sort();
        return Err(EngineError::UnknownEmployee {
            employee_id: unknown[0].clone(),
        });
    }

    let marked: HashSet<&str> = existing
        .iter()
        .filter(|r| r.date == date)
        .map(|r| r.employee_id.as_str())
        .collect();

    let conflicts: Vec<String> = roster
        .iter()
        .filter(|e| marked.contains(e.id.as_str()))
        .map(|e| e.id.clone())
        .collect();
    if !conflicts.is_empty() {
        return Err(EngineError::AlreadyMarked {
            date,
            employee_ids: conflicts,
        });
    }

    let mut violations = Vec::new();
    for employee in roster {
        let status = explicit_statuses
            .get(&employee.id)
            .copied()
            .unwrap_or(AttendanceStatus::Present);
        let required = status.leave_deduction(policy);
        if required > Decimal::ZERO {
            let record = resolve_monthly_record(employee, date.year(), date.month(), policy);
            let closing = opening_closing(&record).closing;
            if !balance_permits(closing, status, policy) {
                violations.push(LeaveViolation {
                    employee_id: employee.id.clone(),
                    required,
                    closing,
                });
            }
        }
    }
    if !violations.is_empty() {
        return Err(EngineError::InsufficientLeave { violations });
    }

    Ok(roster
        .iter()
        .map(|employee| AttendanceEntry {
            employee_id: employee.id.clone(),
            date,
            status: explicit_statuses
                .get(&employee.id)
                .copied()
                .unwrap_or(AttendanceStatus::Present),
            location: location.to_string(),
        })
        .collect())
}
