//! Leave ledger computations.
//!
//! This module resolves an employee's monthly leave record (synthesizing
//! a policy default for unseen months), computes the opening/closing
//! balance indicator, gates leave selection on the closing balance, rolls
//! balances into the next month, and reallocates quotas after a policy
//! change.

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::config::LeavePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceStatus, Employee, MonthlyLeaveRecord};

/// A data-integrity warning raised while reading stored leave balances.
///
/// Warnings report anomalies (negative stored values, drifted totals)
/// upward; the engine clamps for computation but never repairs storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The opening/closing balance indicator for one monthly record.
///
/// Opening is the quota the month started with (allocated plus
/// carried-forward); closing is what remains after usage. Both are
/// reported with one decimal of precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceSnapshot {
    /// Allocated plus carried-forward, at one decimal.
    pub opening: Decimal,
    /// Remaining balance after usage, clamped at zero, at one decimal.
    pub closing: Decimal,
    /// Any data-integrity warnings encountered while reading the record.
    pub warnings: Vec<LedgerWarning>,
}

/// Resolves the monthly leave record for (year, month).
///
/// Looks up an existing record in the employee's history; if none
/// exists, synthesizes the policy default: the monthly allocation with
/// nothing carried forward and nothing used. Never mutates employee
/// state.
///
/// # Arguments
///
/// * `employee` - The employee whose history is consulted
/// * `year` - The target year
/// * `month` - The target month (1-12)
/// * `policy` - The active leave policy used for synthesis
pub fn resolve_monthly_record(
    employee: &Employee,
    year: i32,
    month: u32,
    policy: &LeavePolicy,
) -> MonthlyLeaveRecord {
    match employee.monthly_record(year, month) {
        Some(record) => record.clone(),
        None => MonthlyLeaveRecord::new(year, month, policy.monthly_allocation(), Decimal::ZERO),
    }
}

/// Computes the effective closing balance at full precision.
///
/// Negative stored `carried_forward` or `used` values are clamped to
/// zero for the computation and surfaced as warnings. A stored
/// `available` that disagrees with the recomputed balance is surfaced
/// the same way.
fn effective_balance(record: &MonthlyLeaveRecord) -> (Decimal, Decimal, Vec<LedgerWarning>) {
    let mut warnings = Vec::new();

    let carried = if record.carried_forward < Decimal::ZERO {
        warnings.push(LedgerWarning {
            code: "NEGATIVE_CARRIED_FORWARD".to_string(),
            message: format!(
                "Stored carried_forward {} for {}-{} clamped to 0",
                record.carried_forward, record.year, record.month
            ),
            severity: "medium".to_string(),
        });
        Decimal::ZERO
    } else {
        record.carried_forward
    };

    let used = if record.used < Decimal::ZERO {
        warnings.push(LedgerWarning {
            code: "NEGATIVE_USED".to_string(),
            message: format!(
                "Stored used {} for {}-{} clamped to 0",
                record.used, record.year, record.month
            ),
            severity: "medium".to_string(),
        });
        Decimal::ZERO
    } else {
        record.used
    };

    let opening = record.allocated + carried;
    let closing = (opening - used).max(Decimal::ZERO);

    if warnings.is_empty() && record.available != closing {
        warnings.push(LedgerWarning {
            code: "AVAILABLE_MISMATCH".to_string(),
            message: format!(
                "Stored available {} for {}-{} disagrees with recomputed balance {}",
                record.available, record.year, record.month, closing
            ),
            severity: "low".to_string(),
        });
    }

    (opening, closing, warnings)
}

/// Computes the opening/closing balance indicator for a record.
///
/// `opening = allocated + carried_forward`;
/// `closing = max(allocated + carried_forward - used, 0)`. Both are
/// rounded to one decimal for reporting. Stored anomalies are clamped
/// for the computation and reported in the snapshot's warnings.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::opening_closing;
/// use leave_engine::models::MonthlyLeaveRecord;
/// use rust_decimal::Decimal;
///
/// let mut record = MonthlyLeaveRecord::new(2025, 7, Decimal::from(2), Decimal::ONE);
/// record.consume(Decimal::ONE);
///
/// let snapshot = opening_closing(&record);
/// assert_eq!(snapshot.opening, Decimal::from(3));
/// assert_eq!(snapshot.closing, Decimal::from(2));
/// assert!(snapshot.warnings.is_empty());
/// ```
pub fn opening_closing(record: &MonthlyLeaveRecord) -> BalanceSnapshot {
    let (opening, closing, warnings) = effective_balance(record);
    BalanceSnapshot {
        opening: opening.round_dp(1),
        closing: closing.round_dp(1),
        warnings,
    }
}

/// Returns true if a closing balance covers the deduction `status`
/// requires.
///
/// A full leave day requires a closing balance of at least 1; a half day
/// requires at least the policy's half-day deduction. Present and absent
/// are always permitted.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::balance_permits;
/// use leave_engine::config::LeavePolicy;
/// use leave_engine::models::AttendanceStatus;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let policy = LeavePolicy::default();
/// let closing = Decimal::from_str("0.4").unwrap();
/// assert!(!balance_permits(closing, AttendanceStatus::Leave, &policy));
/// assert!(!balance_permits(closing, AttendanceStatus::HalfDay, &policy));
/// assert!(balance_permits(closing, AttendanceStatus::Present, &policy));
/// ```
pub fn balance_permits(closing: Decimal, status: AttendanceStatus, policy: &LeavePolicy) -> bool {
    closing >= status.leave_deduction(policy)
}

/// Rolls a monthly record into the following month.
///
/// The next month starts with the policy's monthly allocation plus this
/// month's effective closing balance carried forward, and nothing used.
///
/// # Arguments
///
/// * `record` - The month being closed out
/// * `policy` - The active leave policy
pub fn roll_forward(record: &MonthlyLeaveRecord, policy: &LeavePolicy) -> MonthlyLeaveRecord {
    let (_, closing, _) = effective_balance(record);
    let (year, month) = if record.month == 12 {
        (record.year + 1, 1)
    } else {
        (record.year, record.month + 1)
    };
    MonthlyLeaveRecord::new(year, month, policy.monthly_allocation(), closing)
}

/// Explicit confirmation for a policy reallocation.
///
/// Reallocation rewrites every employee's remaining-month quotas and
/// cannot be undone, so the caller must construct this token as a
/// separate, deliberate step before the operation will run.
#[derive(Debug)]
pub struct ReallocationApproval(());

impl ReallocationApproval {
    /// Acknowledges that the reallocation is irreversible.
    pub fn confirm() -> Self {
        Self(())
    }
}

/// The updated monthly records for one employee after a reallocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeReallocation {
    /// The employee the records belong to.
    pub employee_id: String,
    /// The recomputed records, one per affected month.
    pub records: Vec<MonthlyLeaveRecord>,
}

/// Recomputes monthly allocations after a leave policy change.
///
/// For every employee, the months from `effective_month` through
/// December of `effective_year` receive the new policy's monthly
/// allocation. Employees who joined during `effective_year` are prorated
/// from their joining month; employees who joined later are skipped.
/// `used` is never touched; `available` is recomputed from the new
/// allocation. Months with no stored record are synthesized first.
///
/// This is the only operation that touches more than one employee at
/// once. It is destructive and requires an explicitly constructed
/// [`ReallocationApproval`].
///
/// # Returns
///
/// Updated copies of the affected records, grouped per employee;
/// persisting them is the caller's responsibility.
pub fn reallocate_for_policy_change(
    employees: &[Employee],
    policy: &LeavePolicy,
    effective_year: i32,
    effective_month: u32,
    _approval: ReallocationApproval,
) -> EngineResult<Vec<EmployeeReallocation>> {
    if effective_month == 0 || effective_month > 12 {
        return Err(EngineError::InvalidDate {
            year: effective_year,
            month: effective_month,
        });
    }

    let allocation = policy.monthly_allocation();
    let mut reallocations = Vec::new();

    for employee in employees {
        let joined = employee.joining_date;
        if joined.year() > effective_year {
            continue;
        }
        let start_month = if joined.year() == effective_year {
            effective_month.max(joined.month())
        } else {
            effective_month
        };

        let mut records = Vec::new();
        for month in start_month..=12 {
            let mut record = resolve_monthly_record(employee, effective_year, month, policy);
            record.allocated = allocation;
            record.recompute_available();
            records.push(record);
        }

        reallocations.push(EmployeeReallocation {
            employee_id: employee.id.clone(),
            records,
        });
    }

    Ok(reallocations)
}
