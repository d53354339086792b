//! Orchestration service over the collaborator contracts.
//!
//! [`Engine`] wires the four computation components to a backend that
//! implements the provider traits: it fetches rosters, policy, and
//! history, runs the pure calculations, and persists committed batches
//! and leave decrements. The backend owns state lifecycle; the engine
//! holds none of its own.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    BalanceSnapshot, MonthlyAttendance, ReallocationApproval, aggregate, build_batch,
    compute_salary, days_in_month, opening_closing, reallocate_for_policy_change,
    resolve_monthly_record,
};
use crate::config::{LeavePolicy, LeavePolicyUpdate};
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, AttendanceStatus, SalaryReport, current_advance};
use crate::provider::{
    AdvanceProvider, AttendanceStore, CommitOutcome, PolicyProvider, RosterProvider,
};

/// One employee's opening/closing balance indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeBalance {
    /// The employee the balance is for.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// The opening/closing snapshot for the month.
    pub balance: BalanceSnapshot,
}

/// The engine service, generic over the backing collaborator.
///
/// A single backend value implements all four provider contracts, the
/// way one data layer serves the surrounding application.
///
/// # Example
///
/// ```
/// use leave_engine::config::LeavePolicy;
/// use leave_engine::provider::MemoryStore;
/// use leave_engine::service::Engine;
///
/// let engine = Engine::new(MemoryStore::new(LeavePolicy::default()));
/// let sheet = engine.attendance_sheet(7, 2025, "pune").unwrap();
/// assert!(sheet.per_employee.is_empty());
/// ```
#[derive(Debug)]
pub struct Engine<C> {
    collaborators: C,
}

impl<C> Engine<C>
where
    C: RosterProvider + AttendanceStore + PolicyProvider + AdvanceProvider,
{
    /// Creates an engine over the given backend.
    pub fn new(collaborators: C) -> Self {
        Self { collaborators }
    }

    /// Returns the backing collaborator.
    pub fn collaborators(&self) -> &C {
        &self.collaborators
    }

    /// Marks attendance for every roster employee at a location on one
    /// date.
    ///
    /// Selected employees get their chosen status; everyone else is
    /// recorded present. The batch fails closed on conflicts and on
    /// insufficient leave balances. On acceptance, every committed leave
    /// or half-day entry decrements the employee's monthly balance
    /// through the roster provider.
    pub fn mark_bulk_attendance(
        &mut self,
        date: NaiveDate,
        location: &str,
        explicit_statuses: &HashMap<String, AttendanceStatus>,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        let policy = self.collaborators.leave_policy()?;
        let roster = self.collaborators.list_employees(location)?;
        let existing = self.collaborators.list_attendance_on(date, location)?;

        let entries = match build_batch(
            &roster,
            explicit_statuses,
            &existing,
            date,
            location,
            &policy,
        ) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(%date, location, error = %err, "Attendance batch rejected");
                return Err(err);
            }
        };

        match self.collaborators.commit_batch(&entries)? {
            CommitOutcome::Conflict(employee_ids) => {
                // A concurrent commit won the race; surface it the same
                // way as a client-side conflict.
                warn!(%date, location, conflicts = employee_ids.len(), "Commit raced an earlier batch");
                Err(EngineError::AlreadyMarked { date, employee_ids })
            }
            CommitOutcome::Accepted(records) => {
                for entry in &entries {
                    let deduction = entry.status.leave_deduction(&policy);
                    if deduction > Decimal::ZERO {
                        if let Some(employee) = roster.iter().find(|e| e.id == entry.employee_id) {
                            let mut record = resolve_monthly_record(
                                employee,
                                date.year(),
                                date.month(),
                                &policy,
                            );
                            record.consume(deduction);
                            self.collaborators
                                .update_monthly_record(&entry.employee_id, record)?;
                        }
                    }
                }
                info!(
                    %date,
                    location,
                    committed = records.len(),
                    "Committed attendance batch"
                );
                Ok(records)
            }
        }
    }

    /// Builds the monthly attendance grid for a location.
    pub fn attendance_sheet(
        &self,
        month: u32,
        year: i32,
        location: &str,
    ) -> EngineResult<MonthlyAttendance> {
        let roster = self.collaborators.list_employees(location)?;
        let records = self
            .collaborators
            .list_attendance_in_month(month, year, location)?;
        aggregate(&records, &roster, month, year)
    }

    /// Returns the opening/closing balance indicator for every roster
    /// employee at a location.
    pub fn leave_balances(
        &self,
        month: u32,
        year: i32,
        location: &str,
    ) -> EngineResult<Vec<EmployeeBalance>> {
        days_in_month(year, month)?;
        let policy = self.collaborators.leave_policy()?;
        let roster = self.collaborators.list_employees(location)?;

        Ok(roster
            .iter()
            .map(|employee| {
                let record = resolve_monthly_record(employee, year, month, &policy);
                EmployeeBalance {
                    employee_id: employee.id.clone(),
                    employee_name: employee.name.clone(),
                    balance: opening_closing(&record),
                }
            })
            .collect())
    }

    /// Generates the salary report for a month and location.
    ///
    /// Aggregates the month's attendance and computes one line per
    /// roster employee, deducting each employee's current advance.
    pub fn salary_report(
        &self,
        month: u32,
        year: i32,
        location: &str,
    ) -> EngineResult<SalaryReport> {
        let policy = self.collaborators.leave_policy()?;
        let roster = self.collaborators.list_employees(location)?;
        let records = self
            .collaborators
            .list_attendance_in_month(month, year, location)?;
        let aggregated = aggregate(&records, &roster, month, year)?;

        let mut lines = Vec::with_capacity(roster.len());
        for employee in &roster {
            let counts = aggregated
                .employee_counts(&employee.id)
                .copied()
                .unwrap_or_default();
            let advances = self.collaborators.list_advances(&employee.id)?;
            let advance = current_advance(&advances)
                .map(|a| a.amount)
                .unwrap_or(Decimal::ZERO);
            lines.push(compute_salary(
                employee, &counts, &policy, advance, month, year,
            )?);
        }

        info!(month, year, location, lines = lines.len(), "Generated salary report");
        Ok(SalaryReport {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            month,
            year,
            location: location.to_string(),
            lines,
        })
    }

    /// Applies an ordinary settings update to the leave policy.
    ///
    /// Does not touch any employee's balances; see
    /// [`Engine::reapply_policy_allocations`] for the explicit,
    /// destructive reallocation step.
    pub fn update_policy(&mut self, update: &LeavePolicyUpdate) -> EngineResult<LeavePolicy> {
        let policy = self.collaborators.update_leave_policy(update)?;
        info!(
            paid_leaves_per_year = policy.paid_leaves_per_year,
            "Updated leave policy"
        );
        Ok(policy)
    }

    /// Reapplies the active policy's monthly allocation across every
    /// employee's remaining months of `effective_year`.
    ///
    /// Irreversible; requires an explicitly constructed
    /// [`ReallocationApproval`]. Returns the number of employees
    /// touched.
    pub fn reapply_policy_allocations(
        &mut self,
        effective_year: i32,
        effective_month: u32,
        approval: ReallocationApproval,
    ) -> EngineResult<usize> {
        let policy = self.collaborators.leave_policy()?;
        let employees = self.collaborators.list_all_employees()?;

        let reallocations = reallocate_for_policy_change(
            &employees,
            &policy,
            effective_year,
            effective_month,
            approval,
        )?;

        for reallocation in &reallocations {
            for record in &reallocation.records {
                self.collaborators
                    .update_monthly_record(&reallocation.employee_id, record.clone())?;
            }
        }

        info!(
            effective_year,
            effective_month,
            employees = reallocations.len(),
            "Reapplied policy allocations"
        );
        Ok(reallocations.len())
    }

    /// Edits the status of an existing attendance record.
    ///
    /// Leave-balance adjustments for edited statuses are the
    /// authoritative store's concern, matching the surrounding
    /// application's server-side behavior.
    pub fn update_attendance_status(
        &mut self,
        record_id: Uuid,
        new_status: AttendanceStatus,
    ) -> EngineResult<AttendanceRecord> {
        let record = self.collaborators.update_status(record_id, new_status)?;
        info!(%record_id, status = %new_status, "Updated attendance status");
        Ok(record)
    }
}
