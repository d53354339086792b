//! In-memory reference implementation of the collaborator contracts.
//!
//! [`MemoryStore`] backs the engine in tests, benchmarks, and demos. Its
//! commit path enforces the same per-(employee, date) uniqueness rule an
//! authoritative server-side store would.

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::config::{LeavePolicy, LeavePolicyUpdate};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Advance, AttendanceEntry, AttendanceRecord, AttendanceStatus, Employee, MonthlyLeaveRecord,
};

use super::{AdvanceProvider, AttendanceStore, CommitOutcome, PolicyProvider, RosterProvider};

/// An in-memory employee, attendance, policy, and advance store.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    employees: Vec<Employee>,
    attendance: Vec<AttendanceRecord>,
    advances: Vec<Advance>,
    policy: LeavePolicy,
}

impl MemoryStore {
    /// Creates an empty store with the given policy.
    pub fn new(policy: LeavePolicy) -> Self {
        Self {
            employees: Vec::new(),
            attendance: Vec::new(),
            advances: Vec::new(),
            policy,
        }
    }

    /// Adds an employee to the roster.
    pub fn add_employee(&mut self, employee: Employee) {
        self.employees.push(employee);
    }

    /// Records a granted advance.
    pub fn add_advance(&mut self, advance: Advance) {
        self.advances.push(advance);
    }

    /// Returns all stored attendance records.
    pub fn records(&self) -> &[AttendanceRecord] {
        &self.attendance
    }

    /// Looks up a stored employee by id.
    pub fn employee(&self, employee_id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == employee_id)
    }
}

impl RosterProvider for MemoryStore {
    fn list_employees(&self, location: &str) -> EngineResult<Vec<Employee>> {
        Ok(self
            .employees
            .iter()
            .filter(|e| e.location == location)
            .cloned()
            .collect())
    }

    fn list_all_employees(&self) -> EngineResult<Vec<Employee>> {
        Ok(self.employees.clone())
    }

    fn update_monthly_record(
        &mut self,
        employee_id: &str,
        record: MonthlyLeaveRecord,
    ) -> EngineResult<()> {
        let employee = self
            .employees
            .iter_mut()
            .find(|e| e.id == employee_id)
            .ok_or_else(|| EngineError::UnknownEmployee {
                employee_id: employee_id.to_string(),
            })?;
        employee.upsert_monthly_record(record);
        Ok(())
    }
}

impl AttendanceStore for MemoryStore {
    fn list_attendance_on(
        &self,
        date: NaiveDate,
        location: &str,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        Ok(self
            .attendance
            .iter()
            .filter(|r| r.date == date && r.location == location)
            .cloned()
            .collect())
    }

    fn list_attendance_in_month(
        &self,
        month: u32,
        year: i32,
        location: &str,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        Ok(self
            .attendance
            .iter()
            .filter(|r| {
                r.date.month() == month && r.date.year() == year && r.location == location
            })
            .cloned()
            .collect())
    }

    fn commit_batch(&mut self, entries: &[AttendanceEntry]) -> EngineResult<CommitOutcome> {
        let conflicts: Vec<String> = entries
            .iter()
            .filter(|entry| {
                self.attendance
                    .iter()
                    .any(|r| r.employee_id == entry.employee_id && r.date == entry.date)
            })
            .map(|entry| entry.employee_id.clone())
            .collect();
        if !conflicts.is_empty() {
            return Ok(CommitOutcome::Conflict(conflicts));
        }

        let records: Vec<AttendanceRecord> = entries
            .iter()
            .map(|entry| AttendanceRecord::from_entry(entry, Uuid::new_v4()))
            .collect();
        self.attendance.extend(records.iter().cloned());
        Ok(CommitOutcome::Accepted(records))
    }

    fn update_status(
        &mut self,
        record_id: Uuid,
        new_status: AttendanceStatus,
    ) -> EngineResult<AttendanceRecord> {
        let record = self
            .attendance
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or(EngineError::RecordNotFound { record_id })?;
        record.status = new_status;
        Ok(record.clone())
    }
}

impl PolicyProvider for MemoryStore {
    fn leave_policy(&self) -> EngineResult<LeavePolicy> {
        Ok(self.policy.clone())
    }

    fn update_leave_policy(&mut self, update: &LeavePolicyUpdate) -> EngineResult<LeavePolicy> {
        self.policy = self.policy.apply_update(update)?;
        Ok(self.policy.clone())
    }
}

impl AdvanceProvider for MemoryStore {
    fn list_advances(&self, employee_id: &str) -> EngineResult<Vec<Advance>> {
        Ok(self
            .advances
            .iter()
            .filter(|a| a.employee_id == employee_id)
            .cloned()
            .collect())
    }
}
