//! Collaborator contracts for the engine.
//!
//! The engine performs no I/O of its own: rosters, attendance history,
//! policy, and advances are fetched through these traits, and committed
//! batches and updated leave records are persisted through them. The
//! surrounding application supplies implementations backed by its data
//! layer; [`MemoryStore`] is the in-memory reference implementation used
//! in tests and benchmarks.

mod memory;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::config::{LeavePolicy, LeavePolicyUpdate};
use crate::error::EngineResult;
use crate::models::{
    Advance, AttendanceEntry, AttendanceRecord, AttendanceStatus, Employee, MonthlyLeaveRecord,
};

pub use memory::MemoryStore;

/// The outcome of committing an attendance batch.
///
/// The authoritative store re-checks the one-record-per-(employee, date)
/// constraint at commit time; a concurrent commit that got there first
/// surfaces as `Conflict` with the affected employees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The batch was stored; one record per submitted entry.
    Accepted(Vec<AttendanceRecord>),
    /// The batch was rejected; these employees already had a record.
    Conflict(Vec<String>),
}

/// Supplies employee rosters and persists updated leave records.
pub trait RosterProvider {
    /// Lists the employees rostered at a location, including each
    /// employee's monthly leave history.
    fn list_employees(&self, location: &str) -> EngineResult<Vec<Employee>>;

    /// Lists every active employee across all locations.
    fn list_all_employees(&self) -> EngineResult<Vec<Employee>>;

    /// Persists an updated monthly leave record for an employee.
    fn update_monthly_record(
        &mut self,
        employee_id: &str,
        record: MonthlyLeaveRecord,
    ) -> EngineResult<()>;
}

/// Stores committed attendance records.
pub trait AttendanceStore {
    /// Lists the attendance recorded for a date at a location.
    fn list_attendance_on(
        &self,
        date: NaiveDate,
        location: &str,
    ) -> EngineResult<Vec<AttendanceRecord>>;

    /// Lists the attendance recorded for a month at a location.
    fn list_attendance_in_month(
        &self,
        month: u32,
        year: i32,
        location: &str,
    ) -> EngineResult<Vec<AttendanceRecord>>;

    /// Commits a batch of entries, enforcing the per-(employee, date)
    /// uniqueness constraint.
    fn commit_batch(&mut self, entries: &[AttendanceEntry]) -> EngineResult<CommitOutcome>;

    /// Edits the status of an existing record. Records are never
    /// deleted.
    fn update_status(
        &mut self,
        record_id: Uuid,
        new_status: AttendanceStatus,
    ) -> EngineResult<AttendanceRecord>;
}

/// Supplies and updates the organization's leave policy.
pub trait PolicyProvider {
    /// Returns the active leave policy.
    fn leave_policy(&self) -> EngineResult<LeavePolicy>;

    /// Applies a partial policy update and returns the updated policy.
    fn update_leave_policy(&mut self, update: &LeavePolicyUpdate) -> EngineResult<LeavePolicy>;
}

/// Supplies salary advances.
pub trait AdvanceProvider {
    /// Lists the advances granted to an employee.
    fn list_advances(&self, employee_id: &str) -> EngineResult<Vec<Advance>>;
}
