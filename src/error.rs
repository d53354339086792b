//! Error types for the leave and attendance engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during leave accrual,
//! attendance reconciliation, and salary computation.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::LeaveViolation;

/// The main error type for the leave and attendance engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use leave_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/leave_policy.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/leave_policy.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A leave policy field was invalid or inconsistent.
    #[error("Invalid leave policy field '{field}': {message}")]
    InvalidPolicy {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// One or more roster employees already have an attendance record for
    /// the target date. The batch is rejected as a whole; no partial
    /// commit occurs.
    #[error("Attendance already recorded on {date} for: {}", .employee_ids.join(", "))]
    AlreadyMarked {
        /// The date the batch was built for.
        date: NaiveDate,
        /// The employees that already have a record for that date.
        employee_ids: Vec<String>,
    },

    /// One or more employees were selected for a status their closing
    /// leave balance cannot cover. The batch is rejected as a whole.
    #[error("Insufficient leave balance for: {}", format_violations(.violations))]
    InsufficientLeave {
        /// The per-employee balance violations.
        violations: Vec<LeaveViolation>,
    },

    /// An explicit status selection referenced an employee that is not on
    /// the roster for the target location.
    #[error("Employee not on roster: {employee_id}")]
    UnknownEmployee {
        /// The selected employee id.
        employee_id: String,
    },

    /// Two attendance records exist for the same employee and date. This
    /// is a stored-data integrity violation the aggregator refuses to
    /// resolve by picking one.
    #[error("Duplicate attendance records for employee '{employee_id}' on {date}")]
    DuplicateAttendance {
        /// The employee with duplicate records.
        employee_id: String,
        /// The date covered by more than one record.
        date: NaiveDate,
    },

    /// No attendance record exists with the given id.
    #[error("Attendance record not found: {record_id}")]
    RecordNotFound {
        /// The id that was not found.
        record_id: Uuid,
    },

    /// A (year, month) pair did not describe a representable calendar
    /// month.
    #[error("Invalid calendar month: {year}-{month}")]
    InvalidDate {
        /// The requested year.
        year: i32,
        /// The requested month (1-12).
        month: u32,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

fn format_violations(violations: &[LeaveViolation]) -> String {
    violations
        .iter()
        .map(|v| {
            format!(
                "{} (requires {}, closing {})",
                v.employee_id, v.required, v.closing
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}
