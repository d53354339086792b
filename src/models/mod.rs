//! Core data models for the leave and attendance engine.
//!
//! This module contains all the domain models used throughout the engine.

mod advance;
mod attendance;
mod employee;
mod leave;
mod salary_report;

pub use advance::{Advance, current_advance};
pub use attendance::{AttendanceEntry, AttendanceRecord, AttendanceStatus};
pub use employee::{Employee, PaidLeaveSummary};
pub use leave::{LeaveViolation, MonthlyLeaveRecord};
pub use salary_report::{DayCounts, SalaryReport, SalaryReportLine};
