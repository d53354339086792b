//! Integration tests for the leave and attendance engine.
//!
//! This test suite drives the engine end-to-end through the in-memory
//! store, covering:
//! - Bulk attendance marking with the default-present rule
//! - Conflict fail-closed behavior
//! - The leave balance gate for full and half days
//! - Leave decrements on committed batches
//! - Monthly aggregation and the attendance grid
//! - Salary reporting with advances
//! - Policy updates and explicit reallocation

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use leave_engine::calculation::ReallocationApproval;
use leave_engine::config::{LeavePolicy, LeavePolicyUpdate};
use leave_engine::error::EngineError;
use leave_engine::models::{
    Advance, AttendanceStatus, Employee, MonthlyLeaveRecord, PaidLeaveSummary,
};
use leave_engine::provider::MemoryStore;
use leave_engine::service::Engine;

// =============================================================================
// Test Helpers
// =============================================================================

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn make_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

fn create_employee(id: &str, location: &str, salary: &str) -> Employee {
    Employee {
        id: id.to_string(),
        employee_code: format!("EMP-{id}"),
        name: format!("Employee {id}"),
        location: location.to_string(),
        department: "operations".to_string(),
        designation: "technician".to_string(),
        salary: dec(salary),
        joining_date: NaiveDate::from_ymd_opt(2023, 4, 1).unwrap(),
        paid_leaves: PaidLeaveSummary::default(),
        monthly_leaves: vec![],
    }
}

fn create_engine(ids: &[&str]) -> Engine<MemoryStore> {
    let mut store = MemoryStore::new(LeavePolicy::default());
    for id in ids {
        store.add_employee(create_employee(id, "pune", "30000"));
    }
    Engine::new(store)
}

fn statuses(pairs: &[(&str, AttendanceStatus)]) -> HashMap<String, AttendanceStatus> {
    pairs
        .iter()
        .map(|(id, status)| (id.to_string(), *status))
        .collect()
}

// =============================================================================
// Bulk marking
// =============================================================================

#[test]
fn test_bulk_marking_covers_whole_roster() {
    let mut engine = create_engine(&["emp_001", "emp_002", "emp_003", "emp_004"]);
    let explicit = statuses(&[
        ("emp_002", AttendanceStatus::Absent),
        ("emp_003", AttendanceStatus::HalfDay),
    ]);

    let records = engine
        .mark_bulk_attendance(make_date("2025-07-14"), "pune", &explicit)
        .unwrap();

    assert_eq!(records.len(), 4);
    let by_id: HashMap<&str, AttendanceStatus> = records
        .iter()
        .map(|r| (r.employee_id.as_str(), r.status))
        .collect();
    assert_eq!(by_id["emp_001"], AttendanceStatus::Present);
    assert_eq!(by_id["emp_002"], AttendanceStatus::Absent);
    assert_eq!(by_id["emp_003"], AttendanceStatus::HalfDay);
    assert_eq!(by_id["emp_004"], AttendanceStatus::Present);
}

#[test]
fn test_bulk_marking_only_touches_requested_location() {
    let mut store = MemoryStore::new(LeavePolicy::default());
    store.add_employee(create_employee("emp_001", "pune", "30000"));
    store.add_employee(create_employee("emp_002", "mumbai", "30000"));
    let mut engine = Engine::new(store);

    let records = engine
        .mark_bulk_attendance(make_date("2025-07-14"), "pune", &HashMap::new())
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].employee_id, "emp_001");
}

#[test]
fn test_remarking_same_date_rejects_whole_batch() {
    let mut engine = create_engine(&["emp_001", "emp_002"]);
    let date = make_date("2025-07-14");
    engine
        .mark_bulk_attendance(date, "pune", &HashMap::new())
        .unwrap();

    let result = engine.mark_bulk_attendance(
        date,
        "pune",
        &statuses(&[("emp_001", AttendanceStatus::Absent)]),
    );

    match result.unwrap_err() {
        EngineError::AlreadyMarked { employee_ids, .. } => {
            assert_eq!(
                employee_ids,
                vec!["emp_001".to_string(), "emp_002".to_string()]
            );
        }
        other => panic!("Expected AlreadyMarked, got {:?}", other),
    }
    assert_eq!(engine.collaborators().records().len(), 2);
}

#[test]
fn test_marking_next_day_succeeds_after_conflict() {
    let mut engine = create_engine(&["emp_001"]);
    engine
        .mark_bulk_attendance(make_date("2025-07-14"), "pune", &HashMap::new())
        .unwrap();

    let records = engine
        .mark_bulk_attendance(make_date("2025-07-15"), "pune", &HashMap::new())
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(engine.collaborators().records().len(), 2);
}

// =============================================================================
// Leave gate and decrements
// =============================================================================

#[test]
fn test_leave_gate_blocks_exhausted_balance() {
    let mut engine = create_engine(&["emp_001"]);
    let explicit = statuses(&[("emp_001", AttendanceStatus::Leave)]);

    // Default allocation is 2 days; two leave days drain it.
    engine
        .mark_bulk_attendance(make_date("2025-07-01"), "pune", &explicit)
        .unwrap();
    engine
        .mark_bulk_attendance(make_date("2025-07-02"), "pune", &explicit)
        .unwrap();
    let result = engine.mark_bulk_attendance(make_date("2025-07-03"), "pune", &explicit);

    match result.unwrap_err() {
        EngineError::InsufficientLeave { violations } => {
            assert_eq!(violations.len(), 1);
            assert_eq!(violations[0].employee_id, "emp_001");
            assert_eq!(violations[0].required, dec("1"));
            assert_eq!(violations[0].closing, dec("0.0"));
        }
        other => panic!("Expected InsufficientLeave, got {:?}", other),
    }
    assert_eq!(engine.collaborators().records().len(), 2);
}

#[test]
fn test_half_day_gate_follows_policy_deduction() {
    let mut store = MemoryStore::new(LeavePolicy::default());
    let mut employee = create_employee("emp_001", "pune", "30000");
    // Closing balance 0.4: below both the full-day and half-day gates.
    let mut record = MonthlyLeaveRecord::new(2025, 7, dec("2"), Decimal::ZERO);
    record.consume(dec("1.6"));
    employee.monthly_leaves = vec![record];
    store.add_employee(employee);
    let mut engine = Engine::new(store);

    let full = engine.mark_bulk_attendance(
        make_date("2025-07-14"),
        "pune",
        &statuses(&[("emp_001", AttendanceStatus::Leave)]),
    );
    let half = engine.mark_bulk_attendance(
        make_date("2025-07-14"),
        "pune",
        &statuses(&[("emp_001", AttendanceStatus::HalfDay)]),
    );

    assert!(matches!(
        full.unwrap_err(),
        EngineError::InsufficientLeave { .. }
    ));
    assert!(matches!(
        half.unwrap_err(),
        EngineError::InsufficientLeave { .. }
    ));
}

#[test]
fn test_leave_decrement_rolls_into_balance_indicator() {
    let mut engine = create_engine(&["emp_001"]);
    engine
        .mark_bulk_attendance(
            make_date("2025-07-14"),
            "pune",
            &statuses(&[("emp_001", AttendanceStatus::Leave)]),
        )
        .unwrap();

    let balances = engine.leave_balances(7, 2025, "pune").unwrap();

    assert_eq!(balances[0].balance.opening, dec("2.0"));
    assert_eq!(balances[0].balance.closing, dec("1.0"));
}

// =============================================================================
// Attendance grid
// =============================================================================

#[test]
fn test_attendance_sheet_tracks_day_types() {
    let mut engine = create_engine(&["emp_001", "emp_002"]);
    engine
        .mark_bulk_attendance(
            make_date("2025-07-01"),
            "pune",
            &statuses(&[("emp_001", AttendanceStatus::Leave)]),
        )
        .unwrap();
    engine
        .mark_bulk_attendance(
            make_date("2025-07-02"),
            "pune",
            &statuses(&[("emp_002", AttendanceStatus::Absent)]),
        )
        .unwrap();

    let sheet = engine.attendance_sheet(7, 2025, "pune").unwrap();

    let first = sheet.employee_counts("emp_001").unwrap();
    assert_eq!(first.leave, 1);
    assert_eq!(first.present, 1);
    assert_eq!(first.unrecorded, 29);

    let second = sheet.employee_counts("emp_002").unwrap();
    assert_eq!(second.present, 1);
    assert_eq!(second.absent, 1);

    let day_one = sheet.per_day.get(&make_date("2025-07-01")).unwrap();
    assert_eq!(day_one.present, 1);
    assert_eq!(day_one.leave, 1);
    assert_eq!(sheet.sundays.len(), 4);
}

// =============================================================================
// Salary reporting
// =============================================================================

/// The reference month: 30 days, counts 25/2/2/1, advance 2000.
#[test]
fn test_salary_report_end_to_end() {
    let mut store = MemoryStore::new(LeavePolicy::default());
    let mut employee = create_employee("emp_001", "pune", "30000");
    // Give the employee enough balance for a leave day plus half days.
    employee.monthly_leaves = vec![MonthlyLeaveRecord::new(2025, 6, dec("2"), dec("2"))];
    store.add_employee(employee);
    store.add_advance(Advance {
        employee_id: "emp_001".to_string(),
        month: 6,
        year: 2025,
        amount: dec("2000"),
    });
    let mut engine = Engine::new(store);

    // June 2025: 25 present, 2 half-day, 2 absent, 1 leave.
    let mut day = 1;
    for status in [
        vec![AttendanceStatus::HalfDay; 2],
        vec![AttendanceStatus::Absent; 2],
        vec![AttendanceStatus::Leave; 1],
    ]
    .concat()
    {
        engine
            .mark_bulk_attendance(
                NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
                "pune",
                &statuses(&[("emp_001", status)]),
            )
            .unwrap();
        day += 1;
    }
    for present_day in day..=30 {
        engine
            .mark_bulk_attendance(
                NaiveDate::from_ymd_opt(2025, 6, present_day).unwrap(),
                "pune",
                &HashMap::new(),
            )
            .unwrap();
    }

    let report = engine.salary_report(6, 2025, "pune").unwrap();

    assert_eq!(report.lines.len(), 1);
    let line = report.lines[0].rounded();
    assert_eq!(line.counts.present, 25);
    assert_eq!(line.counts.half_day, 2);
    assert_eq!(line.counts.absent, 2);
    assert_eq!(line.counts.leave, 1);
    assert_eq!(line.counts.unrecorded, 0);
    // per-day rate 1000; gross 1000 * (25 + 2*0.5 + 1) = 27000.
    assert_eq!(line.gross_salary, dec("27000.00"));
    assert_eq!(line.net_salary, dec("27000.00"));
    assert_eq!(line.advance, dec("2000.00"));
    assert_eq!(line.total_salary, dec("25000.00"));
}

#[test]
fn test_salary_report_without_records_pays_nothing() {
    let engine = create_engine(&["emp_001"]);

    let report = engine.salary_report(6, 2025, "pune").unwrap();

    let line = &report.lines[0];
    assert_eq!(line.counts.unrecorded, 30);
    assert_eq!(line.gross_salary, Decimal::ZERO);
    assert_eq!(line.total_salary, Decimal::ZERO);
}

#[test]
fn test_salary_report_uses_most_recent_advance() {
    let mut store = MemoryStore::new(LeavePolicy::default());
    store.add_employee(create_employee("emp_001", "pune", "30000"));
    store.add_advance(Advance {
        employee_id: "emp_001".to_string(),
        month: 4,
        year: 2025,
        amount: dec("500"),
    });
    store.add_advance(Advance {
        employee_id: "emp_001".to_string(),
        month: 6,
        year: 2025,
        amount: dec("1200"),
    });
    let engine = Engine::new(store);

    let report = engine.salary_report(6, 2025, "pune").unwrap();

    assert_eq!(report.lines[0].advance, dec("1200"));
}

// =============================================================================
// Policy lifecycle
// =============================================================================

#[test]
fn test_policy_update_then_explicit_reallocation() {
    let mut engine = create_engine(&["emp_001"]);

    // Consume a day under the old policy first.
    engine
        .mark_bulk_attendance(
            make_date("2025-07-14"),
            "pune",
            &statuses(&[("emp_001", AttendanceStatus::Leave)]),
        )
        .unwrap();

    engine
        .update_policy(&LeavePolicyUpdate {
            paid_leaves_per_year: Some(36),
            ..LeavePolicyUpdate::default()
        })
        .unwrap();

    // The settings update alone must not move balances.
    let before = engine.leave_balances(7, 2025, "pune").unwrap();
    assert_eq!(before[0].balance.closing, dec("1.0"));

    let touched = engine
        .reapply_policy_allocations(2025, 7, ReallocationApproval::confirm())
        .unwrap();
    assert_eq!(touched, 1);

    // New allocation 3, one day already used.
    let after = engine.leave_balances(7, 2025, "pune").unwrap();
    assert_eq!(after[0].balance.opening, dec("3.0"));
    assert_eq!(after[0].balance.closing, dec("2.0"));
}

#[test]
fn test_invalid_policy_update_is_rejected() {
    let mut engine = create_engine(&["emp_001"]);

    let result = engine.update_policy(&LeavePolicyUpdate {
        half_day_deduction: Some(dec("1.5")),
        ..LeavePolicyUpdate::default()
    });

    assert!(matches!(
        result.unwrap_err(),
        EngineError::InvalidPolicy { .. }
    ));
}

// =============================================================================
// Status edits
// =============================================================================

#[test]
fn test_status_edit_persists() {
    let mut engine = create_engine(&["emp_001"]);
    let records = engine
        .mark_bulk_attendance(make_date("2025-07-14"), "pune", &HashMap::new())
        .unwrap();

    engine
        .update_attendance_status(records[0].id, AttendanceStatus::Absent)
        .unwrap();

    let sheet = engine.attendance_sheet(7, 2025, "pune").unwrap();
    assert_eq!(sheet.employee_counts("emp_001").unwrap().absent, 1);
    assert_eq!(sheet.employee_counts("emp_001").unwrap().present, 0);
}
