//! Calculation logic for the leave and attendance engine.
//!
//! This module contains the four computation components: the leave
//! ledger (monthly record resolution, opening/closing balances, the
//! leave gate, roll-forward, and policy reallocation), the attendance
//! reconciler (bulk batch building with the default-present rule), the
//! monthly aggregator, and the salary calculator.

mod leave_ledger;
mod monthly_aggregate;
mod reconcile;
mod salary;

pub use leave_ledger::{
    BalanceSnapshot, EmployeeReallocation, LedgerWarning, ReallocationApproval, balance_permits,
    opening_closing, reallocate_for_policy_change, resolve_monthly_record, roll_forward,
};
pub use monthly_aggregate::{MonthlyAttendance, aggregate, days_in_month};
pub use reconcile::build_batch;
pub use salary::compute_salary;
