//! Salary computation from monthly day counts.
//!
//! This module turns one employee's aggregated day counts into a salary
//! report line: per-day rate, gross, net, and the total payable after
//! the month's advance.

use rust_decimal::Decimal;

use crate::config::LeavePolicy;
use crate::error::EngineResult;
use crate::models::{DayCounts, Employee, SalaryReportLine};

use super::monthly_aggregate::days_in_month;

/// Computes the salary line for one employee and month.
///
/// `per_day_rate = salary / days_in_month`. Present days pay the full
/// rate, half days pay the rate scaled by `1 - half_day_deduction`, and
/// leave days pay the full rate. Absent and unrecorded days contribute
/// nothing. No further deductions are modeled, so net equals gross; the
/// total payable is net minus `advance_for_month`.
///
/// All values carry full `Decimal` precision; rounding is applied only
/// at presentation time via [`SalaryReportLine::rounded`].
///
/// # Arguments
///
/// * `employee` - The employee, supplying the monthly base salary
/// * `counts` - The employee's day counts for the month
/// * `policy` - The active leave policy, for the half-day deduction
/// * `advance_for_month` - The advance to deduct from the total
/// * `month` - The report month (1-12)
/// * `year` - The report year
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::compute_salary;
/// use leave_engine::config::LeavePolicy;
/// use leave_engine::models::{DayCounts, Employee, PaidLeaveSummary};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     employee_code: "EMP-0001".to_string(),
///     name: "Asha Verma".to_string(),
///     location: "pune".to_string(),
///     department: "operations".to_string(),
///     designation: "technician".to_string(),
///     salary: Decimal::from(30000),
///     joining_date: NaiveDate::from_ymd_opt(2023, 4, 1).unwrap(),
///     paid_leaves: PaidLeaveSummary::default(),
///     monthly_leaves: vec![],
/// };
/// let counts = DayCounts {
///     present: 25,
///     absent: 2,
///     half_day: 2,
///     leave: 1,
///     unrecorded: 0,
/// };
///
/// let line = compute_salary(
///     &employee,
///     &counts,
///     &LeavePolicy::default(),
///     Decimal::from(2000),
///     6,
///     2025,
/// )
/// .unwrap();
/// assert_eq!(line.gross_salary, Decimal::from(27000));
/// assert_eq!(line.total_salary, Decimal::from(25000));
/// ```
pub fn compute_salary(
    employee: &Employee,
    counts: &DayCounts,
    policy: &LeavePolicy,
    advance_for_month: Decimal,
    month: u32,
    year: i32,
) -> EngineResult<SalaryReportLine> {
    let days = days_in_month(year, month)?;
    let per_day_rate = employee.salary / Decimal::from(days);

    let half_day_factor = Decimal::ONE - policy.half_day_deduction;
    let payable_days = Decimal::from(counts.present)
        + Decimal::from(counts.half_day) * half_day_factor
        + Decimal::from(counts.leave);

    let gross_salary = per_day_rate * payable_days;
    let net_salary = gross_salary;
    let total_salary = net_salary - advance_for_month;

    Ok(SalaryReportLine {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        month,
        year,
        counts: *counts,
        gross_salary,
        net_salary,
        advance: advance_for_month,
        total_salary,
    })
}
