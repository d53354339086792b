//! Salary advance model.
//!
//! Advances are recorded per employee and month; the most recent entry by
//! (year, month) is the one deducted from the month's payable salary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A salary advance granted to an employee for a given month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advance {
    /// The employee the advance was granted to.
    pub employee_id: String,
    /// The month the advance applies to (1-12).
    pub month: u32,
    /// The year the advance applies to.
    pub year: i32,
    /// The advance amount.
    pub amount: Decimal,
}

/// Returns the current advance: the entry with the most recent
/// (year, month), ties broken by year then month, descending.
///
/// # Examples
///
/// ```
/// use leave_engine::models::{current_advance, Advance};
/// use rust_decimal::Decimal;
///
/// let advances = vec![
///     Advance {
///         employee_id: "emp_001".to_string(),
///         month: 5,
///         year: 2025,
///         amount: Decimal::from(1500),
///     },
///     Advance {
///         employee_id: "emp_001".to_string(),
///         month: 7,
///         year: 2025,
///         amount: Decimal::from(2000),
///     },
/// ];
/// assert_eq!(current_advance(&advances).unwrap().amount, Decimal::from(2000));
/// ```
pub fn current_advance(advances: &[Advance]) -> Option<&Advance> {
    advances.iter().max_by_key(|a| (a.year, a.month))
}
