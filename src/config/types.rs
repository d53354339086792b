//! Leave policy configuration types.
//!
//! This module contains the strongly-typed policy structure deserialized
//! from the YAML configuration file, and the partial-update shape used by
//! the settings screen.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

fn default_highlight_duration() -> u32 {
    7
}

/// Process-wide leave policy.
///
/// The policy drives monthly quota synthesis and the half-day leave
/// deduction. `highlight_duration` is carried for the presentation layer
/// and never consulted by any computation here.
///
/// # Example
///
/// ```
/// use leave_engine::config::LeavePolicy;
/// use rust_decimal::Decimal;
///
/// let policy = LeavePolicy::default();
/// assert_eq!(policy.monthly_allocation(), Decimal::from(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeavePolicy {
    /// Paid leave days granted per year.
    pub paid_leaves_per_year: u32,
    /// Fraction of a leave day a half-day status deducts (0-1).
    pub half_day_deduction: Decimal,
    /// How many days recently-joined employees stay highlighted in
    /// listings. Presentation hint only.
    #[serde(default = "default_highlight_duration")]
    pub highlight_duration: u32,
}

impl Default for LeavePolicy {
    fn default() -> Self {
        Self {
            paid_leaves_per_year: 24,
            half_day_deduction: Decimal::new(5, 1),
            highlight_duration: default_highlight_duration(),
        }
    }
}

impl LeavePolicy {
    /// The default monthly quota: `paid_leaves_per_year / 12`, floored.
    pub fn monthly_allocation(&self) -> Decimal {
        Decimal::from(self.paid_leaves_per_year / 12)
    }

    /// Validates the policy fields.
    ///
    /// # Returns
    ///
    /// `Ok(())` for a usable policy, or `InvalidPolicy` if
    /// `half_day_deduction` falls outside the 0-1 range.
    pub fn validate(&self) -> EngineResult<()> {
        if self.half_day_deduction < Decimal::ZERO || self.half_day_deduction > Decimal::ONE {
            return Err(EngineError::InvalidPolicy {
                field: "half_day_deduction".to_string(),
                message: "must be between 0 and 1".to_string(),
            });
        }
        Ok(())
    }

    /// Returns a copy with the update's populated fields applied.
    pub fn apply_update(&self, update: &LeavePolicyUpdate) -> EngineResult<LeavePolicy> {
        let updated = LeavePolicy {
            paid_leaves_per_year: update
                .paid_leaves_per_year
                .unwrap_or(self.paid_leaves_per_year),
            half_day_deduction: update.half_day_deduction.unwrap_or(self.half_day_deduction),
            highlight_duration: update.highlight_duration.unwrap_or(self.highlight_duration),
        };
        updated.validate()?;
        Ok(updated)
    }
}

/// A partial policy update; unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeavePolicyUpdate {
    /// New yearly paid-leave quota, if changing.
    pub paid_leaves_per_year: Option<u32>,
    /// New half-day deduction fraction, if changing.
    pub half_day_deduction: Option<Decimal>,
    /// New highlight duration, if changing.
    pub highlight_duration: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_policy_is_valid() {
        let policy = LeavePolicy::default();

        assert!(policy.validate().is_ok());
        assert_eq!(policy.paid_leaves_per_year, 24);
        assert_eq!(policy.half_day_deduction, dec("0.5"));
    }

    #[test]
    fn test_monthly_allocation_floors() {
        let policy = LeavePolicy {
            paid_leaves_per_year: 30,
            ..LeavePolicy::default()
        };

        // 30 / 12 = 2.5, floored to 2
        assert_eq!(policy.monthly_allocation(), dec("2"));
    }

    #[test]
    fn test_monthly_allocation_for_default_policy() {
        assert_eq!(LeavePolicy::default().monthly_allocation(), dec("2"));
    }

    #[test]
    fn test_validate_rejects_deduction_above_one() {
        let policy = LeavePolicy {
            half_day_deduction: dec("1.5"),
            ..LeavePolicy::default()
        };

        let result = policy.validate();
        assert!(result.is_err());
        match result.unwrap_err() {
            EngineError::InvalidPolicy { field, .. } => {
                assert_eq!(field, "half_day_deduction");
            }
            other => panic!("Expected InvalidPolicy, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_negative_deduction() {
        let policy = LeavePolicy {
            half_day_deduction: dec("-0.5"),
            ..LeavePolicy::default()
        };

        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_boundary_values() {
        let zero = LeavePolicy {
            half_day_deduction: Decimal::ZERO,
            ..LeavePolicy::default()
        };
        let one = LeavePolicy {
            half_day_deduction: Decimal::ONE,
            ..LeavePolicy::default()
        };

        assert!(zero.validate().is_ok());
        assert!(one.validate().is_ok());
    }

    #[test]
    fn test_apply_update_changes_only_set_fields() {
        let policy = LeavePolicy::default();
        let update = LeavePolicyUpdate {
            paid_leaves_per_year: Some(36),
            ..LeavePolicyUpdate::default()
        };

        let updated = policy.apply_update(&update).unwrap();

        assert_eq!(updated.paid_leaves_per_year, 36);
        assert_eq!(updated.half_day_deduction, policy.half_day_deduction);
        assert_eq!(updated.highlight_duration, policy.highlight_duration);
    }

    #[test]
    fn test_apply_update_validates_result() {
        let policy = LeavePolicy::default();
        let update = LeavePolicyUpdate {
            half_day_deduction: Some(dec("2")),
            ..LeavePolicyUpdate::default()
        };

        assert!(policy.apply_update(&update).is_err());
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let yaml = "paid_leaves_per_year: 24\nhalf_day_deduction: \"0.5\"\n";

        let policy: LeavePolicy = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(policy.paid_leaves_per_year, 24);
        assert_eq!(policy.half_day_deduction, dec("0.5"));
        // Omitted field falls back to the default.
        assert_eq!(policy.highlight_duration, 7);
    }
}
