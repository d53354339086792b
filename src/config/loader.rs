//! Policy configuration loading.
//!
//! This module provides the [`PolicyLoader`] type for loading the leave
//! policy from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::LeavePolicy;

/// Loads and provides access to the leave policy.
///
/// The `PolicyLoader` reads `leave_policy.yaml` from a configuration
/// directory and validates it on load.
///
/// # Directory Structure
///
/// ```text
/// config/
/// └── leave_policy.yaml   # Yearly quota and half-day deduction
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_engine::config::PolicyLoader;
///
/// let loader = PolicyLoader::load("./config").unwrap();
/// println!("Monthly allocation: {}", loader.policy().monthly_allocation());
/// ```
#[derive(Debug, Clone)]
pub struct PolicyLoader {
    policy: LeavePolicy,
}

impl PolicyLoader {
    /// Loads the policy from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config")
    ///
    /// # Returns
    ///
    /// Returns a `PolicyLoader` instance on success, or an error if:
    /// - `leave_policy.yaml` is missing
    /// - The file contains invalid YAML
    /// - The policy fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let policy_path = path.as_ref().join("leave_policy.yaml");
        let path_str = policy_path.display().to_string();

        let content = fs::read_to_string(&policy_path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let policy: LeavePolicy =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        policy.validate()?;

        Ok(Self { policy })
    }

    /// Returns the loaded policy.
    pub fn policy(&self) -> &LeavePolicy {
        &self.policy
    }
}
