//! Leave policy configuration for the engine.
//!
//! This module provides functionality to load the organization's leave
//! policy from a YAML file and to apply partial settings updates.
//!
//! # Example
//!
//! ```no_run
//! use leave_engine::config::PolicyLoader;
//!
//! let loader = PolicyLoader::load("./config").unwrap();
//! println!("Paid leaves per year: {}", loader.policy().paid_leaves_per_year);
//! ```

mod loader;
mod types;

pub use loader::PolicyLoader;
pub use types::{LeavePolicy, LeavePolicyUpdate};
