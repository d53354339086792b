//! Leave accrual and attendance reconciliation engine for HR administration.
//!
//! This crate provides the domain logic behind monthly paid-leave quotas,
//! bulk attendance marking, monthly attendance aggregation, and salary
//! computation. Rosters, policy, and attendance history are supplied by
//! collaborator traits; the engine itself performs no I/O.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod provider;
pub mod service;
