//! Domain model for employee records.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Persisted employees are identified by a storage-assigned `EmployeeId`.
//! - Email is unique across all persisted employees.
//! - Deletion is a hard delete; no tombstones are kept.

pub mod employee;
