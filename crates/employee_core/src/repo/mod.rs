//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage contract the employee service depends on.
//! - Isolate SQLite query details from service orchestration.
//! - Provide an in-memory adapter satisfying the same contract.
//!
//! # Invariants
//! - Every adapter rejects a write that would duplicate an email with
//!   `RepoError::DuplicateEmail`.
//! - Lookups report absence as `Ok(None)`, never as an error.

pub mod employee_repo;
pub mod memory_repo;
