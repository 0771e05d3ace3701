//! Service layer entry points for core use-cases.
//!
//! # Responsibility
//! - Expose use-case APIs over repository contracts.
//! - Own the email uniqueness rule on create.

pub mod employee_service;
