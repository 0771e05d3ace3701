//! HTTP transport for the employee registry.
//!
//! Maps requests onto `employee_core::EmployeeService` calls and service
//! results onto status codes and JSON bodies.

pub mod api;
pub mod config;
pub mod error;

pub use api::{router, AppState};
pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
