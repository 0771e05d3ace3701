//! Employee domain model.
//!
//! # Responsibility
//! - Define the single record type shared by service, storage and transport.
//! - Keep the JSON wire shape stable (`id`, `firstName`, `lastName`, `email`).
//!
//! # Invariants
//! - `id` is `None` until storage assigns one and never changes afterwards.
//! - `email` is unique across persisted employees; the service and storage
//!   layers enforce it, the model does not.

use serde::{Deserialize, Serialize};

/// Storage-assigned identifier of a persisted employee.
pub type EmployeeId = i64;

/// Person record managed by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Assigned on first save. Omitted from JSON while unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EmployeeId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Employee {
    /// Creates an unsaved employee candidate.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    /// Creates an employee with a known storage id.
    ///
    /// Used by read paths and by callers that address an existing record.
    pub fn with_id(
        id: EmployeeId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id),
            ..Self::new(first_name, last_name, email)
        }
    }

    /// Returns whether storage has assigned an id to this record.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
