//! Employee use-case service.
//!
//! # Responsibility
//! - Provide CRUD entry points for transport callers.
//! - Reject creates whose email is already on file.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - `create` never persists a second employee with an existing email.
//! - Absence on lookups is `Ok(None)`, never an error.
//! - Service layer remains storage-agnostic.

use crate::model::employee::{Employee, EmployeeId};
use crate::repo::employee_repo::{EmployeeRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for employee use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Another employee already owns this email.
    DuplicateResource { email: String },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateResource { email } => {
                write!(f, "employee already exists with given email: {email}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::DuplicateResource { .. } => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::DuplicateEmail(email) => Self::DuplicateResource { email },
            other => Self::Repo(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Use-case service over any `EmployeeRepository`.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new employee when its email is not on file yet.
    ///
    /// Any id on `candidate` is ignored; storage assigns a fresh one.
    ///
    /// # Errors
    /// - `DuplicateResource` when the email is already stored, either found by
    ///   the pre-check or reported by storage on a concurrent insert.
    pub fn create(&self, candidate: &Employee) -> ServiceResult<Employee> {
        if self.repo.find_by_email(&candidate.email)?.is_some() {
            warn!("event=employee_create module=service status=rejected reason=duplicate_email");
            return Err(ServiceError::DuplicateResource {
                email: candidate.email.clone(),
            });
        }

        let unsaved = Employee {
            id: None,
            ..candidate.clone()
        };
        let saved = self.repo.save(&unsaved)?;
        info!(
            "event=employee_create module=service status=ok id={}",
            saved.id.unwrap_or_default()
        );
        Ok(saved)
    }

    /// Returns every stored employee in storage order.
    pub fn list_all(&self) -> ServiceResult<Vec<Employee>> {
        Ok(self.repo.find_all()?)
    }

    pub fn get_by_id(&self, id: EmployeeId) -> ServiceResult<Option<Employee>> {
        Ok(self.repo.find_by_id(id)?)
    }

    /// Exact first/last name lookup.
    pub fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> ServiceResult<Option<Employee>> {
        Ok(self.repo.find_by_name(first_name, last_name)?)
    }

    /// Persists `employee` as-is (upsert by id).
    ///
    /// Callers decide what a missing id means; this method does not check
    /// existence first.
    pub fn update(&self, employee: &Employee) -> ServiceResult<Employee> {
        let saved = self.repo.save(employee)?;
        info!(
            "event=employee_update module=service status=ok id={}",
            saved.id.unwrap_or_default()
        );
        Ok(saved)
    }

    /// Deletes by id. Deleting an absent id succeeds.
    pub fn delete_by_id(&self, id: EmployeeId) -> ServiceResult<()> {
        self.repo.delete_by_id(id)?;
        info!("event=employee_delete module=service status=ok id={id}");
        Ok(())
    }
}
