//! In-memory employee repository.
//!
//! # Responsibility
//! - Satisfy `EmployeeRepository` without a database, for tests and embedding.
//!
//! # Invariants
//! - Ids are assigned from a monotonic counter and never reused.
//! - Once `EmployeeId::MAX` is taken, id-less inserts fail instead of wrapping.
//! - Email uniqueness is checked on every `save`, like the SQLite `UNIQUE`
//!   constraint.

use crate::model::employee::{Employee, EmployeeId};
use crate::repo::employee_repo::{EmployeeRepository, RepoError, RepoResult};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
struct Store {
    rows: BTreeMap<EmployeeId, Employee>,
    /// `None` once `EmployeeId::MAX` has been handed out.
    next_id: Option<EmployeeId>,
}

/// `BTreeMap`-backed repository; `find_all` returns rows in ascending id order.
#[derive(Debug)]
pub struct InMemoryEmployeeRepository {
    store: Mutex<Store>,
}

impl Default for InMemoryEmployeeRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEmployeeRepository {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(Store {
                rows: BTreeMap::new(),
                next_id: Some(1),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        // Rows are only mutated after all checks pass, so a poisoned guard
        // still holds consistent data.
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EmployeeRepository for InMemoryEmployeeRepository {
    fn save(&self, employee: &Employee) -> RepoResult<Employee> {
        let mut store = self.lock();

        let email_taken = store
            .rows
            .values()
            .any(|row| row.email == employee.email && row.id != employee.id);
        if email_taken {
            return Err(RepoError::DuplicateEmail(employee.email.clone()));
        }

        let id = match (employee.id, store.next_id) {
            (Some(id), _) => id,
            (None, Some(next)) => next,
            (None, None) => {
                return Err(RepoError::InvalidData("id space exhausted".to_string()));
            }
        };
        let after = id.checked_add(1);
        store.next_id = match (store.next_id, after) {
            (Some(next), Some(after)) => Some(next.max(after)),
            _ => None,
        };

        let stored = Employee {
            id: Some(id),
            ..employee.clone()
        };
        store.rows.insert(id, stored.clone());
        Ok(stored)
    }

    fn find_all(&self) -> RepoResult<Vec<Employee>> {
        Ok(self.lock().rows.values().cloned().collect())
    }

    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        Ok(self.lock().rows.get(&id).cloned())
    }

    fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>> {
        Ok(self
            .lock()
            .rows
            .values()
            .find(|row| row.email == email)
            .cloned())
    }

    fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> RepoResult<Option<Employee>> {
        Ok(self
            .lock()
            .rows
            .values()
            .find(|row| row.first_name == first_name && row.last_name == last_name)
            .cloned())
    }

    fn delete_by_id(&self, id: EmployeeId) -> RepoResult<()> {
        self.lock().rows.remove(&id);
        Ok(())
    }

    fn count(&self) -> RepoResult<u64> {
        Ok(self.lock().rows.len() as u64)
    }
}
