//! Employee repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD and lookup APIs over the `employees` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `save` assigns an id on insert and never changes an existing id.
//! - The `UNIQUE` constraint on `employees.email` surfaces as
//!   `RepoError::DuplicateEmail`, closing the check-then-act window of
//!   `EmployeeService::create`.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use crate::model::employee::{Employee, EmployeeId};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    email
FROM employees";

const EMPLOYEES_TABLE: &str = "employees";
const REQUIRED_COLUMNS: &[&str] = &["id", "first_name", "last_name", "email"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for employee persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    DuplicateEmail(String),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateEmail(email) => {
                write!(f, "employee already exists with email: {email}")
            }
            Self::InvalidData(message) => {
                write!(f, "invalid persisted employee data: {message}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is behind required {expected_version}; open it with `open_db`"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract consumed by `EmployeeService`.
///
/// Any engine can back the registry as long as it honors email uniqueness
/// on `save` and reports absence through `Option`.
pub trait EmployeeRepository {
    /// Inserts when `employee.id` is `None`, otherwise inserts or replaces the
    /// row with that id. Returns the stored record with its id set.
    fn save(&self, employee: &Employee) -> RepoResult<Employee>;
    fn find_all(&self) -> RepoResult<Vec<Employee>>;
    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>>;
    /// Exact match on both names; lowest id wins when several rows match.
    fn find_by_name(&self, first_name: &str, last_name: &str)
        -> RepoResult<Option<Employee>>;
    /// Removes the row if present. Absent ids are not an error.
    fn delete_by_id(&self, id: EmployeeId) -> RepoResult<()>;
    fn count(&self) -> RepoResult<u64>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Wraps a connection that has already been migrated by `open_db`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version is behind.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the
    ///   `employees` table does not have the expected shape.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version = current_version(conn)?;
        let expected_version = latest_version();
        if actual_version < expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let columns = table_columns(conn, EMPLOYEES_TABLE)?;
        if columns.is_empty() {
            return Err(RepoError::MissingRequiredTable(EMPLOYEES_TABLE));
        }
        if let Some(&column) = REQUIRED_COLUMNS
            .iter()
            .find(|&&required| !columns.iter().any(|column| column == required))
        {
            return Err(RepoError::MissingRequiredColumn {
                table: EMPLOYEES_TABLE,
                column,
            });
        }

        Ok(Self { conn })
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn save(&self, employee: &Employee) -> RepoResult<Employee> {
        let result = self.conn.execute(
            "INSERT INTO employees (id, first_name, last_name, email)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                email = excluded.email;",
            params![
                employee.id,
                employee.first_name.as_str(),
                employee.last_name.as_str(),
                employee.email.as_str(),
            ],
        );

        if let Err(err) = result {
            if is_unique_violation(&err) {
                return Err(RepoError::DuplicateEmail(employee.email.clone()));
            }
            return Err(err.into());
        }

        let id = employee
            .id
            .unwrap_or_else(|| self.conn.last_insert_rowid());
        Ok(Employee {
            id: Some(id),
            ..employee.clone()
        })
    }

    fn find_all(&self) -> RepoResult<Vec<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut employees = Vec::new();

        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }

        Ok(employees)
    }

    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        self.find_one(&format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"), params![id])
    }

    fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>> {
        self.find_one(
            &format!("{EMPLOYEE_SELECT_SQL} WHERE email = ?1;"),
            params![email],
        )
    }

    fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> RepoResult<Option<Employee>> {
        self.find_one(
            &format!(
                "{EMPLOYEE_SELECT_SQL}
                 WHERE first_name = ?1 AND last_name = ?2
                 ORDER BY id ASC
                 LIMIT 1;"
            ),
            params![first_name, last_name],
        )
    }

    fn delete_by_id(&self, id: EmployeeId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM employees WHERE id = ?1;", params![id])?;
        Ok(())
    }

    fn count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM employees;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
    }
}

impl SqliteEmployeeRepository<'_> {
    fn find_one(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> RepoResult<Option<Employee>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_employee_row(row)?));
        }

        Ok(None)
    }
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let id: EmployeeId = row.get("id")?;
    if id <= 0 {
        return Err(RepoError::InvalidData(format!(
            "invalid id value `{id}` in employees.id"
        )));
    }

    Ok(Employee {
        id: Some(id),
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
    })
}

fn table_columns(conn: &Connection, table: &str) -> RepoResult<Vec<String>> {
    let exists = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [table],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    if exists.is_none() {
        return Ok(Vec::new());
    }

    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns)
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
