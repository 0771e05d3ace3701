//! SQLite bootstrap for the `employees` table.
//!
//! `open_db` is the only supported way to obtain a connection for
//! `SqliteEmployeeRepository`: it creates the table on a fresh file and
//! refuses files written by a newer build.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`; 0 means "never migrated".
//! - A connection is handed out only after every migration committed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or migrating the employee database.
#[derive(Debug)]
pub enum DbError {
    /// Driver-level failure (file access, SQL, pragma).
    Sqlite(rusqlite::Error),
    /// The file was migrated by a newer build; rows may not fit this schema.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "employee database error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "employee database is at schema version {db_version}, this build knows up to {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
