//! Ordered schema steps for the employee database.
//!
//! Version 1 creates `employees` with `UNIQUE(email)`; that constraint is the
//! storage half of the duplicate-email rule. New steps are appended with the
//! next version number and never edited once released.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    name: "create_employees",
    sql: include_str!("0001_init.sql"),
}];

/// Schema version this build migrates to.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Schema version recorded in the database (0 for a fresh file).
pub fn current_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Runs every step newer than the recorded version in one transaction.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the database is ahead of this build.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from = current_version(conn)?;
    let to = latest_version();

    match from.cmp(&to) {
        std::cmp::Ordering::Greater => {
            return Err(DbError::UnsupportedSchemaVersion {
                db_version: from,
                latest_supported: to,
            })
        }
        std::cmp::Ordering::Equal => return Ok(()),
        std::cmp::Ordering::Less => {}
    }

    let tx = conn.transaction()?;
    for step in SCHEMA_STEPS.iter().filter(|step| step.version > from) {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
        info!(
            "event=db_migrate_step module=db status=ok version={} name={}",
            step.version, step.name
        );
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={from} to_version={to}");
    Ok(())
}
