//! Schema migrations for the user store.
//!
//! # Responsibility
//! - Bring a connection up to the newest `users` schema in one transaction.
//! - Confirm the schema contract the user repository relies on.
//!
//! # Invariants
//! - Migration versions increase strictly; the applied one is `PRAGMA user_version`.
//! - After `apply_migrations` returns, `users` has every column in `USERS_COLUMNS`.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// Table read and written by the user repository.
pub const USERS_TABLE: &str = "users";
/// Columns the repository selects and inserts, in statement order.
pub const USERS_COLUMNS: [&str; 2] = ["id", "name"];

struct Migration {
    version: u32,
    label: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    label: "create_users",
    sql: include_str!("0001_users.sql"),
}];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies pending migrations, then checks the `users` schema contract.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file was written by a newer binary.
/// - `MissingColumn` when a pre-existing `users` table lacks a required column.
/// - `Sqlite` when a statement fails; pending migrations are rolled back.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    let latest = latest_version();
    if current > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: latest,
        });
    }

    let pending: Vec<&Migration> = MIGRATIONS
        .iter()
        .filter(|migration| migration.version > current)
        .collect();
    if !pending.is_empty() {
        let tx = conn.transaction()?;
        for migration in &pending {
            tx.execute_batch(migration.sql)?;
            tx.pragma_update(None, "user_version", migration.version)?;
            info!(
                "event=db_migrate module=db status=ok version={} label={}",
                migration.version, migration.label
            );
        }
        tx.commit()?;
    }

    verify_users_contract(conn)
}

fn verify_users_contract(conn: &Connection) -> DbResult<()> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({USERS_TABLE});"))?;
    let present = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    match USERS_COLUMNS
        .iter()
        .find(|column| !present.iter().any(|name| name == *column))
    {
        Some(column) => Err(DbError::MissingColumn {
            table: USERS_TABLE,
            column: *column,
        }),
        None => Ok(()),
    }
}
