//! SQLite storage bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for userstore.
//! - Apply schema migrations before any repository touches the store.
//! - Define the single store failure type surfaced by repositories.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Driver errors are wrapped, never rewritten.

use thiserror::Error;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure raised by the record store or its bootstrap.
#[derive(Debug, Error)]
pub enum DbError {
    /// Error reported by the SQLite driver, forwarded verbatim.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    /// Result row did not carry the number of columns the caller selected.
    #[error("result row has {actual} columns, expected {expected}")]
    RowShape { expected: usize, actual: usize },
    /// Existing table does not satisfy the repository's column contract.
    #[error("table `{table}` is missing required column `{column}`")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl DbError {
    /// Returns whether the store reported that a single-row query matched nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Returns the SQLite primary error code, when the driver attached one.
    pub fn sqlite_error_code(&self) -> Option<rusqlite::ErrorCode> {
        match self {
            Self::Sqlite(err) => err.sqlite_error_code(),
            Self::RowShape { .. }
            | Self::MissingColumn { .. }
            | Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}
