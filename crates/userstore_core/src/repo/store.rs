//! Record store seam between repositories and the SQL driver.
//!
//! # Responsibility
//! - Expose the two capabilities repositories need: a single-row query and a
//!   statement execution, both with positional parameters.
//! - Implement them for `rusqlite::Connection`.
//!
//! # Invariants
//! - Parameters bind in slice order (`?1`, `?2`, ...).
//! - Row values come back in select order.
//! - Driver errors are wrapped in `DbError::Sqlite` without translation.

use crate::db::DbResult;
use rusqlite::types::{Type, Value, ValueRef};
use rusqlite::{params_from_iter, Connection};

/// Minimal capability set of a connected relational store.
pub trait RecordStore {
    /// Runs `sql` and returns the first row as positional column values.
    ///
    /// # Errors
    /// - `rusqlite::Error::QueryReturnedNoRows` when nothing matched.
    /// - Any driver failure while preparing, binding or stepping.
    fn query_row(&self, sql: &str, params: &[Value]) -> DbResult<Vec<Value>>;

    /// Runs `sql` and returns the affected-row count reported by the store.
    fn execute(&self, sql: &str, params: &[Value]) -> DbResult<usize>;
}

impl RecordStore for Connection {
    fn query_row(&self, sql: &str, params: &[Value]) -> DbResult<Vec<Value>> {
        let mut stmt = self.prepare(sql)?;
        let column_count = stmt.column_count();
        let values = stmt.query_row(params_from_iter(params), |row| {
            (0..column_count)
                .map(|index| owned_value(index, row.get_ref(index)?))
                .collect::<rusqlite::Result<Vec<_>>>()
        })?;
        Ok(values)
    }

    fn execute(&self, sql: &str, params: &[Value]) -> DbResult<usize> {
        let changed = Connection::execute(self, sql, params_from_iter(params))?;
        Ok(changed)
    }
}

// `Value::from(ValueRef)` panics on TEXT that is not UTF-8; report it instead.
fn owned_value(index: usize, value: ValueRef<'_>) -> rusqlite::Result<Value> {
    Ok(match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(number) => Value::Integer(number),
        ValueRef::Real(number) => Value::Real(number),
        ValueRef::Text(bytes) => {
            let text = std::str::from_utf8(bytes).map_err(|err| {
                rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(err))
            })?;
            Value::Text(text.to_string())
        }
        ValueRef::Blob(bytes) => Value::Blob(bytes.to_vec()),
    })
}
