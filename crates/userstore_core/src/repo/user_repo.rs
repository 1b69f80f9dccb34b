//! User repository contract and SQL-backed implementation.
//!
//! # Responsibility
//! - Map `get_user_by_id` and `create_user` onto two parameterized statements.
//! - Map the selected row back into a fully populated `User`.
//!
//! # Invariants
//! - Each call issues exactly one statement and keeps no state afterwards.
//! - Lookups never return a partially populated `User`.
//! - Store failures (including "no row") are returned unchanged.
//! - `create_user` does not inspect the affected-row count.

use crate::db::DbError;
use crate::model::user::{User, UserId};
use crate::repo::store::RecordStore;
use log::{debug, warn};
use rusqlite::types::Value;
use rusqlite::Connection;

const USER_SELECT_BY_ID_SQL: &str = "SELECT id, name FROM users WHERE id = ?1;";
const USER_INSERT_SQL: &str = "INSERT INTO users (id, name) VALUES (?1, ?2);";
const USER_COLUMN_COUNT: usize = 2;

/// Repository operations fail only with store failures.
pub type RepoResult<T> = Result<T, DbError>;

/// Repository interface for user persistence.
pub trait UserRepository {
    /// Loads the user whose `id` matches exactly.
    fn get_user_by_id(&self, id: UserId) -> RepoResult<User>;
    /// Inserts `user` with its caller-supplied `id`.
    fn create_user(&self, user: &User) -> RepoResult<()>;
}

/// User repository issuing SQL through a borrowed record store.
///
/// Defaults to a SQLite connection; tests substitute scripted stores.
pub struct SqlUserRepository<'store, S: ?Sized = Connection> {
    store: &'store S,
}

impl<'store, S: RecordStore + ?Sized> SqlUserRepository<'store, S> {
    pub fn new(store: &'store S) -> Self {
        Self { store }
    }
}

impl<S: RecordStore + ?Sized> UserRepository for SqlUserRepository<'_, S> {
    fn get_user_by_id(&self, id: UserId) -> RepoResult<User> {
        let result = self
            .store
            .query_row(USER_SELECT_BY_ID_SQL, &[Value::Integer(id)])
            .and_then(parse_user_row);

        match &result {
            Ok(_) => debug!("event=user_get module=repo status=ok id={id}"),
            Err(err) if err.is_not_found() => {
                debug!("event=user_get module=repo status=not_found id={id}")
            }
            Err(err) => warn!("event=user_get module=repo status=error id={id} error={err}"),
        }
        result
    }

    fn create_user(&self, user: &User) -> RepoResult<()> {
        let id = user.id;
        // Affected-row count is not checked; any acceptance is success.
        match self.store.execute(
            USER_INSERT_SQL,
            &[Value::Integer(id), Value::Text(user.name.clone())],
        ) {
            Ok(changed) => {
                debug!("event=user_create module=repo status=ok id={id} changed={changed}");
                Ok(())
            }
            Err(err) => {
                warn!("event=user_create module=repo status=error id={id} error={err}");
                Err(err)
            }
        }
    }
}

fn parse_user_row(values: Vec<Value>) -> RepoResult<User> {
    let [id, name]: [Value; USER_COLUMN_COUNT] =
        values.try_into().map_err(|values: Vec<Value>| DbError::RowShape {
            expected: USER_COLUMN_COUNT,
            actual: values.len(),
        })?;

    let id = match id {
        Value::Integer(id) => id,
        other => return Err(invalid_column_type(0, "id", &other)),
    };
    let name = match name {
        Value::Text(name) => name,
        other => return Err(invalid_column_type(1, "name", &other)),
    };

    Ok(User { id, name })
}

fn invalid_column_type(index: usize, column: &str, value: &Value) -> DbError {
    DbError::Sqlite(rusqlite::Error::InvalidColumnType(
        index,
        column.to_string(),
        value.data_type(),
    ))
}
