use rusqlite::Connection;
use userstore_core::db::migrations::{latest_version, USERS_COLUMNS, USERS_TABLE};
use userstore_core::db::{open_db, open_db_in_memory, DbError};
use userstore_core::{SqlUserRepository, User, UserRepository};

#[test]
fn fresh_store_gets_the_users_contract() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_eq!(user_columns(&conn), USERS_COLUMNS);
    assert_eq!(column_type(&conn, "id"), "INTEGER");
    assert_eq!(column_type(&conn, "name"), "TEXT");
}

#[test]
fn reopening_keeps_existing_users() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("userstore.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        SqlUserRepository::new(&conn)
            .create_user(&User::new(1, "John Doe"))
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM users;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn legacy_users_table_without_name_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.sqlite3");
    Connection::open(&path)
        .unwrap()
        .execute_batch("CREATE TABLE users (id INTEGER PRIMARY KEY, email TEXT);")
        .unwrap();

    let err = open_db(&path).unwrap_err();
    assert!(matches!(
        err,
        DbError::MissingColumn {
            table: USERS_TABLE,
            column: "name"
        }
    ));
}

#[test]
fn legacy_users_table_with_extra_columns_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wide.sqlite3");
    Connection::open(&path)
        .unwrap()
        .execute_batch(
            "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL, email TEXT);
             INSERT INTO users (id, name, email) VALUES (3, 'Old Timer', 'old@example.com');",
        )
        .unwrap();

    let conn = open_db(&path).unwrap();
    let user = SqlUserRepository::new(&conn).get_user_by_id(3).unwrap();
    assert_eq!(user, User::new(3, "Old Timer"));
}

#[test]
fn store_written_by_newer_binary_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    Connection::open(&path)
        .unwrap()
        .execute_batch("PRAGMA user_version = 999;")
        .unwrap();

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn opening_a_directory_fails_with_driver_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = open_db(dir.path()).unwrap_err();
    assert!(matches!(err, DbError::Sqlite(_)));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .unwrap()
}

fn user_columns(conn: &Connection) -> Vec<String> {
    let mut stmt = conn.prepare("PRAGMA table_info(users);").unwrap();
    let columns = stmt
        .query_map([], |row| row.get::<_, String>("name"))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    columns
}

fn column_type(conn: &Connection, column: &str) -> String {
    conn.query_row(
        "SELECT type FROM pragma_table_info('users') WHERE name = ?1;",
        [column],
        |row| row.get(0),
    )
    .unwrap()
}
