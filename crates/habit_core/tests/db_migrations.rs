use habit_core::db::migrations::latest_version;
use habit_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "kv_entries");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("habits.sqlite3");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO kv_entries (key, value) VALUES ('theme', 'dark');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let theme: String = conn_second
        .query_row("SELECT value FROM kv_entries WHERE key = 'theme';", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(theme, "dark");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn open_failure_reports_store_location() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("habits.sqlite3");

    let err = open_db(&path).unwrap_err();
    match &err {
        DbError::Open { location, .. } => assert_eq!(location, &path.display().to_string()),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("cannot open habit store"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn in_memory_store_query_errors_wrap_sqlite() {
    let conn = open_db_in_memory().unwrap();
    let err: DbError = conn
        .execute("INSERT INTO missing_table (key) VALUES ('x');", [])
        .unwrap_err()
        .into();

    assert!(matches!(err, DbError::Sqlite(_)));
    assert!(err.to_string().starts_with("habit store query failed"));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
