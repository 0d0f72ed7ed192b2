use planboard_core::db::migrations::latest_version;
use planboard_core::db::{open_db, open_db_in_memory, DbError};
use planboard_core::{KvRepository, RepoError, SqliteKvRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_kv_store() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "kv_store");
}

#[test]
fn opening_same_database_twice_keeps_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planboard.db");

    let conn_first = open_db(&path).unwrap();
    SqliteKvRepository::try_new(&conn_first)
        .unwrap()
        .put("selectedTheme", "dark")
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let repo = SqliteKvRepository::try_new(&conn_second).unwrap();
    assert_eq!(repo.get("selectedTheme").unwrap().as_deref(), Some("dark"));
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn repository_refuses_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteKvRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        }) => {
            assert_eq!(expected_version, latest_version());
            assert_eq!(actual_version, 0);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("unmigrated connection must be refused"),
    }
}

#[test]
fn put_overwrites_and_delete_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();

    assert_eq!(repo.get("myEvents").unwrap(), None);
    repo.put("myEvents", "[]").unwrap();
    repo.put("myEvents", r#"[{"id":"x"}]"#).unwrap();
    assert_eq!(
        repo.get("myEvents").unwrap().as_deref(),
        Some(r#"[{"id":"x"}]"#)
    );
    assert_eq!(row_count(&conn), 1);

    repo.delete("myEvents").unwrap();
    repo.delete("myEvents").unwrap();
    assert_eq!(repo.get("myEvents").unwrap(), None);
    assert_eq!(row_count(&conn), 0);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn row_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM kv_store;", [], |row| row.get(0))
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
