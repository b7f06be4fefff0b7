use chirpy_core::db::migrations::{
    apply_migration_script, apply_migrations, current_version, latest_version, migrations,
};
use chirpy_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "users");
    assert_table_exists(&conn, "chirps");
}

#[test]
fn opened_connections_enforce_foreign_keys() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chirpy.sqlite3");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "chirps");
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
fn partially_migrated_database_is_upgraded() {
    let mut conn = Connection::open_in_memory().unwrap();
    apply_migration_script(&conn, 1).unwrap();
    conn.execute_batch("PRAGMA user_version = 1;").unwrap();

    apply_migrations(&mut conn).unwrap();

    assert_eq!(current_version(&conn).unwrap(), latest_version());
    assert_table_exists(&conn, "chirps");
}

#[test]
fn failed_upgrade_leaves_schema_version_unchanged() {
    let mut conn = Connection::open_in_memory().unwrap();
    apply_migration_script(&conn, 1).unwrap();
    conn.execute_batch(
        "PRAGMA user_version = 1;
         CREATE TABLE chirps (legacy TEXT);",
    )
    .unwrap();

    let err = apply_migrations(&mut conn).unwrap_err();
    assert!(err.to_string().contains("already exists"), "unexpected error: {err}");
    assert_eq!(current_version(&conn).unwrap(), 1);
    assert_table_has_columns(&conn, "chirps", &["legacy"]);
}

#[test]
fn failed_upgrade_rolls_back_earlier_scripts_in_the_same_run() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE chirps (legacy TEXT);").unwrap();

    apply_migrations(&mut conn).unwrap_err();

    assert_eq!(current_version(&conn).unwrap(), 0);
    let users_exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'users');",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(users_exists, 0);
}

#[test]
fn raw_scripts_apply_in_order_on_a_fresh_database() {
    let conn = Connection::open_in_memory().unwrap();
    for migration in migrations() {
        apply_migration_script(&conn, migration.version).unwrap();
    }

    assert_table_exists(&conn, "users");
    assert_table_exists(&conn, "chirps");
    // Raw scripts do no bookkeeping.
    assert_eq!(current_version(&conn).unwrap(), 0);
}

#[test]
fn reapplying_a_raw_script_fails_with_already_exists() {
    let conn = open_db_in_memory().unwrap();

    for migration in migrations() {
        let err = apply_migration_script(&conn, migration.version).unwrap_err();
        assert!(
            err.to_string().contains("already exists"),
            "unexpected error for {}: {err}",
            migration.name
        );
    }
}

#[test]
fn unknown_script_version_is_rejected() {
    let conn = Connection::open_in_memory().unwrap();
    let err = apply_migration_script(&conn, 42).unwrap_err();
    assert!(matches!(err, DbError::UnknownMigration(42)));
}

#[test]
fn chirps_schema_declares_cascading_foreign_key() {
    let conn = open_db_in_memory().unwrap();
    let (table, from, to, on_delete): (String, String, String, String) = conn
        .query_row(
            "SELECT \"table\", \"from\", \"to\", on_delete FROM pragma_foreign_key_list('chirps');",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )
        .unwrap();

    assert_eq!(table, "users");
    assert_eq!(from, "user_id");
    assert_eq!(to, "id");
    assert_eq!(on_delete, "CASCADE");
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

fn assert_table_has_columns(conn: &Connection, table_name: &str, expected: &[&str]) {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table_name});"))
        .unwrap();
    let columns: Vec<String> = stmt
        .query_map([], |row| row.get(1))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(columns, expected);
}
