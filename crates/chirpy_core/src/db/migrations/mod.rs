//! SQLite migration registry and executor.
//!
//! # Responsibility
//! - Register schema migrations in strictly increasing order.
//! - Apply pending migrations atomically.
//! - Run a single raw script for callers that track versions themselves.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied migration version is mirrored to `PRAGMA user_version`.
//! - Scripts are plain `CREATE TABLE`: running one twice fails instead of
//!   silently succeeding.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// One forward-only schema change.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    pub sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "users",
        sql: include_str!("0001_users.sql"),
    },
    Migration {
        version: 2,
        name: "chirps",
        sql: include_str!("0002_chirps.sql"),
    },
];

/// Returns the ordered migration registry.
pub fn migrations() -> &'static [Migration] {
    MIGRATIONS
}

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Reads the schema version recorded in the database.
pub fn current_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

/// Executes one migration script verbatim, without touching `user_version`.
///
/// Re-applying a script against a database that already has its table fails
/// with the engine's "already exists" error.
pub fn apply_migration_script(conn: &Connection, version: u32) -> DbResult<()> {
    let migration = MIGRATIONS
        .iter()
        .find(|migration| migration.version == version)
        .ok_or(DbError::UnknownMigration(version))?;
    conn.execute_batch(migration.sql)?;
    Ok(())
}

/// Applies all pending migrations on the provided connection.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current = current_version(conn)?;
    let latest = latest_version();

    if current > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: latest,
        });
    }

    if current == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
        info!(
            "event=db_migrate module=db status=applied version={} name={}",
            migration.version, migration.name
        );
    }
    tx.commit()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{latest_version, migrations};

    #[test]
    fn versions_are_strictly_increasing() {
        let versions: Vec<u32> = migrations().iter().map(|m| m.version).collect();
        assert!(versions.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(latest_version(), 2);
    }

    #[test]
    fn users_table_is_created_before_chirps() {
        let names: Vec<&str> = migrations().iter().map(|m| m.name).collect();
        assert_eq!(names, ["users", "chirps"]);
    }
}
