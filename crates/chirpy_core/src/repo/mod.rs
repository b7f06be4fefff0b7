//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define row-level data access contracts for users and chirps.
//! - Isolate SQLite query details from service orchestration.
//! - Surface engine constraint failures as typed errors, untranslated.
//!
//! # Invariants
//! - Repositories only accept connections migrated to `latest_version()`.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod chirp_repo;
pub mod user_repo;

use crate::db::migrations::latest_version;
use crate::db::{ConstraintViolation, DbError};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use time::OffsetDateTime;
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for user/chirp persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Transport or bootstrap failure from SQLite.
    Db(DbError),
    /// The storage engine rejected a write.
    Constraint {
        violation: ConstraintViolation,
        source: rusqlite::Error,
    },
    /// Target row does not exist.
    NotFound(Uuid),
    /// Persisted data cannot be converted to a valid row model.
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl RepoError {
    /// Returns the constraint failure, if the engine rejected a write.
    pub fn constraint(&self) -> Option<&ConstraintViolation> {
        match self {
            Self::Constraint { violation, .. } => Some(violation),
            _ => None,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Constraint { violation, .. } => write!(f, "{violation}"),
            Self::NotFound(id) => write!(f, "row not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "repository requires column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Constraint { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Sqlite(source) => match ConstraintViolation::from_sqlite(&source) {
                Some(violation) => Self::Constraint { violation, source },
                None => Self::Db(DbError::Sqlite(source)),
            },
            other => Self::Db(other),
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::from(DbError::Sqlite(value))
    }
}

fn ensure_connection_ready(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, table)? {
        return Err(RepoError::MissingRequiredTable(table));
    }

    for &column in columns {
        if !table_has_column(conn, table, column)? {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

// Timestamps are stored as epoch microseconds; sub-microsecond digits are
// dropped, as `TIMESTAMPTZ` does.
fn timestamp_to_db(value: Option<OffsetDateTime>) -> Option<i64> {
    value.map(|ts| (ts.unix_timestamp_nanos() / 1_000) as i64)
}

fn timestamp_from_db(value: Option<i64>, column: &str) -> RepoResult<Option<OffsetDateTime>> {
    let Some(micros) = value else {
        return Ok(None);
    };
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(micros) * 1_000)
        .map(Some)
        .map_err(|_| RepoError::InvalidData(format!("invalid timestamp `{micros}` in {column}")))
}

fn parse_uuid(text: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(text)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{text}` in {column}")))
}
