//! SQLite storage bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for Chirpy core.
//! - Apply the `users`/`chirps` schema migrations in deterministic order.
//! - Classify storage-engine constraint failures.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write rows before migrations succeed.
//! - Every returned connection enforces foreign keys, so chirp cascades work.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod constraint;
pub mod migrations;
mod open;

pub use constraint::{ConstraintKind, ConstraintViolation};
pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    UnknownMigration(u32),
}

impl DbError {
    /// Returns the classified constraint failure, if this error is one.
    pub fn constraint_violation(&self) -> Option<ConstraintViolation> {
        match self {
            Self::Sqlite(err) => ConstraintViolation::from_sqlite(err),
            _ => None,
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::UnknownMigration(version) => {
                write!(f, "no migration registered for version {version}")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::UnknownMigration(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
