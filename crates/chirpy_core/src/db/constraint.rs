//! Classification of SQLite constraint failures.
//!
//! The storage engine is the only enforcer of the schema rules (unique email,
//! chirp ownership, non-null columns). This module maps its extended result
//! codes onto a small closed set so callers can match on the rule that fired.

use rusqlite::ffi;
use rusqlite::ErrorCode;
use std::fmt::{Display, Formatter};

/// Which declared rule the engine rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// `UNIQUE` column, e.g. `users.email`.
    Unique,
    /// Duplicate `PRIMARY KEY` value.
    PrimaryKey,
    /// `REFERENCES` target row is missing.
    ForeignKey,
    /// `NOT NULL` column received `NULL`.
    NotNull,
    /// Any other constraint class (CHECK, trigger, ...).
    Other,
}

impl ConstraintKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unique => "unique",
            Self::PrimaryKey => "primary_key",
            Self::ForeignKey => "foreign_key",
            Self::NotNull => "not_null",
            Self::Other => "other",
        }
    }
}

/// Constraint failure reported by the storage engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    pub kind: ConstraintKind,
    /// `table.column` named by the engine, when it reports one.
    pub target: Option<String>,
}

impl ConstraintViolation {
    /// Classifies a rusqlite error; returns `None` for non-constraint errors.
    pub fn from_sqlite(err: &rusqlite::Error) -> Option<Self> {
        let rusqlite::Error::SqliteFailure(failure, message) = err else {
            return None;
        };
        if failure.code != ErrorCode::ConstraintViolation {
            return None;
        }

        let kind = match failure.extended_code {
            ffi::SQLITE_CONSTRAINT_UNIQUE => ConstraintKind::Unique,
            ffi::SQLITE_CONSTRAINT_PRIMARYKEY => ConstraintKind::PrimaryKey,
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => ConstraintKind::ForeignKey,
            ffi::SQLITE_CONSTRAINT_NOTNULL => ConstraintKind::NotNull,
            _ => ConstraintKind::Other,
        };

        Some(Self {
            kind,
            target: message.as_deref().and_then(parse_target),
        })
    }

    pub fn is(&self, kind: ConstraintKind) -> bool {
        self.kind == kind
    }
}

impl Display for ConstraintViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.target {
            Some(target) => write!(f, "{} constraint violated on {target}", self.kind.as_str()),
            None => write!(f, "{} constraint violated", self.kind.as_str()),
        }
    }
}

// Engine messages look like `UNIQUE constraint failed: users.email`.
fn parse_target(message: &str) -> Option<String> {
    let (_, target) = message.split_once("constraint failed:")?;
    let target = target.trim();
    if target.is_empty() {
        None
    } else {
        Some(target.to_string())
    }
}
