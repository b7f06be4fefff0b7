//! User repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide primary-key row access over the `users` table.
//! - Own the destructive paths (single delete, full reset) whose effects
//!   cascade into `chirps`.
//!
//! # Invariants
//! - Duplicate emails are rejected by the engine and surface as
//!   `RepoError::Constraint` with `ConstraintKind::Unique`.
//! - Deleting a user removes every chirp that references it.

use super::{
    ensure_connection_ready, parse_uuid, timestamp_from_db, timestamp_to_db, RepoError,
    RepoResult,
};
use crate::model::now_utc_micros;
use crate::model::user::{User, UserId};
use rusqlite::{params, Connection, Row};

const USER_COLUMNS: &[&str] = &["id", "created_at", "updated_at", "email"];

const USER_SELECT_SQL: &str = "SELECT
    id,
    created_at,
    updated_at,
    email
FROM users";

/// Repository interface for user rows.
pub trait UserRepository {
    fn create_user(&self, user: &User) -> RepoResult<UserId>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    /// Looks a user up by the unique email column (exact, case-sensitive).
    fn get_user_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    /// Replaces the email and touches `updated_at`.
    fn update_user_email(&self, id: UserId, email: &str) -> RepoResult<User>;
    /// Deletes one user; their chirps go with it.
    fn delete_user(&self, id: UserId) -> RepoResult<()>;
    /// Deletes every user and returns how many rows were removed.
    fn delete_all_users(&self) -> RepoResult<u64>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "users", USER_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, user: &User) -> RepoResult<UserId> {
        self.conn.execute(
            "INSERT INTO users (
                id,
                created_at,
                updated_at,
                email
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                user.id.to_string(),
                timestamp_to_db(user.created_at),
                timestamp_to_db(user.updated_at),
                user.email.as_str(),
            ],
        )?;

        Ok(user.id)
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }

        Ok(None)
    }

    fn get_user_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE email = ?1;"))?;
        let mut rows = stmt.query([email])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }

        Ok(None)
    }

    fn update_user_email(&self, id: UserId, email: &str) -> RepoResult<User> {
        let changed = self.conn.execute(
            "UPDATE users
             SET
                email = ?2,
                updated_at = ?3
             WHERE id = ?1;",
            params![id.to_string(), email, timestamp_to_db(Some(now_utc_micros()))],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        self.get_user(id)?.ok_or(RepoError::NotFound(id))
    }

    fn delete_user(&self, id: UserId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM users WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_all_users(&self) -> RepoResult<u64> {
        let deleted = self.conn.execute("DELETE FROM users;", [])?;
        Ok(deleted as u64)
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let id_text: String = row.get("id")?;
    Ok(User {
        id: parse_uuid(&id_text, "users.id")?,
        created_at: timestamp_from_db(row.get("created_at")?, "users.created_at")?,
        updated_at: timestamp_from_db(row.get("updated_at")?, "users.updated_at")?,
        email: row.get("email")?,
    })
}
