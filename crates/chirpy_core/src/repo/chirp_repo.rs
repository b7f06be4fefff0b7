//! Chirp repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert and primary-key reads over the `chirps` table.
//! - List chirps (all, or one user's) in creation order.
//! - Delete a chirp only when the caller names its owner.
//!
//! # Invariants
//! - Inserting a chirp for an unknown user fails with a foreign-key
//!   violation; the repository does not pre-check ownership.
//! - A delete whose `(chirp_id, user_id)` pair matches no row changes nothing.

use super::{
    ensure_connection_ready, parse_uuid, timestamp_from_db, timestamp_to_db, RepoError,
    RepoResult,
};
use crate::model::chirp::{Chirp, ChirpId};
use crate::model::user::UserId;
use rusqlite::{params, Connection, Row};

const CHIRP_COLUMNS: &[&str] = &["chirp_id", "user_id", "created_at", "updated_at", "body"];

const CHIRP_SELECT_SQL: &str = "SELECT
    chirp_id,
    user_id,
    created_at,
    updated_at,
    body
FROM chirps";

/// Repository interface for chirp rows.
pub trait ChirpRepository {
    fn create_chirp(&self, chirp: &Chirp) -> RepoResult<ChirpId>;
    fn get_chirp(&self, id: ChirpId) -> RepoResult<Option<Chirp>>;
    /// Lists every chirp, oldest first.
    fn list_chirps(&self) -> RepoResult<Vec<Chirp>>;
    /// Lists a user's chirps, oldest first.
    fn list_chirps_for_user(&self, user_id: UserId) -> RepoResult<Vec<Chirp>>;
    /// Deletes a chirp if `owner` authored it and returns the removed row.
    ///
    /// Returns `NotFound(id)` when the chirp is missing or owned by someone
    /// else.
    fn delete_chirp_for_owner(&self, id: ChirpId, owner: UserId) -> RepoResult<Chirp>;
}

/// SQLite-backed chirp repository.
pub struct SqliteChirpRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteChirpRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "chirps", CHIRP_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl ChirpRepository for SqliteChirpRepository<'_> {
    fn create_chirp(&self, chirp: &Chirp) -> RepoResult<ChirpId> {
        self.conn.execute(
            "INSERT INTO chirps (
                chirp_id,
                user_id,
                created_at,
                updated_at,
                body
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                chirp.chirp_id.to_string(),
                chirp.user_id.to_string(),
                timestamp_to_db(chirp.created_at),
                timestamp_to_db(chirp.updated_at),
                chirp.body.as_str(),
            ],
        )?;

        Ok(chirp.chirp_id)
    }

    fn get_chirp(&self, id: ChirpId) -> RepoResult<Option<Chirp>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CHIRP_SELECT_SQL} WHERE chirp_id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_chirp_row(row)?));
        }

        Ok(None)
    }

    fn list_chirps(&self) -> RepoResult<Vec<Chirp>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CHIRP_SELECT_SQL}
             ORDER BY created_at ASC, chirp_id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut chirps = Vec::new();

        while let Some(row) = rows.next()? {
            chirps.push(parse_chirp_row(row)?);
        }

        Ok(chirps)
    }

    fn list_chirps_for_user(&self, user_id: UserId) -> RepoResult<Vec<Chirp>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CHIRP_SELECT_SQL}
             WHERE user_id = ?1
             ORDER BY created_at ASC, chirp_id ASC;"
        ))?;
        let mut rows = stmt.query([user_id.to_string()])?;
        let mut chirps = Vec::new();

        while let Some(row) = rows.next()? {
            chirps.push(parse_chirp_row(row)?);
        }

        Ok(chirps)
    }

    fn delete_chirp_for_owner(&self, id: ChirpId, owner: UserId) -> RepoResult<Chirp> {
        let mut stmt = self.conn.prepare(
            "DELETE FROM chirps
             WHERE chirp_id = ?1 AND user_id = ?2
             RETURNING chirp_id, user_id, created_at, updated_at, body;",
        )?;
        let mut rows = stmt.query(params![id.to_string(), owner.to_string()])?;
        let Some(row) = rows.next()? else {
            return Err(RepoError::NotFound(id));
        };

        parse_chirp_row(row)
    }
}

fn parse_chirp_row(row: &Row<'_>) -> RepoResult<Chirp> {
    let chirp_id_text: String = row.get("chirp_id")?;
    let user_id_text: String = row.get("user_id")?;
    Ok(Chirp {
        chirp_id: parse_uuid(&chirp_id_text, "chirps.chirp_id")?,
        user_id: parse_uuid(&user_id_text, "chirps.user_id")?,
        created_at: timestamp_from_db(row.get("created_at")?, "chirps.created_at")?,
        updated_at: timestamp_from_db(row.get("updated_at")?, "chirps.updated_at")?,
        body: row.get("body")?,
    })
}
