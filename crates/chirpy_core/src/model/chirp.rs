//! Chirp row model.
//!
//! # Responsibility
//! - Define the short text post owned by a single user.
//!
//! # Invariants
//! - `user_id` references an existing user; the foreign key enforces it.
//! - A chirp is deleted by its owner or together with its owner.
//! - `body` has no length limit at this layer.

use super::now_utc_micros;
use super::user::UserId;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Stable identifier of a chirp row (`chirps.chirp_id`).
pub type ChirpId = Uuid;

/// One row of the `chirps` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chirp {
    pub chirp_id: ChirpId,
    pub user_id: UserId,
    #[serde(with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
    pub body: String,
}

impl Chirp {
    /// Creates a chirp for `user_id` with a generated id.
    pub fn new(user_id: UserId, body: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), user_id, body)
    }

    pub fn with_id(chirp_id: ChirpId, user_id: UserId, body: impl Into<String>) -> Self {
        let now = now_utc_micros();
        Self {
            chirp_id,
            user_id,
            created_at: Some(now),
            updated_at: Some(now),
            body: body.into(),
        }
    }
}
