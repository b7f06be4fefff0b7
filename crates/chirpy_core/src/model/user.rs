//! User row model.
//!
//! # Responsibility
//! - Define the account record that owns chirps.
//!
//! # Invariants
//! - `id` is stable and never reused for another user.
//! - `email` is unique across all users; the storage engine enforces this,
//!   not this type.

use super::now_utc_micros;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Stable identifier of a user row (`users.id`).
pub type UserId = Uuid;

/// One row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
    pub email: String,
}

impl User {
    /// Creates a user with a generated id and both timestamps set to now.
    pub fn new(email: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), email)
    }

    /// Creates a user with a caller-provided id.
    ///
    /// Used by registration flows that mint identity elsewhere.
    pub fn with_id(id: UserId, email: impl Into<String>) -> Self {
        let now = now_utc_micros();
        Self {
            id,
            created_at: Some(now),
            updated_at: Some(now),
            email: email.into(),
        }
    }
}
