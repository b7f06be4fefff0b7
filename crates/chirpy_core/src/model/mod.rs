//! Persisted row shapes for users and their chirps.
//!
//! # Responsibility
//! - Define the canonical structures mirrored by the `users`/`chirps` tables.
//! - Own timestamp precision rules shared by both rows.
//!
//! # Invariants
//! - Every row is identified by a stable v4 UUID.
//! - A chirp belongs to exactly one user for its whole lifetime.
//! - Timestamps carry microsecond precision, matching storage.

pub mod chirp;
pub mod user;

use time::OffsetDateTime;

/// Current UTC time truncated to whole microseconds.
///
/// Storage keeps epoch microseconds, so stamping rows at this precision keeps
/// in-memory values equal to what a later read returns.
pub fn now_utc_micros() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    let micros = now.unix_timestamp_nanos() / 1_000;
    OffsetDateTime::from_unix_timestamp_nanos(micros * 1_000).unwrap_or(now)
}
