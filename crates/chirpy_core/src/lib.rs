//! Storage core for Chirpy.
//! Owns the `users`/`chirps` schema, its migrations and row access.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig, DatabaseLocation, Platform};
pub use db::{ConstraintKind, ConstraintViolation, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::chirp::{Chirp, ChirpId};
pub use model::user::{User, UserId};
pub use repo::chirp_repo::{ChirpRepository, SqliteChirpRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::admin_service::{AdminService, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
