//! Administrative use-cases.
//!
//! # Responsibility
//! - Provide the development reset (wipe all users and, by cascade, chirps).
//!
//! # Invariants
//! - Reset never touches storage unless the platform is `Platform::Dev`.

use crate::config::Platform;
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// Operation is not allowed on the current platform.
    Forbidden {
        operation: &'static str,
        platform: Platform,
    },
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forbidden {
                operation,
                platform,
            } => write!(
                f,
                "`{operation}` is not allowed on platform `{}`",
                platform.as_str()
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Forbidden { .. } => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service for operator actions.
pub struct AdminService<R: UserRepository> {
    repo: R,
    platform: Platform,
}

impl<R: UserRepository> AdminService<R> {
    pub fn new(repo: R, platform: Platform) -> Self {
        Self { repo, platform }
    }

    /// Deletes every user (and all chirps through the cascade).
    ///
    /// Returns the number of deleted user rows.
    pub fn reset(&self) -> ServiceResult<u64> {
        if self.platform != Platform::Dev {
            warn!(
                "event=admin_reset module=service status=forbidden platform={}",
                self.platform.as_str()
            );
            return Err(ServiceError::Forbidden {
                operation: "reset",
                platform: self.platform,
            });
        }

        let deleted = self.repo.delete_all_users()?;
        info!("event=admin_reset module=service status=ok deleted_users={deleted}");
        Ok(deleted)
    }
}
