//! Runtime configuration loaded from the environment.
//!
//! # Responsibility
//! - Resolve database location, platform and logging settings.
//! - Load a local `.env` file before reading variables.
//!
//! # Invariants
//! - Unknown or missing `PLATFORM` resolves to `Platform::Prod`.
//! - `log_dir` is always absolute once a config is built.

use crate::logging::default_log_level;
use std::convert::Infallible;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DATABASE_PATH_VAR: &str = "DATABASE_PATH";
pub const PLATFORM_VAR: &str = "PLATFORM";
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "LOG_DIR";

const DEFAULT_DATABASE_PATH: &str = "chirpy.sqlite3";
const IN_MEMORY_DATABASE: &str = ":memory:";
const SQLITE_URL_PREFIX: &str = "sqlite://";

/// Deployment environment. Gates destructive development-only operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Platform {
    Dev,
    #[default]
    Prod,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Prod => "prod",
        }
    }
}

impl From<&str> for Platform {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "dev" => Self::Dev,
            _ => Self::Prod,
        }
    }
}

/// Where the database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    File(PathBuf),
    InMemory,
}

impl DatabaseLocation {
    /// Reads a `DATABASE_PATH`-style value: a file path, optionally prefixed
    /// with `sqlite://`, or `:memory:`.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        let trimmed = trimmed.strip_prefix(SQLITE_URL_PREFIX).unwrap_or(trimmed);
        if trimmed == IN_MEMORY_DATABASE {
            Self::InMemory
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

impl FromStr for DatabaseLocation {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub database: DatabaseLocation,
    pub platform: Platform,
    pub log_level: String,
    pub log_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyValue(&'static str),
    RelativeLogDir(String),
    CurrentDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyValue(var) => write!(f, "`{var}` is set but empty"),
            Self::RelativeLogDir(dir) => {
                write!(f, "`{LOG_DIR_VAR}` must be an absolute path, got `{dir}`")
            }
            Self::CurrentDir(err) => write!(f, "cannot resolve current directory: {err}"),
        }
    }
}

impl Error for ConfigError {}

impl CoreConfig {
    /// Loads `.env` (if present) and reads configuration from the process
    /// environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Missing `.env` is the normal production case.
        let _ = dotenv::dotenv();
        let cwd = std::env::current_dir().map_err(|err| ConfigError::CurrentDir(err.to_string()))?;
        Self::from_lookup(|key| dotenv::var(key).ok(), &cwd)
    }

    /// Builds a config from an arbitrary variable lookup.
    ///
    /// `cwd` anchors the default log directory.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        cwd: &Path,
    ) -> Result<Self, ConfigError> {
        let database = match lookup(DATABASE_PATH_VAR) {
            Some(value) if value.trim().is_empty() => {
                return Err(ConfigError::EmptyValue(DATABASE_PATH_VAR))
            }
            Some(value) => DatabaseLocation::parse(&value),
            None => DatabaseLocation::File(PathBuf::from(DEFAULT_DATABASE_PATH)),
        };

        let platform = lookup(PLATFORM_VAR)
            .map(|value| Platform::from(value.as_str()))
            .unwrap_or_default();

        let log_level = lookup(LOG_LEVEL_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| default_log_level().to_string());

        let log_dir = match lookup(LOG_DIR_VAR) {
            Some(value) => {
                let path = PathBuf::from(value.trim());
                if !path.is_absolute() {
                    return Err(ConfigError::RelativeLogDir(value));
                }
                path
            }
            None => cwd.join("logs"),
        };

        Ok(Self {
            database,
            platform,
            log_level,
            log_dir,
        })
    }
}
