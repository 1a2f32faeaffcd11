//! Application configuration.
//!
//! # Responsibility
//! - Resolve database location and logging settings from the environment.
//! - Parse SQLite database URIs (`sqlite:///relative.db`,
//!   `sqlite:////absolute.db`, `sqlite://` for memory).
//!
//! # Invariants
//! - Only the `sqlite` scheme is accepted.
//! - Configuration loading never touches the filesystem.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DATABASE_URI_ENV: &str = "BLOGSTORE_DATABASE_URI";
pub const LOG_LEVEL_ENV: &str = "BLOGSTORE_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "BLOGSTORE_LOG_DIR";
pub const DEFAULT_DATABASE_URI: &str = "sqlite:///app.db";

const SQLITE_SCHEME: &str = "sqlite://";
const MEMORY_PATH: &str = ":memory:";

/// Where the SQLite database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    Memory,
    File(PathBuf),
}

impl DatabaseLocation {
    /// Parses a SQLite URI.
    ///
    /// The text after `sqlite://` is an optional host (must be empty) and a
    /// `/`-prefixed path; `sqlite:////tmp/x.db` is therefore absolute.
    pub fn from_uri(uri: &str) -> Result<Self, ConfigError> {
        let trimmed = uri.trim();
        let rest = trimmed
            .strip_prefix(SQLITE_SCHEME)
            .ok_or_else(|| ConfigError::UnsupportedDatabaseUri(trimmed.to_string()))?;

        if rest.is_empty() {
            return Ok(Self::Memory);
        }

        let path = rest
            .strip_prefix('/')
            .ok_or_else(|| ConfigError::UnsupportedDatabaseUri(trimmed.to_string()))?;

        match path {
            "" => Err(ConfigError::UnsupportedDatabaseUri(trimmed.to_string())),
            MEMORY_PATH => Ok(Self::Memory),
            file => Ok(Self::File(PathBuf::from(file))),
        }
    }
}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database: DatabaseLocation,
    pub log_level: String,
    /// Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// In-memory database, logging off.
    pub fn in_memory() -> Self {
        Self {
            database: DatabaseLocation::Memory,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }

    /// Reads settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let database_uri = read(DATABASE_URI_ENV).unwrap_or_else(|| DEFAULT_DATABASE_URI.into());
        let log_dir = read(LOG_DIR_ENV).map(PathBuf::from);
        if let Some(dir) = &log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir.clone()));
            }
        }

        Ok(Self {
            database: DatabaseLocation::from_uri(&database_uri)?,
            log_level: read(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string()),
            log_dir,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnsupportedDatabaseUri(String),
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedDatabaseUri(uri) => write!(
                f,
                "unsupported database uri `{uri}`; expected sqlite:///<path> or sqlite://"
            ),
            Self::RelativeLogDir(path) => write!(
                f,
                "{LOG_DIR_ENV} must be an absolute path, got `{}`",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {}
