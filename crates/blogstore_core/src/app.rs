//! Application bootstrap: configuration, logging and a migrated database.
//!
//! # Responsibility
//! - Wire `AppConfig` to a ready-to-use SQLite connection.
//! - Hand out author/post services bound to that connection.
//!
//! # Invariants
//! - An `App` only exists once migrations have been applied.

use crate::config::{AppConfig, ConfigError, DatabaseLocation};
use crate::db::migrations::{schema_status, SchemaStatus};
use crate::db::{open_db, open_db_in_memory, DbError, DbResult};
use crate::logging::{init_logging, LoggingError};
use crate::repo::author_repo::SqliteAuthorRepository;
use crate::repo::post_repo::SqlitePostRepository;
use crate::repo::RepoResult;
use crate::service::author_service::AuthorService;
use crate::service::post_service::PostService;
use log::info;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Logging(LoggingError),
    Db(DbError),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "configuration error: {err}"),
            Self::Logging(err) => write!(f, "logging error: {err}"),
            Self::Db(err) => write!(f, "database error: {err}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Logging(err) => Some(err),
            Self::Db(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<LoggingError> for AppError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<DbError> for AppError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

/// Bootstrapped application holding the migrated connection.
pub struct App {
    conn: Connection,
}

impl App {
    /// Starts logging (when a log directory is configured), opens the
    /// configured database and applies pending migrations.
    pub fn bootstrap(config: &AppConfig) -> Result<Self, AppError> {
        if let Some(log_dir) = &config.log_dir {
            init_logging(&config.log_level, log_dir)?;
        }

        let conn = match &config.database {
            DatabaseLocation::Memory => open_db_in_memory()?,
            DatabaseLocation::File(path) => open_db(path)?,
        };

        info!(
            "event=app_bootstrap module=app status=ok memory={}",
            config.database == DatabaseLocation::Memory
        );
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn schema_status(&self) -> DbResult<SchemaStatus> {
        schema_status(&self.conn)
    }

    pub fn authors(&self) -> RepoResult<AuthorService<SqliteAuthorRepository<'_>>> {
        Ok(AuthorService::new(SqliteAuthorRepository::try_new(
            &self.conn,
        )?))
    }

    pub fn posts(&self) -> RepoResult<PostService<SqlitePostRepository<'_>>> {
        Ok(PostService::new(SqlitePostRepository::try_new(&self.conn)?))
    }
}
