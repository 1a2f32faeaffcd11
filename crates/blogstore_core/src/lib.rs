//! Core domain logic for blogstore.
//! This crate is the single source of truth for author/post invariants.

pub mod app;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use app::{App, AppError};
pub use config::{AppConfig, ConfigError, DatabaseLocation};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::author::{Author, AuthorChanges, AuthorId, NewAuthor};
pub use model::post::{Category, NewPost, Post, PostChanges, PostId, CLICKBAIT_PHRASES};
pub use model::validation::ValidationError;
pub use repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
pub use repo::post_repo::{PostRepository, SqlitePostRepository};
pub use repo::{RepoError, RepoResult};
pub use service::author_service::AuthorService;
pub use service::post_service::{PostService, PublishPostRequest};
