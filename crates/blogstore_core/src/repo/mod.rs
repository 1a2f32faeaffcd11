//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for authors and posts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes only accept validated inputs (`NewAuthor`, `NewPost`,
//!   changes applied through `apply_to`).
//! - Repository APIs return semantic errors (`*NotFound`, duplicate names)
//!   in addition to DB transport errors.

pub mod author_repo;
mod error;
pub mod post_repo;
mod schema;

pub use error::{RepoError, RepoResult};
