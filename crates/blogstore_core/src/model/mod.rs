//! Blog domain model: authors and posts.
//!
//! # Responsibility
//! - Define canonical record shapes for authors and posts.
//! - Own the pure field validators applied before any write.
//!
//! # Invariants
//! - Validated inputs (`NewAuthor`, `NewPost`) can only be built through
//!   their validating constructors.
//! - Validators never perform I/O; uniqueness is a repository concern.

pub mod author;
pub mod post;
pub mod validation;
