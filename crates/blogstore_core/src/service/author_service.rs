//! Author use-case service.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use super::log_write_outcome;
use crate::model::author::{Author, AuthorChanges, AuthorId, NewAuthor};
use crate::repo::author_repo::AuthorRepository;
use crate::repo::RepoResult;
use log::info;

/// Use-case service wrapper for author operations.
pub struct AuthorService<R: AuthorRepository> {
    repo: R,
}

impl<R: AuthorRepository> AuthorService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates raw input and persists a new author.
    ///
    /// # Contract
    /// - Stored name is the trimmed input.
    /// - Fails with a validation error when the trimmed name is taken.
    pub fn register_author(&self, name: &str, phone_number: &str) -> RepoResult<Author> {
        let result = NewAuthor::new(name, phone_number)
            .map_err(Into::into)
            .and_then(|author| self.repo.create_author(&author));
        log_write_outcome("author_create", &result, |author| author.id);
        result
    }

    pub fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        self.repo.get_author(id)
    }

    pub fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>> {
        self.repo.find_author_by_name(name.trim())
    }

    pub fn list_authors(&self) -> RepoResult<Vec<Author>> {
        self.repo.list_authors()
    }

    /// Applies a partial update. Empty changes return the stored author.
    pub fn update_author(&self, id: AuthorId, changes: &AuthorChanges) -> RepoResult<Author> {
        let result = self.repo.update_author(id, changes);
        log_write_outcome("author_update", &result, |author| author.id);
        result
    }

    pub fn rename_author(&self, id: AuthorId, name: &str) -> RepoResult<Author> {
        self.update_author(id, &AuthorChanges::default().name(name))
    }

    pub fn change_phone_number(&self, id: AuthorId, phone_number: &str) -> RepoResult<Author> {
        self.update_author(id, &AuthorChanges::default().phone_number(phone_number))
    }

    pub fn delete_author(&self, id: AuthorId) -> RepoResult<()> {
        self.repo.delete_author(id)?;
        info!("event=author_delete module=service status=ok id={id}");
        Ok(())
    }
}
