//! Post use-case service.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.

use super::log_write_outcome;
use crate::model::post::{Category, NewPost, Post, PostChanges, PostId};
use crate::repo::post_repo::PostRepository;
use crate::repo::RepoResult;
use log::info;

/// Raw input for publishing a post, validated by `PostService::publish_post`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishPostRequest {
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    /// Must be `Fiction` or `Non-Fiction` exactly.
    pub category: String,
}

/// Use-case service wrapper for post operations.
pub struct PostService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> PostService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates raw input and persists a new post.
    ///
    /// # Contract
    /// - Title, content and a present summary are stored trimmed.
    pub fn publish_post(&self, request: &PublishPostRequest) -> RepoResult<Post> {
        let result = NewPost::new(
            &request.title,
            &request.content,
            request.summary.as_deref(),
            &request.category,
        )
        .map_err(Into::into)
        .and_then(|post| self.repo.create_post(&post));
        log_write_outcome("post_create", &result, |post| post.id);
        result
    }

    pub fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        self.repo.get_post(id)
    }

    pub fn list_posts(&self, category: Option<Category>) -> RepoResult<Vec<Post>> {
        self.repo.list_posts(category)
    }

    /// Applies a partial update. Empty changes return the stored post.
    pub fn edit_post(&self, id: PostId, changes: &PostChanges) -> RepoResult<Post> {
        let result = self.repo.update_post(id, changes);
        log_write_outcome("post_update", &result, |post| post.id);
        result
    }

    pub fn delete_post(&self, id: PostId) -> RepoResult<()> {
        self.repo.delete_post(id)?;
        info!("event=post_delete module=service status=ok id={id}");
        Ok(())
    }
}
