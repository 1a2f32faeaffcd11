//! Post repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `posts` table.
//! - Keep category text mapping inside the persistence boundary.
//!
//! # Invariants
//! - Updates run in one transaction: a rejected change leaves the row as-is.
//! - Read paths reject rows with unknown categories or broken field rules.

use crate::model::post::{Category, NewPost, Post, PostChanges, PostId};
use crate::repo::schema::ensure_table_ready;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const POST_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    summary,
    category,
    created_at,
    updated_at
FROM posts";

const POST_COLUMNS: &[&str] = &[
    "id",
    "title",
    "content",
    "summary",
    "category",
    "created_at",
    "updated_at",
];

/// Repository interface for post CRUD operations.
pub trait PostRepository {
    fn create_post(&self, post: &NewPost) -> RepoResult<Post>;
    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>>;
    /// All posts ordered by id, optionally restricted to one category.
    fn list_posts(&self, category: Option<Category>) -> RepoResult<Vec<Post>>;
    fn update_post(&self, id: PostId, changes: &PostChanges) -> RepoResult<Post>;
    fn delete_post(&self, id: PostId) -> RepoResult<()>;
}

/// SQLite-backed post repository.
pub struct SqlitePostRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePostRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "posts", POST_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl PostRepository for SqlitePostRepository<'_> {
    fn create_post(&self, post: &NewPost) -> RepoResult<Post> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO posts (title, content, summary, category)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                post.title(),
                post.content(),
                post.summary(),
                post.category().as_str(),
            ],
        )?;

        let id = tx.last_insert_rowid();
        let created = load_post(&tx, id)?.ok_or(RepoError::PostNotFound(id))?;
        tx.commit()?;
        Ok(created)
    }

    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        load_post(self.conn, id)
    }

    fn list_posts(&self, category: Option<Category>) -> RepoResult<Vec<Post>> {
        let mut stmt = self.conn.prepare(&format!(
            "{POST_SELECT_SQL}
             WHERE (?1 IS NULL OR category = ?1)
             ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([category.map(Category::as_str)])?;
        let mut posts = Vec::new();

        while let Some(row) = rows.next()? {
            posts.push(parse_post_row(row)?);
        }

        Ok(posts)
    }

    fn update_post(&self, id: PostId, changes: &PostChanges) -> RepoResult<Post> {
        let tx = self.conn.unchecked_transaction()?;
        let current = load_post(&tx, id)?.ok_or(RepoError::PostNotFound(id))?;
        if changes.is_empty() {
            return Ok(current);
        }

        let updated = changes.apply_to(&current)?;
        tx.execute(
            "UPDATE posts
             SET
                title = ?1,
                content = ?2,
                summary = ?3,
                category = ?4,
                updated_at = CAST(unixepoch('subsec') * 1000 AS INTEGER)
             WHERE id = ?5;",
            params![
                updated.title,
                updated.content,
                updated.summary,
                updated.category.as_str(),
                id,
            ],
        )?;

        let stored = load_post(&tx, id)?.ok_or(RepoError::PostNotFound(id))?;
        tx.commit()?;
        Ok(stored)
    }

    fn delete_post(&self, id: PostId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM posts WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::PostNotFound(id));
        }

        Ok(())
    }
}

fn load_post(conn: &Connection, id: PostId) -> RepoResult<Option<Post>> {
    let mut stmt = conn.prepare(&format!("{POST_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_post_row(row)?));
    }
    Ok(None)
}

fn parse_post_row(row: &Row<'_>) -> RepoResult<Post> {
    let id: PostId = row.get("id")?;
    let category_text: String = row.get("category")?;
    let category = Category::parse(&category_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid category `{category_text}` in posts.category (posts.id={id})"
        ))
    })?;

    let post = Post {
        id,
        title: row.get("title")?,
        content: row.get("content")?,
        summary: row.get("summary")?,
        category,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    post.validate()
        .map_err(|err| RepoError::InvalidData(format!("posts.id={id}: {err}")))?;
    Ok(post)
}
