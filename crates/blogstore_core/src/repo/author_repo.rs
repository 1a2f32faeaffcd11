//! Author repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `authors` table.
//! - Enforce author-name uniqueness before writes.
//!
//! # Invariants
//! - Name uniqueness is checked explicitly before insert/update and is
//!   backed by the `UNIQUE` constraint on `authors.name`; both paths report
//!   `ValidationError::DuplicateAuthorName`.
//! - Updates run in one transaction: a rejected change leaves the row as-is.
//! - Read paths reject rows that break author field rules.

use crate::model::author::{Author, AuthorChanges, AuthorId, NewAuthor};
use crate::model::validation::ValidationError;
use crate::repo::schema::ensure_table_ready;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

const AUTHOR_SELECT_SQL: &str = "SELECT
    id,
    name,
    phone_number,
    created_at,
    updated_at
FROM authors";

const AUTHOR_COLUMNS: &[&str] = &["id", "name", "phone_number", "created_at", "updated_at"];

/// Repository interface for author CRUD operations.
pub trait AuthorRepository {
    fn create_author(&self, author: &NewAuthor) -> RepoResult<Author>;
    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    /// Exact, case-sensitive lookup on the stored (trimmed) name.
    fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>>;
    /// All authors ordered by id.
    fn list_authors(&self) -> RepoResult<Vec<Author>>;
    fn update_author(&self, id: AuthorId, changes: &AuthorChanges) -> RepoResult<Author>;
    fn delete_author(&self, id: AuthorId) -> RepoResult<()>;
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` on schema drift.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "authors", AUTHOR_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn create_author(&self, author: &NewAuthor) -> RepoResult<Author> {
        let tx = self.conn.unchecked_transaction()?;
        ensure_name_available(&tx, author.name(), None)?;

        tx.execute(
            "INSERT INTO authors (name, phone_number) VALUES (?1, ?2);",
            params![author.name(), author.phone_number()],
        )
        .map_err(|err| map_unique_name_violation(err, author.name()))?;

        let id = tx.last_insert_rowid();
        let created = load_author(&tx, id)?.ok_or(RepoError::AuthorNotFound(id))?;
        tx.commit()?;
        Ok(created)
    }

    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        load_author(self.conn, id)
    }

    fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} WHERE name = ?1;"))?;
        let mut rows = stmt.query([name])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_author_row(row)?));
        }
        Ok(None)
    }

    fn list_authors(&self) -> RepoResult<Vec<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut authors = Vec::new();

        while let Some(row) = rows.next()? {
            authors.push(parse_author_row(row)?);
        }

        Ok(authors)
    }

    fn update_author(&self, id: AuthorId, changes: &AuthorChanges) -> RepoResult<Author> {
        let tx = self.conn.unchecked_transaction()?;
        let current = load_author(&tx, id)?.ok_or(RepoError::AuthorNotFound(id))?;
        if changes.is_empty() {
            return Ok(current);
        }

        let updated = changes.apply_to(&current)?;
        ensure_name_available(&tx, &updated.name, Some(id))?;

        tx.execute(
            "UPDATE authors
             SET
                name = ?1,
                phone_number = ?2,
                updated_at = CAST(unixepoch('subsec') * 1000 AS INTEGER)
             WHERE id = ?3;",
            params![updated.name, updated.phone_number, id],
        )
        .map_err(|err| map_unique_name_violation(err, &updated.name))?;

        let stored = load_author(&tx, id)?.ok_or(RepoError::AuthorNotFound(id))?;
        tx.commit()?;
        Ok(stored)
    }

    fn delete_author(&self, id: AuthorId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM authors WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::AuthorNotFound(id));
        }

        Ok(())
    }
}

fn load_author(conn: &Connection, id: AuthorId) -> RepoResult<Option<Author>> {
    let mut stmt = conn.prepare(&format!("{AUTHOR_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_author_row(row)?));
    }
    Ok(None)
}

fn ensure_name_available(
    conn: &Connection,
    name: &str,
    excluding: Option<AuthorId>,
) -> RepoResult<()> {
    let owner: Option<AuthorId> = conn
        .query_row("SELECT id FROM authors WHERE name = ?1;", [name], |row| {
            row.get(0)
        })
        .optional()?;

    match owner {
        Some(owner_id) if Some(owner_id) != excluding => {
            Err(ValidationError::DuplicateAuthorName(name.to_string()).into())
        }
        _ => Ok(()),
    }
}

fn map_unique_name_violation(err: rusqlite::Error, name: &str) -> RepoError {
    let is_name_violation = matches!(
        &err,
        rusqlite::Error::SqliteFailure(failure, Some(message))
            if failure.code == ErrorCode::ConstraintViolation
                && message.contains("authors.name")
    );
    if is_name_violation {
        return ValidationError::DuplicateAuthorName(name.to_string()).into();
    }
    err.into()
}

fn parse_author_row(row: &Row<'_>) -> RepoResult<Author> {
    let author = Author {
        id: row.get("id")?,
        name: row.get("name")?,
        phone_number: row.get("phone_number")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    author
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("authors.id={}: {err}", author.id)))?;
    Ok(author)
}
