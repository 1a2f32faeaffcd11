//! Command handlers for the `blogstore` binary.

use crate::{AuthorCommand, ContentSource, PostCommand};
use anyhow::{anyhow, bail, Context, Result};
use blogstore_core::db::migrations::{latest_version, schema_status, SchemaStatus};
use blogstore_core::{
    App, AppConfig, Author, AuthorChanges, Category, DatabaseLocation, Post, PostChanges,
    PublishPostRequest,
};
use log::info;
use rusqlite::Connection;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy)]
pub(crate) struct Output {
    pub(crate) json: bool,
}

impl Output {
    fn emit<T: Serialize>(&self, value: &T, human: impl FnOnce(&T) -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", human(value));
        }
        Ok(())
    }
}

pub(crate) fn db_status(config: &AppConfig) -> Result<()> {
    let status = read_schema_status(config)?;

    println!(
        "schema version {} (latest {}), {} pending migration(s)",
        status.current,
        status.latest,
        status.pending()
    );
    if status.is_newer_than_supported() {
        bail!(
            "database schema version {} is newer than this binary supports ({})",
            status.current,
            status.latest
        );
    }
    Ok(())
}

pub(crate) fn db_upgrade(config: &AppConfig) -> Result<()> {
    let (before, after) = upgrade_schema(config)?;
    if before == after {
        println!("schema already at version {after}");
    } else {
        println!("schema upgraded from version {before} to {after}");
    }
    Ok(())
}

/// Reads the configured database's schema status without migrating it.
fn read_schema_status(config: &AppConfig) -> Result<SchemaStatus> {
    match &config.database {
        DatabaseLocation::Memory => Ok(SchemaStatus {
            current: 0,
            latest: latest_version(),
        }),
        DatabaseLocation::File(path) => read_file_status(path),
    }
}

/// Applies pending migrations and returns `(from, to)` schema versions.
fn upgrade_schema(config: &AppConfig) -> Result<(u32, u32)> {
    let before = read_schema_status(config)?.current;
    let app = App::bootstrap(config)?;
    let after = app.schema_status()?.current;
    info!("event=cli_db_upgrade module=cli status=ok from={before} to={after}");
    Ok((before, after))
}

pub(crate) fn run_author(config: &AppConfig, output: Output, command: AuthorCommand) -> Result<()> {
    let app = App::bootstrap(config)?;
    let authors = app.authors()?;

    match command {
        AuthorCommand::Add { name, phone } => {
            let author = authors.register_author(&name, &phone)?;
            output.emit(&author, describe_author)
        }
        AuthorCommand::Get { id } => {
            let author = authors
                .get_author(id)?
                .ok_or_else(|| anyhow!("author not found: {id}"))?;
            output.emit(&author, describe_author)
        }
        AuthorCommand::List => {
            let list = authors.list_authors()?;
            output.emit(&list, |items| describe_all(items, describe_author))
        }
        AuthorCommand::Update { id, name, phone } => {
            let changes = author_changes(name, phone)?;
            let author = authors.update_author(id, &changes)?;
            output.emit(&author, describe_author)
        }
        AuthorCommand::Delete { id } => {
            authors.delete_author(id)?;
            println!("deleted author {id}");
            Ok(())
        }
    }
}

pub(crate) fn run_post(config: &AppConfig, output: Output, command: PostCommand) -> Result<()> {
    let app = App::bootstrap(config)?;
    let posts = app.posts()?;

    match command {
        PostCommand::Add {
            title,
            content,
            summary,
            category,
        } => {
            let request = PublishPostRequest {
                title,
                content: read_content(content)?,
                summary,
                category,
            };
            let post = posts.publish_post(&request)?;
            output.emit(&post, describe_post)
        }
        PostCommand::Get { id } => {
            let post = posts
                .get_post(id)?
                .ok_or_else(|| anyhow!("post not found: {id}"))?;
            output.emit(&post, describe_post)
        }
        PostCommand::List { category } => {
            let category = category
                .as_deref()
                .map(|value| {
                    Category::parse(value).ok_or_else(|| {
                        anyhow!("unknown category `{value}`; expected Fiction or Non-Fiction")
                    })
                })
                .transpose()?;
            let list = posts.list_posts(category)?;
            output.emit(&list, |items| describe_all(items, describe_post))
        }
        PostCommand::Update {
            id,
            title,
            content,
            content_file,
            summary,
            clear_summary,
            category,
        } => {
            let changes = post_changes(
                title,
                content,
                content_file,
                summary,
                clear_summary,
                category,
            )?;
            let post = posts.edit_post(id, &changes)?;
            output.emit(&post, describe_post)
        }
        PostCommand::Delete { id } => {
            posts.delete_post(id)?;
            println!("deleted post {id}");
            Ok(())
        }
    }
}

fn author_changes(name: Option<String>, phone: Option<String>) -> Result<AuthorChanges> {
    let changes = AuthorChanges {
        name,
        phone_number: phone,
    };
    if changes.is_empty() {
        bail!("nothing to update; pass --name and/or --phone");
    }
    Ok(changes)
}

/// Maps `post update` flags to a change set; `--clear-summary` wins over `--summary`.
fn post_changes(
    title: Option<String>,
    content: Option<String>,
    content_file: Option<PathBuf>,
    summary: Option<String>,
    clear_summary: bool,
    category: Option<String>,
) -> Result<PostChanges> {
    let content = match (content, content_file) {
        (Some(text), _) => Some(text),
        (None, Some(path)) => Some(read_file(&path)?),
        (None, None) => None,
    };
    let summary = match (summary, clear_summary) {
        (_, true) => Some(None),
        (Some(text), false) => Some(Some(text)),
        (None, false) => None,
    };
    let changes = PostChanges {
        title,
        content,
        summary,
        category,
    };
    if changes.is_empty() {
        bail!("nothing to update; pass at least one field flag");
    }
    Ok(changes)
}

fn read_file_status(path: &Path) -> Result<SchemaStatus> {
    if !path.exists() {
        return Ok(SchemaStatus {
            current: 0,
            latest: latest_version(),
        });
    }
    let conn = Connection::open(path)
        .with_context(|| format!("failed to open database `{}`", path.display()))?;
    Ok(schema_status(&conn)?)
}

fn read_content(source: ContentSource) -> Result<String> {
    match (source.content, source.content_file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => read_file(&path),
        (None, None) => bail!("pass --content or --content-file"),
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read content file `{}`", path.display()))
}

fn describe_all<T>(items: &[T], describe: fn(&T) -> String) -> String {
    if items.is_empty() {
        return "(none)".to_string();
    }
    items.iter().map(describe).collect::<Vec<_>>().join("\n")
}

fn describe_author(author: &Author) -> String {
    format!(
        "#{} {} phone={} created_at={} updated_at={}",
        author.id, author.name, author.phone_number, author.created_at, author.updated_at
    )
}

fn describe_post(post: &Post) -> String {
    let summary = post.summary.as_deref().unwrap_or("-");
    format!(
        "#{} [{}] {}\n  summary: {}\n  content: {} chars, updated_at={}",
        post.id,
        post.category.as_str(),
        post.title,
        summary,
        post.content.chars().count(),
        post.updated_at
    )
}

#[cfg(test)]
mod tests {
    use super::{author_changes, post_changes, read_schema_status, upgrade_schema};
    use blogstore_core::db::migrations::latest_version;
    use blogstore_core::{AppConfig, DatabaseLocation};
    use rusqlite::Connection;
    use std::io::Write;
    use std::path::Path;
    use tempfile::{NamedTempFile, TempDir};

    fn file_config(path: &Path) -> AppConfig {
        AppConfig {
            database: DatabaseLocation::File(path.to_path_buf()),
            ..AppConfig::in_memory()
        }
    }

    fn user_version(path: &Path) -> u32 {
        let conn = Connection::open(path).unwrap();
        conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn status_of_missing_database_reports_all_pending_without_creating_it() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blog.db");

        let status = read_schema_status(&file_config(&path)).unwrap();

        assert_eq!(status.current, 0);
        assert_eq!(status.latest, latest_version());
        assert_eq!(status.pending(), latest_version() as usize);
        assert!(!path.exists());
    }

    #[test]
    fn status_of_existing_database_does_not_migrate_it() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blog.db");
        Connection::open(&path).unwrap();

        let status = read_schema_status(&file_config(&path)).unwrap();

        assert_eq!(status.current, 0);
        assert_eq!(user_version(&path), 0);
    }

    #[test]
    fn upgrade_reports_from_and_to_versions_then_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blog.db");
        let config = file_config(&path);

        assert_eq!(upgrade_schema(&config).unwrap(), (0, latest_version()));
        assert_eq!(user_version(&path), latest_version());
        assert_eq!(
            upgrade_schema(&config).unwrap(),
            (latest_version(), latest_version())
        );

        let status = read_schema_status(&config).unwrap();
        assert_eq!(status.pending(), 0);
    }

    #[test]
    fn summary_flags_map_to_set_clear_or_keep() {
        let set = post_changes(None, None, None, Some("short".into()), false, None).unwrap();
        assert_eq!(set.summary, Some(Some("short".to_string())));

        let cleared = post_changes(None, None, None, None, true, None).unwrap();
        assert_eq!(cleared.summary, Some(None));

        let clear_wins = post_changes(None, None, None, Some("short".into()), true, None).unwrap();
        assert_eq!(clear_wins.summary, Some(None));

        let untouched = post_changes(Some("Top Picks".into()), None, None, None, false, None).unwrap();
        assert_eq!(untouched.summary, None);
        assert_eq!(untouched.title.as_deref(), Some("Top Picks"));
    }

    #[test]
    fn content_file_is_read_when_inline_content_is_absent() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "body from disk").unwrap();

        let changes = post_changes(
            None,
            None,
            Some(file.path().to_path_buf()),
            None,
            false,
            None,
        )
        .unwrap();
        assert_eq!(changes.content.as_deref(), Some("body from disk"));

        let missing = post_changes(
            None,
            None,
            Some(file.path().with_extension("missing")),
            None,
            false,
            None,
        );
        assert!(missing.is_err());
    }

    #[test]
    fn empty_updates_are_rejected() {
        let err = author_changes(None, None).unwrap_err();
        assert!(err.to_string().contains("nothing to update"));

        let err = post_changes(None, None, None, None, false, None).unwrap_err();
        assert!(err.to_string().contains("nothing to update"));

        let changes = author_changes(None, Some("1234567890".into())).unwrap();
        assert_eq!(changes.phone_number.as_deref(), Some("1234567890"));
        assert!(changes.name.is_none());
    }
}
