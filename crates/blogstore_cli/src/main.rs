//! `blogstore` command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration (`.env`, environment, `--database`).
//! - Dispatch schema and record commands to `blogstore_core`.

mod commands;

use anyhow::{Context, Result};
use blogstore_core::{AppConfig, DatabaseLocation};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "blogstore", version, about = "Author/post store with validated writes")]
struct Cli {
    /// Database URI, e.g. `sqlite:///app.db`. Overrides BLOGSTORE_DATABASE_URI.
    #[arg(long, global = true)]
    database: Option<String>,

    /// Print records as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Schema migration commands.
    Db {
        #[command(subcommand)]
        command: DbCommand,
    },
    /// Author records.
    Author {
        #[command(subcommand)]
        command: AuthorCommand,
    },
    /// Post records.
    Post {
        #[command(subcommand)]
        command: PostCommand,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Apply pending migrations.
    Upgrade,
    /// Show current and latest schema version without migrating.
    Status,
}

#[derive(Debug, Subcommand)]
enum AuthorCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
    },
    Get {
        id: i64,
    },
    List,
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct ContentSource {
    #[arg(long)]
    content: Option<String>,
    /// Read the post body from a file.
    #[arg(long)]
    content_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum PostCommand {
    Add {
        #[arg(long)]
        title: String,
        #[command(flatten)]
        content: ContentSource,
        #[arg(long)]
        summary: Option<String>,
        /// `Fiction` or `Non-Fiction`.
        #[arg(long)]
        category: String,
    },
    Get {
        id: i64,
    },
    List {
        #[arg(long)]
        category: Option<String>,
    },
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, conflicts_with = "content_file")]
        content: Option<String>,
        #[arg(long)]
        content_file: Option<PathBuf>,
        #[arg(long, conflicts_with = "clear_summary")]
        summary: Option<String>,
        #[arg(long)]
        clear_summary: bool,
        #[arg(long)]
        category: Option<String>,
    },
    Delete {
        id: i64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tolerate_missing_env_file(dotenvy::dotenv())?;
    let mut config = AppConfig::from_env()?;
    if let Some(uri) = cli.database.as_deref() {
        config.database = DatabaseLocation::from_uri(uri)?;
    }

    let output = commands::Output { json: cli.json };
    match cli.command {
        Command::Db { command } => match command {
            DbCommand::Upgrade => commands::db_upgrade(&config),
            DbCommand::Status => commands::db_status(&config),
        },
        Command::Author { command } => commands::run_author(&config, output, command),
        Command::Post { command } => commands::run_post(&config, output, command),
    }
}

/// A missing `.env` file is normal; a malformed one is an error.
fn tolerate_missing_env_file<T>(loaded: Result<T, dotenvy::Error>) -> Result<()> {
    match loaded {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(err).context("failed to load .env file"),
    }
}
