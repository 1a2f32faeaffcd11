//! Post domain model.
//!
//! # Responsibility
//! - Define the persisted post record, its category set and validated inputs.
//! - Provide the pure title/content/summary/category validators.
//!
//! # Invariants
//! - `title`, `content` and a present `summary` are stored trimmed.
//! - `content` has at least `MIN_CONTENT_CHARS` characters.
//! - `summary`, when present, has at most `MAX_SUMMARY_CHARS` characters.
//! - Lengths count Unicode scalar values, not bytes.

use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};

/// Engine-assigned primary key of a post row.
pub type PostId = i64;

/// Minimum trimmed content length.
pub const MIN_CONTENT_CHARS: usize = 250;
/// Maximum trimmed summary length.
pub const MAX_SUMMARY_CHARS: usize = 250;
/// A title must contain at least one of these (case-sensitive).
pub const CLICKBAIT_PHRASES: &[&str] = &["Won't Believe", "Secret", "Top", "Guess"];

/// Closed set of post categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Fiction")]
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Fiction, Category::NonFiction];

    /// Stored and displayed literal.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fiction => "Fiction",
            Self::NonFiction => "Non-Fiction",
        }
    }

    /// Exact, case-sensitive match against the stored literals.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
    }
}

/// Persisted post record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub category: Category,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds. Refreshed on every update.
    pub updated_at: i64,
}

impl Post {
    /// Re-runs field validators against the stored values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)?;
        validate_content(&self.content)?;
        validate_summary(self.summary.as_deref())?;
        validate_category(self.category.as_str())?;
        Ok(())
    }
}

/// Validated input for creating a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    title: String,
    content: String,
    summary: Option<String>,
    category: Category,
}

impl NewPost {
    /// Validates raw field values and keeps their normalized form.
    pub fn new(
        title: &str,
        content: &str,
        summary: Option<&str>,
        category: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            title: validate_title(title)?,
            content: validate_content(content)?,
            summary: validate_summary(summary)?,
            category: validate_category(category)?,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

/// Partial update for an existing post. `None` leaves a field untouched.
///
/// `summary` is doubly optional: `Some(None)` clears the stored summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub summary: Option<Option<String>>,
    pub category: Option<String>,
}

impl PostChanges {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn summary(mut self, summary: Option<String>) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.summary.is_none()
            && self.category.is_none()
    }

    /// Returns a copy of `post` with every change validated and applied.
    pub fn apply_to(&self, post: &Post) -> Result<Post, ValidationError> {
        let mut updated = post.clone();
        if let Some(title) = self.title.as_deref() {
            updated.title = validate_title(title)?;
        }
        if let Some(content) = self.content.as_deref() {
            updated.content = validate_content(content)?;
        }
        if let Some(summary) = &self.summary {
            updated.summary = validate_summary(summary.as_deref())?;
        }
        if let Some(category) = self.category.as_deref() {
            updated.category = validate_category(category)?;
        }
        Ok(updated)
    }
}

/// Requires at least `MIN_CONTENT_CHARS` characters after trimming.
pub fn validate_content(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    let length = trimmed.chars().count();
    if length < MIN_CONTENT_CHARS {
        return Err(ValidationError::ContentTooShort { length });
    }
    Ok(trimmed.to_string())
}

/// Absent summaries pass through; present ones are trimmed and capped.
pub fn validate_summary(value: Option<&str>) -> Result<Option<String>, ValidationError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let trimmed = value.trim();
    let length = trimmed.chars().count();
    if length > MAX_SUMMARY_CHARS {
        return Err(ValidationError::SummaryTooLong { length });
    }
    Ok(Some(trimmed.to_string()))
}

pub fn validate_category(value: &str) -> Result<Category, ValidationError> {
    Category::parse(value).ok_or_else(|| ValidationError::InvalidCategory(value.to_string()))
}

/// Requires one of `CLICKBAIT_PHRASES` as a substring; returns the trimmed title.
pub fn validate_title(value: &str) -> Result<String, ValidationError> {
    if !CLICKBAIT_PHRASES
        .iter()
        .any(|phrase| value.contains(phrase))
    {
        return Err(ValidationError::TitleNotClickbait);
    }
    Ok(value.trim().to_string())
}
