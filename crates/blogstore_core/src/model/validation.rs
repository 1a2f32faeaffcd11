//! Validation error shared by author and post field rules.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Constraint violated by a proposed field value.
///
/// `Display` renders the human-readable message reported to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Author name is empty or blank after trimming.
    AuthorNameRequired,
    /// Another author already owns this trimmed name.
    DuplicateAuthorName(String),
    /// Phone number is not exactly ten decimal digits.
    InvalidPhoneNumber,
    /// Post content is absent or shorter than the minimum after trimming.
    ContentTooShort { length: usize },
    /// Post summary is longer than the maximum after trimming.
    SummaryTooLong { length: usize },
    /// Category is not one of the supported literals.
    InvalidCategory(String),
    /// Title contains none of the required phrases.
    TitleNotClickbait,
}

impl ValidationError {
    /// Name of the field whose value was rejected.
    pub fn field(&self) -> &'static str {
        match self {
            Self::AuthorNameRequired | Self::DuplicateAuthorName(_) => "name",
            Self::InvalidPhoneNumber => "phone_number",
            Self::ContentTooShort { .. } => "content",
            Self::SummaryTooLong { .. } => "summary",
            Self::InvalidCategory(_) => "category",
            Self::TitleNotClickbait => "title",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthorNameRequired => write!(f, "Author name is required."),
            Self::DuplicateAuthorName(name) => {
                write!(f, "Author with name '{name}' already exists.")
            }
            Self::InvalidPhoneNumber => write!(f, "Phone number must be exactly 10 digits."),
            Self::ContentTooShort { .. } => write!(f, "Content must be at least 250 characters."),
            Self::SummaryTooLong { .. } => write!(f, "Summary must be at most 250 characters."),
            Self::InvalidCategory(_) => {
                write!(f, "Category must be 'Fiction' or 'Non-Fiction'.")
            }
            Self::TitleNotClickbait => write!(f, "Title must be clickbait-y."),
        }
    }
}

impl Error for ValidationError {}
