//! Author domain model.
//!
//! # Responsibility
//! - Define the persisted author record and its validated write inputs.
//! - Provide the pure name/phone validators.
//!
//! # Invariants
//! - `name` is stored trimmed and is never blank.
//! - `phone_number` is exactly ten ASCII digits.
//! - Name uniqueness is enforced by the author repository, not here.

use crate::model::validation::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Engine-assigned primary key of an author row.
pub type AuthorId = i64;

static PHONE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone number regex"));

/// Persisted author record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    /// Trimmed display name, unique across authors.
    pub name: String,
    pub phone_number: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds. Refreshed on every update.
    pub updated_at: i64,
}

impl Author {
    /// Re-runs field validators against the stored values.
    ///
    /// Used by read paths to surface rows written outside the repository.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        validate_phone_number(&self.phone_number)?;
        Ok(())
    }
}

/// Validated input for creating an author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    name: String,
    phone_number: String,
}

impl NewAuthor {
    /// Validates raw field values and keeps their normalized form.
    pub fn new(name: &str, phone_number: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: validate_name(name)?,
            phone_number: validate_phone_number(phone_number)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }
}

/// Partial update for an existing author. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorChanges {
    pub name: Option<String>,
    pub phone_number: Option<String>,
}

impl AuthorChanges {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone_number.is_none()
    }

    /// Returns a copy of `author` with every change validated and applied.
    ///
    /// Timestamps are left as-is; the repository refreshes `updated_at`.
    pub fn apply_to(&self, author: &Author) -> Result<Author, ValidationError> {
        let mut updated = author.clone();
        if let Some(name) = self.name.as_deref() {
            updated.name = validate_name(name)?;
        }
        if let Some(phone_number) = self.phone_number.as_deref() {
            updated.phone_number = validate_phone_number(phone_number)?;
        }
        Ok(updated)
    }
}

/// Rejects blank names and returns the trimmed name.
pub fn validate_name(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::AuthorNameRequired);
    }
    Ok(trimmed.to_string())
}

/// Accepts exactly ten decimal digits, with no separators or padding.
pub fn validate_phone_number(value: &str) -> Result<String, ValidationError> {
    if !PHONE_NUMBER_RE.is_match(value) {
        return Err(ValidationError::InvalidPhoneNumber);
    }
    Ok(value.to_string())
}
