//! Validated structure names
//!
//! A structure name is valid by construction:
//! - Non-empty after trimming
//! - Within the configured length limit
//! - Only ASCII letters, digits, `_` and `-`
//! - Not purely numeric, so it can never be mistaken for a structure uid

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Default maximum length for structure names
pub const DEFAULT_MAX_NAME_LENGTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StructureName(String);

impl StructureName {
    /// Create a new validated structure name using the default length limit.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        Self::with_max_length(name, DEFAULT_MAX_NAME_LENGTH)
    }

    /// Create a new validated structure name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is empty after trimming
    /// - The name exceeds `max_length` characters after trimming
    /// - The name contains characters other than ASCII alphanumerics, `_` and `-`
    /// - The name consists of digits only
    pub fn with_max_length(name: impl Into<String>, max_length: usize) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Structure name cannot be empty"));
        }
        if trimmed.chars().count() > max_length {
            return Err(DomainError::validation(format!(
                "Structure name cannot exceed {} characters",
                max_length
            )));
        }
        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            return Err(DomainError::validation(format!(
                "Structure name cannot contain '{}'",
                bad
            )));
        }
        if trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::validation(
                "Structure name cannot be a number",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive key used to detect name collisions.
    pub fn key(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl fmt::Display for StructureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for StructureName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<StructureName> for String {
    fn from(name: StructureName) -> String {
        name.0
    }
}
