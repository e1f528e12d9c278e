//! Search index names.

use std::fmt;

use crate::constants::{INDEX_ISSUES, INDEX_PROJECT_MEASURES, INDEX_VIEWS};
use crate::error::{DomainError, DomainResult};

/// Indices emptied by a data reset.
pub const RESET_INDICES: &[&str] = &[INDEX_ISSUES, INDEX_VIEWS, INDEX_PROJECT_MEASURES];

const FORBIDDEN_CHARS: &[char] = &['\\', '/', '*', '?', '"', '<', '>', '|', ',', '#'];

/// Name of a single concrete search index.
///
/// Wildcards, index lists and reserved names are rejected so that a
/// document deletion can only ever target one index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexName(String);

impl IndexName {
    /// Validate and wrap an index name.
    pub fn parse(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();

        if name.is_empty() {
            return Err(DomainError::validation("Index name must not be empty"));
        }
        if name == "." || name == ".." {
            return Err(DomainError::validation(format!(
                "Index name '{}' is reserved",
                name
            )));
        }
        if name.starts_with(['-', '_', '+']) {
            return Err(DomainError::validation(format!(
                "Index name '{}' must not start with '-', '_' or '+'",
                name
            )));
        }
        if name.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(DomainError::validation(format!(
                "Index name '{}' must be lowercase",
                name
            )));
        }
        if let Some(c) = name
            .chars()
            .find(|c| c.is_whitespace() || FORBIDDEN_CHARS.contains(c))
        {
            return Err(DomainError::validation(format!(
                "Index name '{}' contains forbidden character '{}'",
                name, c
            )));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IndexName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IndexName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
