//! Entity kind type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A validated entity kind.
///
/// Kinds name groups of entities in the store, comparable to a table or
/// collection name.
///
/// # Example
///
/// ```
/// use bookshelf_core::Kind;
///
/// let kind = Kind::new("Book").unwrap();
/// assert_eq!(kind.as_str(), "Book");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Kind(String);

impl Kind {
    /// Create a new kind from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid kind name.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Returns the kind name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        // - 1-128 characters
        // - ASCII letters, digits and underscores
        // - must start with a letter

        if s.is_empty() {
            return Err(InvalidInputError::Kind {
                value: s.to_string(),
                reason: "cannot be empty".to_string(),
            }
            .into());
        }

        if s.len() > 128 {
            return Err(InvalidInputError::Kind {
                value: s.to_string(),
                reason: "exceeds maximum length of 128 characters".to_string(),
            }
            .into());
        }

        if !s.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
            return Err(InvalidInputError::Kind {
                value: s.to_string(),
                reason: "must start with a letter".to_string(),
            }
            .into());
        }

        for c in s.chars() {
            if !c.is_ascii_alphanumeric() && c != '_' {
                return Err(InvalidInputError::Kind {
                    value: s.to_string(),
                    reason: format!("contains invalid character '{}'", c),
                }
                .into());
            }
        }

        Ok(())
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Kind {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Kind> for String {
    fn from(kind: Kind) -> Self {
        kind.0
    }
}

impl AsRef<str> for Kind {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
