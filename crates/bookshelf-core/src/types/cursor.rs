//! Pagination cursor type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// An opaque, URL-safe pagination cursor.
///
/// Cursors mark a resumable position within an ordered query result set.
/// They are produced and interpreted only by store backends; everything
/// above a backend treats them as uninterpreted tokens. A blank token is
/// not a cursor at all and is rejected here; callers model "start from the
/// beginning" as the absence of a cursor.
///
/// # Example
///
/// ```
/// use bookshelf_core::Cursor;
///
/// let cursor = Cursor::from_token("Q2lBS0RncjT").unwrap();
/// assert_eq!(cursor.as_token(), "Q2lBS0RncjT");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cursor(String);

impl Cursor {
    /// Create a cursor from a caller-supplied token, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or contains characters
    /// outside the URL-safe base64 alphabet.
    pub fn from_token(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    /// Returns the token string.
    pub fn as_token(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        // Tokens use the URL-safe base64 alphabet, optionally padded.

        if s.is_empty() {
            return Err(InvalidInputError::Cursor {
                value: s.to_string(),
                reason: "cannot be empty".to_string(),
            }
            .into());
        }

        for c in s.chars() {
            if !c.is_ascii_alphanumeric() && c != '-' && c != '_' && c != '=' {
                return Err(InvalidInputError::Cursor {
                    value: s.to_string(),
                    reason: format!("contains invalid character '{}'", c),
                }
                .into());
            }
        }

        Ok(())
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Cursor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s)
    }
}

impl TryFrom<String> for Cursor {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_token(s)
    }
}

impl From<Cursor> for String {
    fn from(cursor: Cursor) -> Self {
        cursor.0
    }
}

impl AsRef<str> for Cursor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
