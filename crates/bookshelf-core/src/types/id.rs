//! Book id type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A store-assigned book identifier.
///
/// Ids are allocated by the store on creation and are immutable afterwards.
/// They are always positive.
///
/// # Example
///
/// ```
/// use bookshelf_core::BookId;
///
/// let id = BookId::new(42).unwrap();
/// assert_eq!(id.as_i64(), 42);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct BookId(i64);

impl BookId {
    /// Create a new id, validating that it is positive.
    ///
    /// # Errors
    ///
    /// Returns an error for zero or negative values.
    pub fn new(id: i64) -> Result<Self, Error> {
        if id <= 0 {
            return Err(InvalidInputError::Id {
                value: id.to_string(),
                reason: "must be positive".to_string(),
            }
            .into());
        }
        Ok(Self(id))
    }

    /// Returns the raw integer id.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id: i64 = s.parse().map_err(|_| InvalidInputError::Id {
            value: s.to_string(),
            reason: "not an integer".to_string(),
        })?;
        Self::new(id)
    }
}

impl TryFrom<i64> for BookId {
    type Error = Error;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<BookId> for i64 {
    fn from(id: BookId) -> Self {
        id.0
    }
}
