//! Entity key type.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{BookId, Kind};

/// A complete entity key: a kind plus a store-assigned integer id.
///
/// # Example
///
/// ```
/// use bookshelf_core::{BookId, Key, Kind};
///
/// let key = Key::new(Kind::new("Book").unwrap(), BookId::new(42).unwrap());
/// assert_eq!(key.to_string(), "Book/42");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    kind: Kind,
    id: BookId,
}

impl Key {
    /// Create a key from its components.
    pub fn new(kind: Kind, id: BookId) -> Self {
        Self { kind, id }
    }

    /// Returns the kind.
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Returns the id.
    pub fn id(&self) -> BookId {
        self.id
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}
