//! bookshelf-core - Core types and traits for the bookshelf toolkit.

pub mod books;
pub mod error;
pub mod store;
pub mod traits;
pub mod types;

pub use books::{Book, BookRepository, PAGE_SIZE, Page};
pub use error::Error;
pub use store::{Direction, Entity, Filter, OrderBy, PropertyMap, Query, QueryPage, Value};
pub use traits::Datastore;
pub use types::{BookId, Cursor, Key, Kind, StoreUrl};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
