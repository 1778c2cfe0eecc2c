//! Core types.

mod cursor;
mod id;
mod key;
mod kind;
mod store_url;

pub use cursor::Cursor;
pub use id::BookId;
pub use key::Key;
pub use kind::Kind;
pub use store_url::StoreUrl;
