//! Command implementations.

pub mod books;
