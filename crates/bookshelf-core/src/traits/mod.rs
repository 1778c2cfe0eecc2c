//! Core traits for store backends.

mod datastore;

pub use datastore::Datastore;
