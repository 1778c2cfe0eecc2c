//! Store-facing entity and query model.
//!
//! This module defines the wire-agnostic types exchanged with a
//! [`Datastore`](crate::Datastore) backend. Backends translate them to
//! their own representation (JSON RPC bodies, files on disk).

mod entity;
mod query;

pub use entity::{Entity, PropertyMap, Value};
pub use query::{Direction, Filter, OrderBy, Query, QueryPage};
