//! Datastore trait.

use async_trait::async_trait;

use crate::Result;
use crate::store::{Entity, PropertyMap, Query, QueryPage};
use crate::types::{Key, Kind};

/// The narrow interface a document-store backend must provide.
///
/// Every operation is a single request/response cycle against the backend;
/// this layer adds no retries, caching, or transactions. Implementations
/// are cheap to clone and safe for concurrent use by independent callers;
/// consistency across calls is whatever the underlying store guarantees.
#[async_trait]
pub trait Datastore: Send + Sync {
    /// Write a new entity under a freshly allocated integer id and return
    /// its complete key.
    async fn insert(&self, kind: &Kind, properties: PropertyMap) -> Result<Key>;

    /// Fetch an entity by exact key.
    ///
    /// Returns `Ok(None)` when no entity exists at the key; callers decide
    /// whether that is an error.
    async fn get(&self, key: &Key) -> Result<Option<Entity>>;

    /// Overwrite the entity at `entity.key` with the given properties.
    ///
    /// # Errors
    ///
    /// Fails with a not-found error if no entity exists at the key; this
    /// operation never creates.
    async fn update(&self, entity: &Entity) -> Result<()>;

    /// Delete the entity at the given key.
    ///
    /// Deleting an absent key is not an error.
    async fn delete(&self, key: &Key) -> Result<()>;

    /// Execute a kind-scoped query and return one page of results plus the
    /// cursor after the last returned entity.
    async fn run_query(&self, query: &Query) -> Result<QueryPage>;
}
