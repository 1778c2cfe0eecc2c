//! Network-backed store implementation.

use async_trait::async_trait;
use tracing::{debug, instrument};

use bookshelf_core::Result;
use bookshelf_core::error::{Error, InvalidInputError, StoreError};
use bookshelf_core::store::{Entity, PropertyMap, Query, QueryPage};
use bookshelf_core::traits::Datastore;
use bookshelf_core::types::{Cursor, Key, Kind, StoreUrl};

use crate::api::{
    COMMIT, CommitRequest, CommitResponse, KindExpression, LOOKUP, LookupRequest, LookupResponse,
    Mutation, RUN_QUERY, RunQueryRequest, RunQueryResponse, WireEntity, WireFilter, WireKey,
    WireOrder, WireQuery,
};
use crate::client::DatastoreClient;

/// A network-backed store implementation over the Datastore-style JSON API.
#[derive(Debug, Clone)]
pub struct HttpDatastore {
    client: DatastoreClient,
}

impl HttpDatastore {
    /// Create a new network store for the given URL and project.
    pub fn new(url: StoreUrl, project_id: impl Into<String>) -> Self {
        Self {
            client: DatastoreClient::new(url, project_id),
        }
    }

    /// Attach a static bearer token for authenticated deployments.
    pub fn with_token(self, token: impl Into<String>) -> Self {
        Self {
            client: self.client.with_token(token),
        }
    }

    /// Returns the store URL for this instance.
    pub fn url(&self) -> &StoreUrl {
        self.client.url()
    }
}

#[async_trait]
impl Datastore for HttpDatastore {
    #[instrument(skip(self, properties))]
    async fn insert(&self, kind: &Kind, properties: PropertyMap) -> Result<Key> {
        debug!(kind = %kind, "inserting entity via RPC");

        let entity = WireEntity::new(WireKey::incomplete(kind), &properties);
        let request = CommitRequest::non_transactional(Mutation::insert(entity));

        let response: CommitResponse = self.client.call(COMMIT, &request).await?;

        let allocated = response
            .mutation_results
            .into_iter()
            .next()
            .and_then(|r| r.key)
            .ok_or_else(|| {
                Error::Store(StoreError::new(
                    200,
                    Some("INVALID_RESPONSE".to_string()),
                    Some("commit response carried no allocated key".to_string()),
                ))
            })?;

        allocated.into_key()
    }

    #[instrument(skip(self))]
    async fn get(&self, key: &Key) -> Result<Option<Entity>> {
        debug!(key = %key, "looking up entity via RPC");

        let request = LookupRequest {
            keys: vec![WireKey::complete(key)],
        };

        let response: LookupResponse = self.client.call(LOOKUP, &request).await?;

        match response.found.into_iter().next() {
            Some(result) => Ok(Some(result.entity.into_entity()?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, entity))]
    async fn update(&self, entity: &Entity) -> Result<()> {
        debug!(key = %entity.key, "updating entity via RPC");

        let wire = WireEntity::new(WireKey::complete(&entity.key), &entity.properties);
        let request = CommitRequest::non_transactional(Mutation::update(wire));

        let result: Result<CommitResponse> = self.client.call(COMMIT, &request).await;
        match result {
            Ok(_) => Ok(()),
            // The service reports an update of an absent key as NOT_FOUND.
            Err(Error::Store(err)) if err.is_not_found() => {
                Err(Error::not_found(entity.key.clone()))
            }
            Err(err) => Err(err),
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &Key) -> Result<()> {
        debug!(key = %key, "deleting entity via RPC");

        let request = CommitRequest::non_transactional(Mutation::delete(WireKey::complete(key)));
        let _: CommitResponse = self.client.call(COMMIT, &request).await?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn run_query(&self, query: &Query) -> Result<QueryPage> {
        debug!(kind = %query.kind, "running query via RPC");

        let request = RunQueryRequest {
            query: WireQuery {
                kind: vec![KindExpression {
                    name: query.kind.as_str().to_string(),
                }],
                filter: query.filter.as_ref().map(WireFilter::from),
                order: vec![WireOrder::new(
                    &query.order_by.property,
                    query.order_by.direction,
                )],
                limit: query.limit,
                start_cursor: query
                    .start_cursor
                    .as_ref()
                    .map(|c| c.as_token().to_string()),
            },
        };

        let response: RunQueryResponse = self.client.call(RUN_QUERY, &request).await?;

        let entities = response
            .batch
            .entity_results
            .into_iter()
            .map(|r| r.entity.into_entity())
            .collect::<Result<Vec<_>>>()?;

        // An end cursor only means something after a non-empty page; the
        // service echoes one even for empty batches.
        let end_cursor = if entities.is_empty() {
            None
        } else {
            response
                .batch
                .end_cursor
                .map(|token| {
                    Cursor::from_token(token.clone()).map_err(|_| {
                        Error::InvalidInput(InvalidInputError::Cursor {
                            value: token,
                            reason: "service returned a non-URL-safe cursor".to_string(),
                        })
                    })
                })
                .transpose()?
        };

        Ok(QueryPage {
            entities,
            end_cursor,
        })
    }
}
