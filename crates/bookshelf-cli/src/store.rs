//! Store backend selection.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;

use bookshelf_core::store::{Entity, PropertyMap, Query, QueryPage};
use bookshelf_core::types::{Key, Kind, StoreUrl};
use bookshelf_core::{BookRepository, Datastore};
use bookshelf_file::FileDatastore;
use bookshelf_http::HttpDatastore;

/// Store selection from the command line, with environment fallbacks.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub store: Option<String>,
    pub project: Option<String>,
}

impl StoreOptions {
    fn store_url(&self) -> Result<StoreUrl> {
        let raw = match &self.store {
            Some(s) => s.clone(),
            None => std::env::var("BOOKSHELF_STORE").unwrap_or_default(),
        };
        if raw.is_empty() {
            bail!("No store configured. Pass --store or set BOOKSHELF_STORE.");
        }
        StoreUrl::new(&raw).context("Invalid store URL")
    }

    fn project_id(&self) -> Result<String> {
        let project = match &self.project {
            Some(p) => p.clone(),
            None => std::env::var("BOOKSHELF_PROJECT").unwrap_or_default(),
        };
        if project.is_empty() {
            bail!("No project configured. Pass --project or set BOOKSHELF_PROJECT.");
        }
        Ok(project)
    }
}

/// A store backend selected at runtime.
#[derive(Debug, Clone)]
pub enum AnyDatastore {
    File(FileDatastore),
    Http(HttpDatastore),
}

/// Open a repository over the configured store.
pub fn open_repository(options: &StoreOptions) -> Result<BookRepository<AnyDatastore>> {
    let url = options.store_url()?;
    tracing::debug!(url = %url, "opening store");

    let store = if url.is_local() {
        let path = url
            .to_file_path()
            .context("Failed to convert file:// URL to path")?;
        AnyDatastore::File(FileDatastore::new(path))
    } else {
        let project = options.project_id()?;
        let mut store = HttpDatastore::new(url, project);
        if let Ok(token) = std::env::var("BOOKSHELF_TOKEN") {
            if !token.is_empty() {
                store = store.with_token(token);
            }
        }
        AnyDatastore::Http(store)
    };

    Ok(BookRepository::new(store))
}

#[async_trait]
impl Datastore for AnyDatastore {
    async fn insert(&self, kind: &Kind, properties: PropertyMap) -> bookshelf_core::Result<Key> {
        match self {
            AnyDatastore::File(store) => store.insert(kind, properties).await,
            AnyDatastore::Http(store) => store.insert(kind, properties).await,
        }
    }

    async fn get(&self, key: &Key) -> bookshelf_core::Result<Option<Entity>> {
        match self {
            AnyDatastore::File(store) => store.get(key).await,
            AnyDatastore::Http(store) => store.get(key).await,
        }
    }

    async fn update(&self, entity: &Entity) -> bookshelf_core::Result<()> {
        match self {
            AnyDatastore::File(store) => store.update(entity).await,
            AnyDatastore::Http(store) => store.update(entity).await,
        }
    }

    async fn delete(&self, key: &Key) -> bookshelf_core::Result<()> {
        match self {
            AnyDatastore::File(store) => store.delete(key).await,
            AnyDatastore::Http(store) => store.delete(key).await,
        }
    }

    async fn run_query(&self, query: &Query) -> bookshelf_core::Result<QueryPage> {
        match self {
            AnyDatastore::File(store) => store.run_query(query).await,
            AnyDatastore::Http(store) => store.run_query(query).await,
        }
    }
}
