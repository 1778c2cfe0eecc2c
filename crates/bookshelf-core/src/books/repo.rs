//! Book repository.

use tracing::{debug, instrument};

use super::book::{Book, property};
use crate::error::{Error, InvalidInputError};
use crate::store::{Entity, Filter, OrderBy, Query, QueryPage};
use crate::traits::Datastore;
use crate::types::{BookId, Cursor, Key, Kind};
use crate::Result;

/// Fixed page size for both list operations.
pub const PAGE_SIZE: i32 = 10;

/// One page of books plus an optional continuation token.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// The items in this page.
    pub items: Vec<T>,

    /// Token for the next page, if the store may have more items.
    ///
    /// Present only when the page came back exactly full and the store
    /// reported a resumable position. When the total item count is an
    /// exact multiple of the page size the final page still carries a
    /// token; following it yields an empty page with no token.
    pub next_token: Option<String>,
}

/// Create, read, update, delete and list books in a [`Datastore`].
///
/// The repository owns the mapping between [`Book`] and stored entities and
/// the pagination contract; everything store-specific stays behind the
/// `Datastore` trait.
#[derive(Debug, Clone)]
pub struct BookRepository<D> {
    store: D,
    kind: Kind,
}

impl<D: Datastore> BookRepository<D> {
    /// Create a repository over the given store backend.
    pub fn new(store: D) -> Self {
        Self {
            store,
            kind: Kind::new("Book").expect("static kind is valid"),
        }
    }

    /// Access the underlying store backend.
    pub fn store(&self) -> &D {
        &self.store
    }

    fn key(&self, id: BookId) -> Key {
        Key::new(self.kind.clone(), id)
    }

    /// Create a book and return its store-assigned id.
    ///
    /// All seven mapped properties are written; any `id` already on the
    /// book is ignored.
    #[instrument(skip(self, book))]
    pub async fn create(&self, book: &Book) -> Result<BookId> {
        let key = self.store.insert(&self.kind, book.to_properties()).await?;
        debug!(key = %key, "created book");
        Ok(key.id())
    }

    /// Fetch a book by id.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotFound`] if no book exists under the id.
    #[instrument(skip(self))]
    pub async fn read(&self, id: BookId) -> Result<Book> {
        let key = self.key(id);
        let entity = self
            .store
            .get(&key)
            .await?
            .ok_or_else(|| Error::not_found(key))?;
        Ok(Book::from_entity(&entity))
    }

    /// Overwrite the stored book with `book`'s fields.
    ///
    /// This is a full overwrite, never a partial merge: every property is
    /// rewritten, so fields left at their defaults clobber whatever was
    /// stored before.
    ///
    /// # Errors
    ///
    /// Fails with [`InvalidInputError::MissingId`] when the book carries no
    /// id, and with [`Error::NotFound`] when no book exists under it.
    #[instrument(skip(self, book))]
    pub async fn update(&self, book: &Book) -> Result<()> {
        let id = book.id.ok_or(InvalidInputError::MissingId)?;
        let entity = Entity::new(self.key(id), book.to_properties());
        self.store.update(&entity).await?;
        debug!(key = %entity.key, "updated book");
        Ok(())
    }

    /// Delete a book by id.
    ///
    /// Deleting an id that no longer exists succeeds.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: BookId) -> Result<()> {
        let key = self.key(id);
        self.store.delete(&key).await?;
        debug!(key = %key, "deleted book");
        Ok(())
    }

    /// List books ordered ascending by title.
    ///
    /// Pass the previous page's token to continue; `None` or a blank token
    /// starts from the beginning.
    #[instrument(skip(self))]
    pub async fn list(&self, page_token: Option<&str>) -> Result<Page<Book>> {
        let mut query = Query::new(self.kind.clone(), OrderBy::asc(property::TITLE), PAGE_SIZE);
        if let Some(cursor) = decode_token(page_token)? {
            query = query.with_start_cursor(cursor);
        }
        self.run_page(query).await
    }

    /// List books added by one user, ordered ascending by title.
    ///
    /// Filtering on one property while ordering by another requires a
    /// composite index on (createdById, title) to be provisioned on
    /// indexed backends.
    #[instrument(skip(self))]
    pub async fn list_by_user(
        &self,
        user_id: &str,
        page_token: Option<&str>,
    ) -> Result<Page<Book>> {
        let mut query = Query::new(self.kind.clone(), OrderBy::asc(property::TITLE), PAGE_SIZE)
            .with_filter(Filter::eq(property::CREATED_BY_ID, user_id));
        if let Some(cursor) = decode_token(page_token)? {
            query = query.with_start_cursor(cursor);
        }
        self.run_page(query).await
    }

    async fn run_page(&self, query: Query) -> Result<Page<Book>> {
        let QueryPage {
            entities,
            end_cursor,
        } = self.store.run_query(&query).await?;

        let items: Vec<Book> = entities.iter().map(Book::from_entity).collect();

        // A token is emitted only for an exactly full page with a store
        // cursor. There is no exact has-more signal: when the total count
        // is a multiple of the page size, the last page still carries a
        // token and the page after it comes back empty.
        let next_token = if items.len() == PAGE_SIZE as usize {
            end_cursor.map(|c| c.as_token().to_string())
        } else {
            None
        };

        debug!(count = items.len(), has_next = next_token.is_some(), "listed books");

        Ok(Page { items, next_token })
    }
}

/// Decode a caller-supplied page token.
///
/// A missing or blank token means "start from the beginning"; anything
/// else must be a well-formed cursor.
fn decode_token(page_token: Option<&str>) -> Result<Option<Cursor>> {
    match page_token {
        None => Ok(None),
        Some(token) if token.trim().is_empty() => Ok(None),
        Some(token) => Cursor::from_token(token).map(Some),
    }
}
