//! Repository tests against an in-memory store fake.
//!
//! The fake implements the same `Datastore` contract as the real backends
//! (equality filter, single ordering clause with id tiebreak, resumable
//! cursors, cursor only after a non-empty page) so the repository's
//! mapping and pagination behavior can be pinned down without IO.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use bookshelf_core::error::InvalidInputError;
use bookshelf_core::{
    Book, BookId, BookRepository, Cursor, Datastore, Direction, Entity, Error, Filter, Key, Kind,
    PropertyMap, Query, QueryPage, Result, Value,
};

#[derive(Clone, Default)]
struct MemoryStore {
    inner: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    next_id: i64,
    entities: BTreeMap<(String, i64), PropertyMap>,
}

impl MemoryStore {
    fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Datastore for MemoryStore {
    async fn insert(&self, kind: &Kind, properties: PropertyMap) -> Result<Key> {
        let mut state = self.inner.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        state
            .entities
            .insert((kind.as_str().to_string(), id), properties);
        Ok(Key::new(kind.clone(), BookId::new(id)?))
    }

    async fn get(&self, key: &Key) -> Result<Option<Entity>> {
        let state = self.inner.lock().unwrap();
        let properties = state
            .entities
            .get(&(key.kind().as_str().to_string(), key.id().as_i64()));
        Ok(properties.map(|p| Entity::new(key.clone(), p.clone())))
    }

    async fn update(&self, entity: &Entity) -> Result<()> {
        let mut state = self.inner.lock().unwrap();
        let slot = (
            entity.key.kind().as_str().to_string(),
            entity.key.id().as_i64(),
        );
        if !state.entities.contains_key(&slot) {
            return Err(Error::not_found(entity.key.clone()));
        }
        state.entities.insert(slot, entity.properties.clone());
        Ok(())
    }

    async fn delete(&self, key: &Key) -> Result<()> {
        let mut state = self.inner.lock().unwrap();
        state
            .entities
            .remove(&(key.kind().as_str().to_string(), key.id().as_i64()));
        Ok(())
    }

    async fn run_query(&self, query: &Query) -> Result<QueryPage> {
        let state = self.inner.lock().unwrap();

        let mut rows: Vec<(String, i64, PropertyMap)> = state
            .entities
            .iter()
            .filter(|((kind, _), _)| kind == query.kind.as_str())
            .filter(|(_, properties)| match &query.filter {
                Some(Filter::Eq { property, value }) => properties.get(property) == Some(value),
                None => true,
            })
            .filter_map(|((_, id), properties)| {
                // Entities without the ordered property are omitted.
                let order = properties
                    .get(&query.order_by.property)
                    .and_then(Value::as_text)?;
                Some((order.to_string(), *id, properties.clone()))
            })
            .collect();

        rows.sort_by(|a, b| (&a.0, a.1).cmp(&(&b.0, b.1)));
        if query.order_by.direction == Direction::Descending {
            rows.reverse();
        }

        // The fake's cursor is the decimal offset of the next row in the
        // full sorted sequence.
        let offset = match &query.start_cursor {
            Some(cursor) => {
                cursor
                    .as_token()
                    .parse::<usize>()
                    .map_err(|_| InvalidInputError::Cursor {
                        value: cursor.as_token().to_string(),
                        reason: "not a fake-store offset".to_string(),
                    })?
            }
            None => 0,
        };

        let entities: Vec<Entity> = rows
            .into_iter()
            .skip(offset)
            .take(query.limit.max(0) as usize)
            .map(|(_, id, properties)| {
                Ok(Entity::new(
                    Key::new(query.kind.clone(), BookId::new(id)?),
                    properties,
                ))
            })
            .collect::<Result<_>>()?;

        let end_cursor = if entities.is_empty() {
            None
        } else {
            Some(Cursor::from_token((offset + entities.len()).to_string())?)
        };

        Ok(QueryPage {
            entities,
            end_cursor,
        })
    }
}

fn repo() -> BookRepository<MemoryStore> {
    BookRepository::new(MemoryStore::new())
}

fn book(title: &str, user: &str) -> Book {
    Book {
        id: None,
        title: title.to_string(),
        author: "Author".to_string(),
        published_date: "2020".to_string(),
        description: format!("About {}", title),
        created_by: user.to_string(),
        created_by_id: format!("id-{}", user),
        image_url: None,
    }
}

/// Insert `count` numbered books with zero-padded titles so the title
/// ordering is unambiguous.
async fn seed(repo: &BookRepository<MemoryStore>, count: usize) {
    for i in 0..count {
        repo.create(&book(&format!("Book {:02}", i), "seeder"))
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn create_then_read_round_trips() {
    let repo = repo();

    let mut original = book("Solaris", "alice");
    original.image_url = Some("https://example.com/solaris.jpg".to_string());

    let id = repo.create(&original).await.unwrap();
    let read = repo.read(id).await.unwrap();

    assert_eq!(read.id, Some(id));
    assert_eq!(read.title, original.title);
    assert_eq!(read.author, original.author);
    assert_eq!(read.published_date, original.published_date);
    assert_eq!(read.description, original.description);
    assert_eq!(read.created_by, original.created_by);
    assert_eq!(read.created_by_id, original.created_by_id);
    assert_eq!(read.image_url, original.image_url);
}

#[tokio::test]
async fn missing_image_reads_back_as_none() {
    let repo = repo();

    let id = repo.create(&book("Roadside Picnic", "alice")).await.unwrap();
    let read = repo.read(id).await.unwrap();

    assert_eq!(read.image_url, None);
}

#[tokio::test]
async fn read_unknown_id_is_not_found() {
    let repo = repo();
    let err = repo.read(BookId::new(999).unwrap()).await.unwrap_err();
    assert!(err.is_not_found(), "expected NotFound, got: {err}");
}

#[tokio::test]
async fn update_is_full_overwrite() {
    let repo = repo();

    let id = repo.create(&book("Ubik", "alice")).await.unwrap();

    // An update that leaves created_by empty clobbers the stored value;
    // there is no partial-merge path.
    let mut replacement = book("Ubik", "");
    replacement.created_by = String::new();
    replacement.created_by_id = String::new();
    replacement.id = Some(id);
    repo.update(&replacement).await.unwrap();

    let read = repo.read(id).await.unwrap();
    assert_eq!(read.created_by, "");
    assert_eq!(read.created_by_id, "");
}

#[tokio::test]
async fn update_without_id_is_rejected() {
    let repo = repo();
    let err = repo.update(&book("No Id", "alice")).await.unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidInput(InvalidInputError::MissingId)
    ));
}

#[tokio::test]
async fn update_of_deleted_book_is_not_found() {
    let repo = repo();

    let id = repo.create(&book("Vanishing", "alice")).await.unwrap();
    repo.delete(id).await.unwrap();

    let mut book = book("Vanishing", "alice");
    book.id = Some(id);
    let err = repo.update(&book).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn delete_then_read_is_not_found() {
    let repo = repo();

    let id = repo.create(&book("Gone", "alice")).await.unwrap();
    repo.delete(id).await.unwrap();

    let err = repo.read(id).await.unwrap_err();
    assert!(err.is_not_found());

    // Deleting again is not an error.
    repo.delete(id).await.unwrap();
}

#[tokio::test]
async fn twenty_five_books_page_as_ten_ten_five() {
    let repo = repo();
    seed(&repo, 25).await;

    let first = repo.list(None).await.unwrap();
    assert_eq!(first.items.len(), 10);
    let token = first.next_token.expect("first page should continue");

    let second = repo.list(Some(&token)).await.unwrap();
    assert_eq!(second.items.len(), 10);
    let token = second.next_token.expect("second page should continue");

    let third = repo.list(Some(&token)).await.unwrap();
    assert_eq!(third.items.len(), 5);
    assert!(third.next_token.is_none(), "short page must end pagination");
}

#[tokio::test]
async fn exact_multiple_of_page_size_yields_phantom_page() {
    let repo = repo();
    seed(&repo, 20).await;

    let first = repo.list(None).await.unwrap();
    assert_eq!(first.items.len(), 10);
    let token = first.next_token.expect("first page should continue");

    // The second page is the last one, but it is exactly full, so it still
    // carries a token; only the follow-up call reveals the end.
    let second = repo.list(Some(&token)).await.unwrap();
    assert_eq!(second.items.len(), 10);
    let token = second
        .next_token
        .expect("full final page still carries a token");

    let phantom = repo.list(Some(&token)).await.unwrap();
    assert!(phantom.items.is_empty());
    assert!(phantom.next_token.is_none());
}

#[tokio::test]
async fn list_by_user_filters_and_orders() {
    let repo = repo();

    // Interleave two owners, inserting titles in reverse order.
    for i in (0..6).rev() {
        let owner = if i % 2 == 0 { "alice" } else { "bob" };
        repo.create(&book(&format!("Title {:02}", i), owner))
            .await
            .unwrap();
    }

    let page = repo.list_by_user("id-alice", None).await.unwrap();
    assert_eq!(page.items.len(), 3);
    assert!(page.next_token.is_none());
    for item in &page.items {
        assert_eq!(item.created_by_id, "id-alice");
    }

    let titles: Vec<&str> = page.items.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Title 00", "Title 02", "Title 04"]);
}

#[tokio::test]
async fn list_is_ordered_by_title_across_pages() {
    let repo = repo();
    // Insert in descending title order; listing must come back ascending.
    for i in (0..15).rev() {
        repo.create(&book(&format!("Book {:02}", i), "seeder"))
            .await
            .unwrap();
    }

    let first = repo.list(None).await.unwrap();
    let second = repo.list(first.next_token.as_deref()).await.unwrap();

    let mut titles: Vec<String> = Vec::new();
    titles.extend(first.items.iter().map(|b| b.title.clone()));
    titles.extend(second.items.iter().map(|b| b.title.clone()));

    let mut sorted = titles.clone();
    sorted.sort();
    assert_eq!(titles, sorted, "titles must be non-decreasing");
    assert_eq!(titles.len(), 15);
}

#[tokio::test]
async fn malformed_page_token_is_rejected() {
    let repo = repo();
    seed(&repo, 1).await;

    let err = repo.list(Some("not a cursor!")).await.unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidInput(InvalidInputError::Cursor { .. })
    ));

    // Blank tokens are "no cursor", not an error.
    let page = repo.list(Some("  ")).await.unwrap();
    assert_eq!(page.items.len(), 1);
}
