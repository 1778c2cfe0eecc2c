//! Contract tests for the file-backed store.

use tempfile::TempDir;

use bookshelf_core::error::{Error, InvalidInputError};
use bookshelf_core::store::{Filter, OrderBy, PropertyMap, Query, Value};
use bookshelf_core::types::{BookId, Cursor, Key, Kind};
use bookshelf_core::{Datastore, Entity};
use bookshelf_file::FileDatastore;

fn kind() -> Kind {
    Kind::new("Book").unwrap()
}

fn properties(title: &str, owner: &str) -> PropertyMap {
    let mut properties = PropertyMap::new();
    properties.insert("title".to_string(), Value::from(title));
    properties.insert("createdById".to_string(), Value::from(owner));
    properties
}

#[tokio::test]
async fn insert_allocates_sequential_ids() {
    let dir = TempDir::new().unwrap();
    let store = FileDatastore::new(dir.path());

    let first = store.insert(&kind(), properties("A", "u1")).await.unwrap();
    let second = store.insert(&kind(), properties("B", "u1")).await.unwrap();

    assert_eq!(first.id().as_i64(), 1);
    assert_eq!(second.id().as_i64(), 2);
}

#[tokio::test]
async fn ids_survive_reopening_the_store() {
    let dir = TempDir::new().unwrap();

    let first = {
        let store = FileDatastore::new(dir.path());
        store.insert(&kind(), properties("A", "u1")).await.unwrap()
    };

    // A fresh handle over the same root continues the same counter.
    let store = FileDatastore::new(dir.path());
    let second = store.insert(&kind(), properties("B", "u1")).await.unwrap();

    assert_eq!(first.id().as_i64(), 1);
    assert_eq!(second.id().as_i64(), 2);
}

#[tokio::test]
async fn get_missing_returns_none() {
    let dir = TempDir::new().unwrap();
    let store = FileDatastore::new(dir.path());

    let key = Key::new(kind(), BookId::new(42).unwrap());
    assert!(store.get(&key).await.unwrap().is_none());
}

#[tokio::test]
async fn get_returns_written_properties() {
    let dir = TempDir::new().unwrap();
    let store = FileDatastore::new(dir.path());

    let key = store
        .insert(&kind(), properties("Neuromancer", "u1"))
        .await
        .unwrap();

    let entity = store.get(&key).await.unwrap().unwrap();
    assert_eq!(entity.text("title"), Some("Neuromancer"));
    assert_eq!(entity.key, key);
}

#[tokio::test]
async fn update_missing_is_not_found() {
    let dir = TempDir::new().unwrap();
    let store = FileDatastore::new(dir.path());

    let key = Key::new(kind(), BookId::new(7).unwrap());
    let entity = Entity::new(key, properties("Ghost", "u1"));

    let err = store.update(&entity).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn delete_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = FileDatastore::new(dir.path());

    let key = store.insert(&kind(), properties("Gone", "u1")).await.unwrap();
    store.delete(&key).await.unwrap();
    assert!(store.get(&key).await.unwrap().is_none());

    // Second delete of the same key succeeds.
    store.delete(&key).await.unwrap();
}

#[tokio::test]
async fn query_orders_by_property_then_id() {
    let dir = TempDir::new().unwrap();
    let store = FileDatastore::new(dir.path());

    store.insert(&kind(), properties("B", "u1")).await.unwrap();
    store.insert(&kind(), properties("A", "u1")).await.unwrap();
    store.insert(&kind(), properties("B", "u1")).await.unwrap();

    let query = Query::new(kind(), OrderBy::asc("title"), 10);
    let page = store.run_query(&query).await.unwrap();

    let titles: Vec<_> = page
        .entities
        .iter()
        .map(|e| e.text("title").unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["A", "B", "B"]);

    // Equal titles come back in id order.
    assert_eq!(page.entities[1].key.id().as_i64(), 1);
    assert_eq!(page.entities[2].key.id().as_i64(), 3);
}

#[tokio::test]
async fn query_cursor_resumes_after_last_entity() {
    let dir = TempDir::new().unwrap();
    let store = FileDatastore::new(dir.path());

    for i in 0..5 {
        store
            .insert(&kind(), properties(&format!("T{:02}", i), "u1"))
            .await
            .unwrap();
    }

    let query = Query::new(kind(), OrderBy::asc("title"), 2);
    let first = store.run_query(&query).await.unwrap();
    assert_eq!(first.entities.len(), 2);
    let cursor = first.end_cursor.expect("non-empty page has a cursor");

    let second = store
        .run_query(&query.clone().with_start_cursor(cursor))
        .await
        .unwrap();
    let titles: Vec<_> = second
        .entities
        .iter()
        .map(|e| e.text("title").unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["T02", "T03"]);
}

#[tokio::test]
async fn query_filter_restricts_results() {
    let dir = TempDir::new().unwrap();
    let store = FileDatastore::new(dir.path());

    store.insert(&kind(), properties("A", "alice")).await.unwrap();
    store.insert(&kind(), properties("B", "bob")).await.unwrap();
    store.insert(&kind(), properties("C", "alice")).await.unwrap();

    let query = Query::new(kind(), OrderBy::asc("title"), 10)
        .with_filter(Filter::eq("createdById", "alice"));
    let page = store.run_query(&query).await.unwrap();

    let titles: Vec<_> = page
        .entities
        .iter()
        .map(|e| e.text("title").unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["A", "C"]);
}

#[tokio::test]
async fn empty_page_has_no_cursor() {
    let dir = TempDir::new().unwrap();
    let store = FileDatastore::new(dir.path());

    let query = Query::new(kind(), OrderBy::asc("title"), 10);
    let page = store.run_query(&query).await.unwrap();

    assert!(page.entities.is_empty());
    assert!(page.end_cursor.is_none());
}

#[tokio::test]
async fn undecodable_cursor_is_rejected() {
    let dir = TempDir::new().unwrap();
    let store = FileDatastore::new(dir.path());

    store.insert(&kind(), properties("A", "u1")).await.unwrap();

    // Well-formed token charset, but not a position this store produced.
    let cursor = Cursor::from_token("bm90LWEtcG9zaXRpb24").unwrap();
    let query = Query::new(kind(), OrderBy::asc("title"), 10).with_start_cursor(cursor);

    let err = store.run_query(&query).await.unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidInput(InvalidInputError::Cursor { .. })
    ));
}
