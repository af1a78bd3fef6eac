//! PostgreSQL実装の契約テスト
//!
//! 実データベースが必要なため既定では無視される。
//! `DATABASE_URL=... cargo test -- --ignored` で実行する。

mod common;

use futures::TryStreamExt;
use library_app::adapters::postgres::PostgresBookStore;
use library_app::domain::{Book, BookId, BookType};
use library_app::ports::{BookStore, BookStoreError};
use serial_test::serial;

async fn setup_store() -> PostgresBookStore {
    let pool = common::create_test_pool().await;
    let store = PostgresBookStore::new(pool);
    store.delete_all().await.expect("Failed to clean books");
    store
}

fn book(name: &str, book_type: BookType) -> Book {
    Book::new(name, book_type).unwrap()
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_save_and_find_by_id() {
    let store = setup_store().await;
    let original = book("Clean Code", BookType::Computer);

    let saved = store.save(original.clone()).await.unwrap();
    let id = saved.id().expect("id should be assigned");

    let found = store.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(found, original.with_id(id));
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_save_with_existing_id_updates() {
    let store = setup_store().await;
    let mut saved = store.save(book("Old Name", BookType::Economy)).await.unwrap();
    let id = saved.id().unwrap();

    saved.rename("New Name").unwrap();
    store.save(saved).await.unwrap();

    let all = store.find_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id(), Some(id));
    assert_eq!(all[0].name(), "New Name");
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_save_with_unknown_id_fails() {
    let store = setup_store().await;
    let stray = Book::restore(BookId::from_i64(i64::MAX), "Ghost".to_string(), BookType::Science);

    let result = store.save(stray).await;

    assert!(matches!(result, Err(BookStoreError::UnknownIdentity(_))));
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_find_by_name() {
    let store = setup_store().await;
    let first = store.save(book("Duplicate", BookType::Society)).await.unwrap();
    store.save(book("Duplicate", BookType::Language)).await.unwrap();
    store.save(book("Other", BookType::Language)).await.unwrap();

    let found = store.find_by_name("Duplicate").await.unwrap().unwrap();
    assert_eq!(found.id(), first.id());

    assert!(store.find_by_name("Missing").await.unwrap().is_none());
    // 完全一致のみ
    assert!(store.find_by_name("duplicate").await.unwrap().is_none());
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_delete_by_id_is_idempotent() {
    let store = setup_store().await;
    let saved = store.save(book("Temp", BookType::Computer)).await.unwrap();
    let id = saved.id().unwrap();

    store.delete_by_id(id).await.unwrap();
    store.delete_by_id(id).await.unwrap();

    assert!(store.find_by_id(id).await.unwrap().is_none());
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_find_all_and_stream_all_in_id_order() {
    let store = setup_store().await;
    for name in ["C", "A", "B"] {
        store.save(book(name, BookType::Computer)).await.unwrap();
    }

    let all = store.find_all().await.unwrap();
    let streamed: Vec<Book> = store.stream_all().try_collect().await.unwrap();

    let names: Vec<&str> = all.iter().map(|b| b.name()).collect();
    assert_eq!(names, vec!["C", "A", "B"]);
    assert_eq!(all, streamed);
    assert!(all.windows(2).all(|w| w[0].id() < w[1].id()));
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_unreachable_database_is_storage_error() {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_millis(200))
        .connect_lazy("postgres://nobody@127.0.0.1:1/nowhere")
        .unwrap();
    let store = PostgresBookStore::new(pool);

    let result = store.find_by_id(BookId::from_i64(1)).await;

    assert!(matches!(result, Err(BookStoreError::Storage(_))));
}
