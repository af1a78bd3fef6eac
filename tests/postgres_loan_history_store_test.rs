//! 貸出履歴のPostgreSQL実装の契約テスト
//!
//! `DATABASE_URL=... cargo test -- --ignored` で実行する。

mod common;

use library_app::adapters::postgres::PostgresLoanHistoryStore;
use library_app::domain::{LoanHistory, LoanHistoryId, LoanStatus};
use library_app::ports::{LoanHistoryStore, LoanHistoryStoreError};
use serial_test::serial;

async fn setup_store() -> PostgresLoanHistoryStore {
    let pool = common::create_test_pool().await;
    let store = PostgresLoanHistoryStore::new(pool);
    store
        .delete_all()
        .await
        .expect("Failed to clean loan histories");
    store
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_save_and_find_loaned() {
    let store = setup_store().await;

    let saved = store
        .save(LoanHistory::loan("alice", "Clean Code").unwrap())
        .await
        .unwrap();

    let found = store.find_loaned("alice", "Clean Code").await.unwrap();
    assert_eq!(found, Some(saved));
    assert!(
        store
            .exists_by_book_name_and_status("Clean Code", LoanStatus::Loaned)
            .await
            .unwrap()
    );
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_second_loan_of_same_book_is_rejected() {
    let store = setup_store().await;
    store
        .save(LoanHistory::loan("alice", "Clean Code").unwrap())
        .await
        .unwrap();

    let result = store
        .save(LoanHistory::loan("bob", "Clean Code").unwrap())
        .await;

    assert!(matches!(
        result,
        Err(LoanHistoryStoreError::AlreadyLoaned(name)) if name == "Clean Code"
    ));
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_return_updates_status_and_count() {
    let store = setup_store().await;
    let mut history = store
        .save(LoanHistory::loan("alice", "Clean Code").unwrap())
        .await
        .unwrap();
    store
        .save(LoanHistory::loan("alice", "Refactoring").unwrap())
        .await
        .unwrap();

    history.return_book().unwrap();
    store.save(history).await.unwrap();

    assert_eq!(store.count_by_status(LoanStatus::Loaned).await.unwrap(), 1);
    assert_eq!(
        store.count_by_status(LoanStatus::Returned).await.unwrap(),
        1
    );
    assert!(
        store
            .find_loaned("alice", "Clean Code")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_save_with_unknown_id_fails() {
    let store = setup_store().await;
    let ghost = LoanHistory::loan("alice", "Clean Code")
        .unwrap()
        .with_id(LoanHistoryId::from_i64(9_999));

    let result = store.save(ghost).await;

    assert!(matches!(
        result,
        Err(LoanHistoryStoreError::UnknownIdentity(id)) if id == LoanHistoryId::from_i64(9_999)
    ));
}
