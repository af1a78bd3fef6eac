use crate::domain::{Book, BookId};
use crate::ports::book_store::{BookStore as BookStoreTrait, BookStoreError, Result};
use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

struct State {
    books: BTreeMap<BookId, Book>,
    last_id: i64,
    unavailable: bool,
}

/// BookStoreのインメモリ実装
///
/// PostgreSQL実装と同じ意味論（採番・upsert・同名時のID最小優先・ID昇順）を持つ。
/// IDは単調増加で採番し、削除後も再利用しない。
/// テストやDATABASE_URL未設定時の起動に使用する。
pub struct BookStore {
    state: Mutex<State>,
}

impl BookStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                books: BTreeMap::new(),
                last_id: 0,
                unavailable: false,
            }),
        }
    }

    /// テスト用にバッキングストアの障害を再現する
    ///
    /// 有効な間はすべての操作が`BookStoreError::Storage`で失敗する。
    pub fn set_unavailable(&self, unavailable: bool) {
        self.guard().unavailable = unavailable;
    }

    /// ロックを取得する
    ///
    /// クリティカルセクション内でパニックしうる処理はないため、
    /// ポイズンされていても状態はそのまま使える。
    fn guard(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        let state = self.guard();
        if state.unavailable {
            return Err(storage_error("in-memory book store is unavailable"));
        }
        Ok(state)
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::new()
    }
}

fn storage_error(message: &str) -> BookStoreError {
    BookStoreError::Storage(Box::new(std::io::Error::other(message.to_string())))
}

#[async_trait]
impl BookStoreTrait for BookStore {
    async fn save(&self, book: Book) -> Result<Book> {
        book.validate()?;

        let mut state = self.lock()?;
        let saved = match book.id() {
            None => {
                state.last_id += 1;
                book.with_id(BookId::from_i64(state.last_id))
            }
            Some(id) if state.books.contains_key(&id) => book,
            Some(id) => return Err(BookStoreError::UnknownIdentity(id)),
        };

        if let Some(id) = saved.id() {
            state.books.insert(id, saved.clone());
        }
        Ok(saved)
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>> {
        Ok(self.lock()?.books.get(&id).cloned())
    }

    /// BTreeMapはID昇順なので、最初に一致したものがID最小
    async fn find_by_name(&self, name: &str) -> Result<Option<Book>> {
        Ok(self
            .lock()?
            .books
            .values()
            .find(|book| book.name() == name)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Book>> {
        Ok(self.lock()?.books.values().cloned().collect())
    }

    async fn delete_by_id(&self, id: BookId) -> Result<()> {
        self.lock()?.books.remove(&id);
        Ok(())
    }

    async fn delete_all(&self) -> Result<()> {
        self.lock()?.books.clear();
        Ok(())
    }

    fn stream_all(&self) -> BoxStream<'_, Result<Book>> {
        match self.lock() {
            Ok(state) => {
                let snapshot: Vec<Book> = state.books.values().cloned().collect();
                stream::iter(snapshot.into_iter().map(Ok)).boxed()
            }
            Err(e) => stream::once(async move { Err(e) }).boxed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookType;
    use futures::TryStreamExt;

    fn book(name: &str) -> Book {
        Book::new(name, BookType::Computer).unwrap()
    }

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let store = BookStore::new();

        let first = store.save(book("A")).await.unwrap();
        let second = store.save(book("B")).await.unwrap();

        assert_eq!(first.id(), Some(BookId::from_i64(1)));
        assert_eq!(second.id(), Some(BookId::from_i64(2)));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = BookStore::new();
        let first = store.save(book("A")).await.unwrap();
        store.delete_by_id(first.id().unwrap()).await.unwrap();

        let second = store.save(book("B")).await.unwrap();

        assert_ne!(first.id(), second.id());
        assert_eq!(second.id(), Some(BookId::from_i64(2)));
    }

    #[tokio::test]
    async fn test_save_with_unknown_id_fails() {
        let store = BookStore::new();
        let stray = Book::restore(BookId::from_i64(99), "Ghost".to_string(), BookType::Science);

        let result = store.save(stray).await;

        assert!(matches!(
            result,
            Err(BookStoreError::UnknownIdentity(id)) if id == BookId::from_i64(99)
        ));
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_rejects_invalid_book_before_io() {
        let store = BookStore::new();
        store.set_unavailable(true);
        let invalid = Book::restore(BookId::from_i64(1), " ".to_string(), BookType::Economy);

        // 障害中でもバリデーションエラーが先に返る
        let result = store.save(invalid).await;

        assert!(matches!(result, Err(BookStoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_find_by_name_prefers_lowest_id() {
        let store = BookStore::new();
        let first = store.save(book("Duplicate")).await.unwrap();
        store.save(book("Duplicate")).await.unwrap();

        let found = store.find_by_name("Duplicate").await.unwrap().unwrap();

        assert_eq!(found.id(), first.id());
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_operation() {
        let store = BookStore::new();
        store.set_unavailable(true);

        assert!(matches!(
            store.find_by_id(BookId::from_i64(1)).await,
            Err(BookStoreError::Storage(_))
        ));
        assert!(matches!(
            store.save(book("A")).await,
            Err(BookStoreError::Storage(_))
        ));
        assert!(store.stream_all().try_collect::<Vec<_>>().await.is_err());

        store.set_unavailable(false);
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failure_injection_survives_poisoned_lock() {
        let store = std::sync::Arc::new(BookStore::new());
        store.save(book("A")).await.unwrap();

        // ロックを保持したままパニックしてポイズンさせる
        let poisoner = store.clone();
        let result = std::thread::spawn(move || {
            let _state = poisoner.state.lock().unwrap();
            panic!("poison the lock");
        })
        .join();
        assert!(result.is_err());
        assert!(store.state.is_poisoned());

        store.set_unavailable(true);
        assert!(matches!(
            store.find_all().await,
            Err(BookStoreError::Storage(_))
        ));

        store.set_unavailable(false);
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_stream_all_in_id_order() {
        let store = BookStore::new();
        for name in ["C", "A", "B"] {
            store.save(book(name)).await.unwrap();
        }

        let names: Vec<String> = store
            .stream_all()
            .map_ok(|b| b.name().to_string())
            .try_collect()
            .await
            .unwrap();

        assert_eq!(names, vec!["C", "A", "B"]);
    }
}
