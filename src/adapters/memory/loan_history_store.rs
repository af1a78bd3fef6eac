use crate::domain::{LoanHistory, LoanHistoryId, LoanStatus};
use crate::ports::loan_history_store::{
    LoanHistoryStore as LoanHistoryStoreTrait, LoanHistoryStoreError, Result,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

struct State {
    histories: BTreeMap<LoanHistoryId, LoanHistory>,
    last_id: i64,
    unavailable: bool,
}

/// LoanHistoryStoreのインメモリ実装
///
/// PostgreSQLの部分ユニークインデックスと同じく、
/// 同じ書籍名で貸出中の履歴は1件までに制限する。
pub struct LoanHistoryStore {
    state: Mutex<State>,
}

impl LoanHistoryStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                histories: BTreeMap::new(),
                last_id: 0,
                unavailable: false,
            }),
        }
    }

    /// テスト用にバッキングストアの障害を再現する
    pub fn set_unavailable(&self, unavailable: bool) {
        self.guard().unavailable = unavailable;
    }

    fn guard(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        let state = self.guard();
        if state.unavailable {
            return Err(LoanHistoryStoreError::Storage(Box::new(
                std::io::Error::other("in-memory loan history store is unavailable"),
            )));
        }
        Ok(state)
    }
}

impl Default for LoanHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LoanHistoryStoreTrait for LoanHistoryStore {
    async fn save(&self, history: LoanHistory) -> Result<LoanHistory> {
        history.validate()?;

        let mut state = self.lock()?;
        if let Some(id) = history.id() {
            if !state.histories.contains_key(&id) {
                return Err(LoanHistoryStoreError::UnknownIdentity(id));
            }
        }

        let conflict = history.status() == LoanStatus::Loaned
            && state.histories.values().any(|other| {
                other.id() != history.id()
                    && other.status() == LoanStatus::Loaned
                    && other.book_name() == history.book_name()
            });
        if conflict {
            return Err(LoanHistoryStoreError::AlreadyLoaned(
                history.book_name().to_string(),
            ));
        }

        let saved = match history.id() {
            Some(_) => history,
            None => {
                state.last_id += 1;
                history.with_id(LoanHistoryId::from_i64(state.last_id))
            }
        };
        if let Some(id) = saved.id() {
            state.histories.insert(id, saved.clone());
        }
        Ok(saved)
    }

    async fn exists_by_book_name_and_status(
        &self,
        book_name: &str,
        status: LoanStatus,
    ) -> Result<bool> {
        Ok(self
            .lock()?
            .histories
            .values()
            .any(|h| h.book_name() == book_name && h.status() == status))
    }

    async fn find_loaned(
        &self,
        borrower_name: &str,
        book_name: &str,
    ) -> Result<Option<LoanHistory>> {
        Ok(self
            .lock()?
            .histories
            .values()
            .find(|h| {
                h.borrower_name() == borrower_name
                    && h.book_name() == book_name
                    && h.status() == LoanStatus::Loaned
            })
            .cloned())
    }

    async fn count_by_status(&self, status: LoanStatus) -> Result<usize> {
        Ok(self
            .lock()?
            .histories
            .values()
            .filter(|h| h.status() == status)
            .count())
    }

    async fn find_all(&self) -> Result<Vec<LoanHistory>> {
        Ok(self.lock()?.histories.values().cloned().collect())
    }

    async fn delete_all(&self) -> Result<()> {
        self.lock()?.histories.clear();
        Ok(())
    }
}
