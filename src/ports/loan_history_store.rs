use crate::domain::{BookValidationError, LoanHistory, LoanHistoryId, LoanStatus};
use async_trait::async_trait;
use thiserror::Error;

/// 貸出履歴ストアのエラー
#[derive(Debug, Error)]
pub enum LoanHistoryStoreError {
    /// I/Oの前に検出された不正な履歴
    #[error("Invalid loan history: {0}")]
    Validation(#[from] BookValidationError),

    /// 保存しようとした履歴のIDに対応する行が存在しない
    #[error("No stored loan history has id {0}")]
    UnknownIdentity(LoanHistoryId),

    /// 同じ書籍名で貸出中の履歴が既にある
    #[error("Book '{0}' is already loaned")]
    AlreadyLoaned(String),

    /// 接続断・タイムアウト・制約違反など、バッキングストアの障害
    #[error("Loan history store failure")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<sqlx::Error> for LoanHistoryStoreError {
    fn from(err: sqlx::Error) -> Self {
        LoanHistoryStoreError::Storage(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, LoanHistoryStoreError>;

/// 貸出履歴ストアポート
///
/// 同じ書籍名で貸出中（LOANED）の履歴は1件までという制約をストアが保証する。
/// 判定と書き込みの間に他の貸出が割り込んでも、二重貸出は`AlreadyLoaned`になる。
#[async_trait]
pub trait LoanHistoryStore: Send + Sync {
    /// 履歴を保存する
    ///
    /// IDがなければ挿入、IDがあれば該当する行を更新する。
    async fn save(&self, history: LoanHistory) -> Result<LoanHistory>;

    /// 指定した書籍名・ステータスの履歴が存在するか
    async fn exists_by_book_name_and_status(
        &self,
        book_name: &str,
        status: LoanStatus,
    ) -> Result<bool>;

    /// 貸出者・書籍名が一致する貸出中の履歴を取得する
    async fn find_loaned(&self, borrower_name: &str, book_name: &str)
    -> Result<Option<LoanHistory>>;

    /// 指定したステータスの履歴数を数える
    async fn count_by_status(&self, status: LoanStatus) -> Result<usize>;

    /// すべての履歴をID昇順で取得する
    async fn find_all(&self) -> Result<Vec<LoanHistory>>;

    /// すべての履歴を削除する
    async fn delete_all(&self) -> Result<()>;
}
