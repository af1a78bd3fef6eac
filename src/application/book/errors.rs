use crate::ports::{BookStoreError, LoanHistoryStoreError};
use thiserror::Error;

/// 書籍管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum BookApplicationError {
    /// 書籍が見つからない
    #[error("Book not found")]
    BookNotFound,

    /// 書籍の内容が不正（例: 空の書籍名）
    #[error("Invalid book: {0}")]
    InvalidBook(String),

    /// 書籍が既に貸出中
    #[error("Book is already loaned")]
    BookAlreadyLoaned,

    /// 貸出中の履歴が見つからない
    #[error("Loan not found")]
    LoanNotFound,

    /// 貸出の内容が不正（例: 空の貸出者名）
    #[error("Invalid loan: {0}")]
    InvalidLoan(String),

    /// BookStoreのエラー
    #[error("Book store error")]
    BookStoreError(#[source] BookStoreError),

    /// LoanHistoryStoreのエラー
    #[error("Loan history store error")]
    LoanHistoryStoreError(#[source] LoanHistoryStoreError),
}

impl From<BookStoreError> for BookApplicationError {
    /// バリデーション起因のエラーはInvalidBookに寄せる
    fn from(err: BookStoreError) -> Self {
        match err {
            BookStoreError::Validation(e) => BookApplicationError::InvalidBook(e.to_string()),
            BookStoreError::UnknownIdentity(_) => BookApplicationError::BookNotFound,
            other => BookApplicationError::BookStoreError(other),
        }
    }
}

impl From<LoanHistoryStoreError> for BookApplicationError {
    fn from(err: LoanHistoryStoreError) -> Self {
        match err {
            LoanHistoryStoreError::Validation(e) => BookApplicationError::InvalidLoan(e.to_string()),
            LoanHistoryStoreError::UnknownIdentity(_) => BookApplicationError::LoanNotFound,
            LoanHistoryStoreError::AlreadyLoaned(_) => BookApplicationError::BookAlreadyLoaned,
            other => BookApplicationError::LoanHistoryStoreError(other),
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, BookApplicationError>;
