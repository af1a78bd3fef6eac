use serde::{Deserialize, Serialize};

use crate::application::book::BookStatistic;
use crate::domain::{
    Book, BookType, LoanHistory, LoanStatus,
    commands::{LoanBook, RegisterBook, ReturnBook},
};

/// 書籍登録リクエスト（POST /books）
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterBookRequest {
    pub name: String,
    pub book_type: BookType,
}

impl RegisterBookRequest {
    pub fn to_command(&self) -> RegisterBook {
        RegisterBook {
            name: self.name.clone(),
            book_type: self.book_type,
        }
    }
}

/// 書籍名変更リクエスト（PUT /books/:id）
#[derive(Debug, Serialize, Deserialize)]
pub struct RenameBookRequest {
    pub name: String,
}

/// 書籍名検索のクエリパラメータ（GET /books/search）
#[derive(Debug, Deserialize)]
pub struct SearchBookQuery {
    pub name: String,
}

/// 書籍レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct BookResponse {
    pub id: Option<i64>,
    pub name: String,
    pub book_type: BookType,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id().map(|id| id.value()),
            name: book.name().to_string(),
            book_type: book.book_type(),
        }
    }
}

/// 分野別統計レスポンス（GET /books/statistics）
#[derive(Debug, Serialize, Deserialize)]
pub struct BookStatisticResponse {
    pub book_type: BookType,
    pub count: usize,
}

impl From<BookStatistic> for BookStatisticResponse {
    fn from(stat: BookStatistic) -> Self {
        Self {
            book_type: stat.book_type,
            count: stat.count,
        }
    }
}

/// 貸出リクエスト（POST /books/loan）
#[derive(Debug, Serialize, Deserialize)]
pub struct LoanBookRequest {
    pub borrower_name: String,
    pub book_name: String,
}

impl LoanBookRequest {
    pub fn to_command(&self) -> LoanBook {
        LoanBook {
            borrower_name: self.borrower_name.clone(),
            book_name: self.book_name.clone(),
        }
    }
}

/// 返却リクエスト（PUT /books/return）
#[derive(Debug, Serialize, Deserialize)]
pub struct ReturnBookRequest {
    pub borrower_name: String,
    pub book_name: String,
}

impl ReturnBookRequest {
    pub fn to_command(&self) -> ReturnBook {
        ReturnBook {
            borrower_name: self.borrower_name.clone(),
            book_name: self.book_name.clone(),
        }
    }
}

/// 貸出履歴レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct LoanHistoryResponse {
    pub id: Option<i64>,
    pub borrower_name: String,
    pub book_name: String,
    pub status: LoanStatus,
}

impl From<LoanHistory> for LoanHistoryResponse {
    fn from(history: LoanHistory) -> Self {
        Self {
            id: history.id().map(|id| id.value()),
            borrower_name: history.borrower_name().to_string(),
            book_name: history.book_name().to_string(),
            status: history.status(),
        }
    }
}

/// 貸出中の書籍数レスポンス（GET /books/loan）
#[derive(Debug, Serialize, Deserialize)]
pub struct LoanCountResponse {
    pub count: usize,
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
