use crate::application::book::BookApplicationError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーと、リクエストの抽出失敗（不正なJSON・パス・クエリ）を
/// どちらも同じJSON形式のエラーレスポンスにマッピングする。
#[derive(Debug)]
pub enum ApiError {
    Application(BookApplicationError),
    /// リクエストの抽出に失敗した（axumのリジェクションのステータスを引き継ぐ）
    InvalidRequest { status: StatusCode, message: String },
}

impl From<BookApplicationError> for ApiError {
    fn from(err: BookApplicationError) -> Self {
        ApiError::Application(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self {
            ApiError::Application(err) => err,
            ApiError::InvalidRequest { status, message } => {
                let body = Json(ErrorResponse::new("INVALID_REQUEST", message));
                return (status, body).into_response();
            }
        };

        let (status, error_type, message) = match err {
            // 404 Not Found - リクエストされたリソースが存在しない
            BookApplicationError::BookNotFound => (
                StatusCode::NOT_FOUND,
                "BOOK_NOT_FOUND",
                "Book not found".to_string(),
            ),
            BookApplicationError::LoanNotFound => (
                StatusCode::NOT_FOUND,
                "LOAN_NOT_FOUND",
                "No active loan for this borrower and book".to_string(),
            ),

            // 409 Conflict - 既に貸出中
            BookApplicationError::BookAlreadyLoaned => (
                StatusCode::CONFLICT,
                "BOOK_ALREADY_LOANED",
                "Book is already loaned".to_string(),
            ),

            // 422 Unprocessable Entity - バリデーション違反
            BookApplicationError::InvalidBook(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_BOOK", msg)
            }
            BookApplicationError::InvalidLoan(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_LOAN", msg)
            }

            // 500 Internal Server Error - ストア障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            BookApplicationError::BookStoreError(ref e) => {
                tracing::error!(error = ?e, "Book store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "BOOK_STORE_ERROR",
                    "Failed to access book store".to_string(),
                )
            }
            BookApplicationError::LoanHistoryStoreError(ref e) => {
                tracing::error!(error = ?e, "Loan history store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LOAN_HISTORY_STORE_ERROR",
                    "Failed to access loan history store".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
