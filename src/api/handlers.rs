use crate::application::book::{
    ServiceDependencies, book_statistics as execute_book_statistics,
    count_loaned_books as execute_count_loaned_books, delete_book as execute_delete_book,
    find_book_by_name, get_book as execute_get_book, list_books as execute_list_books,
    loan_book as execute_loan_book, register_book as execute_register_book,
    rename_book as execute_rename_book, return_book as execute_return_book,
};
use crate::domain::{BookId, commands::RenameBook};
use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::{
    error::ApiError,
    extract::{AppJson, AppPath, AppQuery},
    types::{
        BookResponse, BookStatisticResponse, LoanBookRequest, LoanCountResponse,
        LoanHistoryResponse, RegisterBookRequest, RenameBookRequest, ReturnBookRequest,
        SearchBookQuery,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

// ============================================================================
// Command handlers (POST / PUT / DELETE)
// ============================================================================

/// POST /books - 書籍を登録
///
/// 書籍名が空の場合は422を返す。
pub async fn register_book(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<RegisterBookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let book = execute_register_book(&state.service_deps, req.to_command()).await?;

    Ok((StatusCode::CREATED, Json(BookResponse::from(book))))
}

/// PUT /books/:id - 書籍名を変更
pub async fn rename_book(
    State(state): State<Arc<AppState>>,
    AppPath(book_id): AppPath<i64>,
    AppJson(req): AppJson<RenameBookRequest>,
) -> Result<Json<BookResponse>, ApiError> {
    let cmd = RenameBook {
        book_id: BookId::from_i64(book_id),
        name: req.name,
    };

    let book = execute_rename_book(&state.service_deps, cmd).await?;

    Ok(Json(BookResponse::from(book)))
}

/// DELETE /books/:id - 書籍を削除
///
/// 存在しない書籍でも204を返す。
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    AppPath(book_id): AppPath<i64>,
) -> Result<StatusCode, ApiError> {
    execute_delete_book(&state.service_deps, BookId::from_i64(book_id)).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /books/loan - 書籍を貸し出す
///
/// 書籍が存在しない場合は404、既に貸出中の場合は409を返す。
pub async fn loan_book(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<LoanBookRequest>,
) -> Result<(StatusCode, Json<LoanHistoryResponse>), ApiError> {
    let history = execute_loan_book(&state.service_deps, req.to_command()).await?;

    Ok((StatusCode::CREATED, Json(LoanHistoryResponse::from(history))))
}

/// PUT /books/return - 書籍を返却する
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<ReturnBookRequest>,
) -> Result<Json<LoanHistoryResponse>, ApiError> {
    let history = execute_return_book(&state.service_deps, req.to_command()).await?;

    Ok(Json(LoanHistoryResponse::from(history)))
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /books/:id - 書籍をIDで取得
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    AppPath(book_id): AppPath<i64>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = execute_get_book(&state.service_deps, BookId::from_i64(book_id)).await?;

    Ok(Json(BookResponse::from(book)))
}

/// GET /books - 書籍一覧（ID昇順）
pub async fn list_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookResponse>>, ApiError> {
    let books = execute_list_books(&state.service_deps).await?;

    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

/// GET /books/search?name=... - 書籍を名前で取得
///
/// 同名の書籍が複数ある場合はIDが最小のものを返す。
pub async fn search_book(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<SearchBookQuery>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = find_book_by_name(&state.service_deps, &query.name).await?;

    Ok(Json(BookResponse::from(book)))
}

/// GET /books/statistics - 分野別の書籍数
pub async fn book_statistics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookStatisticResponse>>, ApiError> {
    let statistics = execute_book_statistics(&state.service_deps).await?;

    Ok(Json(
        statistics
            .into_iter()
            .map(BookStatisticResponse::from)
            .collect(),
    ))
}

/// GET /books/loan - 貸出中の書籍数
pub async fn count_loaned_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LoanCountResponse>, ApiError> {
    let count = execute_count_loaned_books(&state.service_deps).await?;

    Ok(Json(LoanCountResponse { count }))
}
