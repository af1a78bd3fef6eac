use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, book_statistics, count_loaned_books, delete_book, get_book, list_books, loan_book,
    register_book, rename_book, return_book, search_book,
};

/// Creates the API router with all book catalogue endpoints
///
/// - POST /books - Register a book
/// - GET /books - List books
/// - GET /books/search?name= - Find a book by name
/// - GET /books/statistics - Count books per type
/// - POST /books/loan - Loan a book by name
/// - GET /books/loan - Count loaned books
/// - PUT /books/return - Return a loaned book
/// - GET /books/:id - Get a book
/// - PUT /books/:id - Rename a book
/// - DELETE /books/:id - Delete a book
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/books", get(list_books).post(register_book))
        .route("/books/search", get(search_book))
        .route("/books/statistics", get(book_statistics))
        .route("/books/loan", get(count_loaned_books).post(loan_book))
        .route("/books/return", put(return_book))
        .route(
            "/books/:id",
            get(get_book).put(rename_book).delete(delete_book),
        )
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
