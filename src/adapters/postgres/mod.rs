pub mod book_store;
pub mod loan_history_store;

// パブリックに型を再エクスポート
pub use book_store::BookStore as PostgresBookStore;
pub use loan_history_store::LoanHistoryStore as PostgresLoanHistoryStore;
