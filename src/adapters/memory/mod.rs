pub mod book_store;
pub mod loan_history_store;

pub use book_store::BookStore as InMemoryBookStore;
pub use loan_history_store::LoanHistoryStore as InMemoryLoanHistoryStore;
