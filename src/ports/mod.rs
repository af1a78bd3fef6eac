pub mod book_store;
pub mod loan_history_store;

pub use book_store::{BookStore, BookStoreError};
pub use loan_history_store::{LoanHistoryStore, LoanHistoryStoreError};
