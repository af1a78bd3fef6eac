mod book_service;
mod errors;
mod loan_service;

pub use book_service::{
    BookStatistic, ServiceDependencies, book_statistics, delete_book, find_book_by_name,
    get_book, list_books, register_book, rename_book,
};
pub use errors::{BookApplicationError, Result};
pub use loan_service::{count_loaned_books, loan_book, return_book};
