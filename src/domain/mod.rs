pub mod book;
pub mod commands;
pub mod errors;
pub mod loan_history;
pub mod value_objects;

pub use book::*;
pub use errors::*;
pub use loan_history::*;
pub use value_objects::*;
