pub mod memory;
pub mod postgres;
