//! One query module per table. Free functions over `&Connection`,
//! returning `Result<_, StorageError>`.

pub mod analyses;
pub mod entries;
pub mod reference_tables;
pub mod results;
pub mod rule_books;
