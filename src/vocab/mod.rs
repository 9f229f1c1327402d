pub mod book;
pub mod catalog;

pub use book::{ALL_BOOKS, ALL_UNITS, Book, Unit};
pub use catalog::{Vocab, VocabRepository};
