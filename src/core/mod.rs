//! Core data types for the book catalog.
//!
//! - [`Book`]: one catalog entry (ISBN, title, author)
//! - [`Isbn`]: the unique key of a book
//!
//! The catalog treats ISBNs as opaque strings. Format checks belong to whoever
//! collects the input (see [`crate::utils::validation`]).

pub mod book;
pub mod types;

pub use book::Book;
pub use types::Isbn;
