//! # book-catalog
//!
//! An in-memory book catalog indexed by ISBN.
//!
//! Every book is stored under two indexes that are always updated together:
//!
//! - a **hash index**: a fixed number of buckets, each a doubly linked list,
//!   giving O(1) average insertion and removal and a stable enumeration order
//! - an **order index**: an unbalanced binary search tree keyed by ISBN, giving
//!   logarithmic expected lookup and sorted traversal
//!
//! ## Example
//!
//! ```rust
//! use book_catalog::{Catalog, CatalogError};
//!
//! let mut catalog = Catalog::new();
//! catalog.add_book("97801348", "Singly linked list", "Tom").unwrap();
//! catalog.add_book("97814493", "Binary Search Trees", "Tony").unwrap();
//!
//! // Keys are unique
//! assert!(matches!(
//!     catalog.add_book("97801348", "Another", "Someone"),
//!     Err(CatalogError::DuplicateKey(_))
//! ));
//!
//! let by_tony: Vec<_> = catalog.books_by_author("Tony").collect();
//! assert_eq!(by_tony.len(), 1);
//!
//! for book in catalog.list_sorted() {
//!     println!("{book}");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: the catalog and its hash and order indexes
//! - [`core`]: book and ISBN value types
//! - [`cli`]: interactive command-line shell
//! - [`utils`]: validation of user-entered fields

pub mod catalog;
pub mod cli;
pub mod core;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::store::{Catalog, CatalogConfig, CatalogError, CatalogStats};
pub use core::book::Book;
pub use core::types::Isbn;
