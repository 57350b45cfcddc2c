//! Book catalog storage and indexing.
//!
//! A [`Catalog`](store::Catalog) keeps every book in two indexes at once:
//!
//! - [`HashIndex`](hash_index::HashIndex): a fixed number of buckets, each a
//!   doubly linked [`BucketList`](bucket::BucketList). Defines the canonical
//!   enumeration order used by listing and author scans.
//! - [`OrderIndex`](order_index::OrderIndex): an unbalanced binary search tree
//!   keyed by ISBN, used for point lookups and sorted listing.
//!
//! Nodes of both structures live in an [`Arena`](arena::Arena) and link to each
//! other by [`NodeId`](arena::NodeId), so there are no owning back-pointers.
//!
//! ## Example
//!
//! ```rust
//! use book_catalog::Catalog;
//!
//! let mut catalog = Catalog::new();
//! catalog.add_book("97814493", "Binary Search Trees", "Tony").unwrap();
//! catalog.add_book("97801351", "Hash Table", "Dhoni").unwrap();
//!
//! assert_eq!(catalog.count_books(), 2);
//! assert_eq!(catalog.find_book("97814493").unwrap().author, "Tony");
//!
//! catalog.remove_book("97814493").unwrap();
//! assert!(catalog.find_book("97814493").is_none());
//! ```

pub mod arena;
pub mod bucket;
pub mod hash_index;
pub mod order_index;
pub mod store;
