use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::book::Book;
use crate::core::types::Isbn;

use super::hash_index::{HashIndex, HashIter};
use super::order_index::{InOrderIter, OrderIndex};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("A book with ISBN {0} already exists")]
    DuplicateKey(Isbn),

    #[error("No book with ISBN {0} in the catalog")]
    NotFound(Isbn),

    #[error("Invalid bucket capacity {0}: at least one bucket is required")]
    InvalidCapacity(usize),
}

/// Default number of hash buckets
pub const DEFAULT_CAPACITY: usize = 10;

const DEFAULT_BUCKETS: NonZeroUsize = match NonZeroUsize::new(DEFAULT_CAPACITY) {
    Some(buckets) => buckets,
    None => panic!("DEFAULT_CAPACITY must be non-zero"),
};

/// Configuration for a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Number of hash buckets, fixed for the catalog's lifetime
    pub capacity: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Shape of the two indexes at a point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub count: usize,
    pub capacity: usize,
    pub occupied_buckets: usize,
    pub longest_bucket: usize,
    pub tree_height: usize,
}

/// The book catalog.
///
/// Every book is held by both a [`HashIndex`] (canonical enumeration order,
/// author scans) and an [`OrderIndex`] (point lookups, sorted listing). Both
/// are updated inside each mutating call, so the two always hold the same
/// set of keys once a call returns.
///
/// Collecting books into a `Catalog` keeps the first book for each ISBN and
/// drops later duplicates with a warning. Use [`Catalog::insert`] to see the
/// `DuplicateKey` error instead.
#[derive(Debug)]
pub struct Catalog {
    hash_index: HashIndex,
    order_index: OrderIndex,
}

impl Catalog {
    /// Create an empty catalog with the default bucket count
    #[must_use]
    pub fn new() -> Self {
        Self {
            hash_index: HashIndex::with_capacity(DEFAULT_BUCKETS),
            order_index: OrderIndex::new(),
        }
    }

    /// Create an empty catalog from a configuration
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidCapacity` if `config.capacity` is zero.
    pub fn with_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let capacity = NonZeroUsize::new(config.capacity)
            .ok_or(CatalogError::InvalidCapacity(config.capacity))?;
        Ok(Self {
            hash_index: HashIndex::with_capacity(capacity),
            order_index: OrderIndex::new(),
        })
    }

    /// Add a book built from its parts
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateKey` if the ISBN is already present.
    pub fn add_book(
        &mut self,
        isbn: impl Into<Isbn>,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> Result<(), CatalogError> {
        self.insert(Book::new(isbn, title, author))
    }

    /// Add a book to both indexes
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateKey` if the ISBN is already present.
    pub fn insert(&mut self, book: Book) -> Result<(), CatalogError> {
        if self.order_index.contains(book.key()) {
            warn!(isbn = %book.isbn, "Rejecting duplicate ISBN");
            return Err(CatalogError::DuplicateKey(book.isbn));
        }

        let book = Arc::new(book);
        let bucket = self.hash_index.insert(Arc::clone(&book));
        debug!(isbn = %book.isbn, bucket, "Added book");
        self.order_index.insert(book);

        debug_assert_eq!(self.hash_index.len(), self.order_index.len());
        Ok(())
    }

    /// Look up a book by ISBN through the order index
    #[must_use]
    pub fn find_book(&self, isbn: &str) -> Option<&Book> {
        self.order_index.search(isbn)
    }

    /// Remove a book from both indexes and return it
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no book has this ISBN.
    pub fn remove_book(&mut self, isbn: &str) -> Result<Book, CatalogError> {
        let Some(book) = self.order_index.remove(isbn) else {
            return Err(CatalogError::NotFound(Isbn::new(isbn)));
        };

        if self.hash_index.remove(isbn).is_none() {
            // Only reachable if the indexes had already diverged
            warn!(isbn = %isbn, "Book was missing from the hash index");
        }
        debug!(isbn = %isbn, "Removed book");

        debug_assert_eq!(self.hash_index.len(), self.order_index.len());
        // Both index handles are gone, so this is normally the last reference
        Ok(Arc::try_unwrap(book).unwrap_or_else(|shared| (*shared).clone()))
    }

    /// Every book in canonical order (bucket order, then insertion order)
    #[must_use]
    pub fn list_all(&self) -> HashIter<'_> {
        self.hash_index.iter()
    }

    /// Every book in ascending ISBN order
    #[must_use]
    pub fn list_sorted(&self) -> InOrderIter<'_> {
        self.order_index.iter()
    }

    /// Number of books in the catalog
    #[must_use]
    pub fn count_books(&self) -> usize {
        self.hash_index.len()
    }

    /// Books whose author matches exactly (case-sensitive), in canonical order
    #[must_use]
    pub fn books_by_author<'a>(&'a self, author: &'a str) -> impl Iterator<Item = &'a Book> + 'a {
        self.list_all().filter(move |book| book.author == author)
    }

    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        let bucket_lens = self.hash_index.bucket_lens();
        CatalogStats {
            count: self.count_books(),
            capacity: self.hash_index.capacity(),
            occupied_buckets: bucket_lens.iter().filter(|&&len| len > 0).count(),
            longest_bucket: bucket_lens.iter().copied().max().unwrap_or(0),
            tree_height: self.order_index.height(),
        }
    }

    /// Number of hash buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.hash_index.capacity()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hash_index.is_empty()
    }

    /// Read-only view of the hash index
    #[must_use]
    pub fn hash_index(&self) -> &HashIndex {
        &self.hash_index
    }

    /// Read-only view of the order index
    #[must_use]
    pub fn order_index(&self) -> &OrderIndex {
        &self.order_index
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Book> for Catalog {
    /// Collect books into a default catalog. Later duplicates of an ISBN are dropped.
    fn from_iter<I: IntoIterator<Item = Book>>(iter: I) -> Self {
        let mut catalog = Self::new();
        let mut skipped = 0usize;
        for book in iter {
            // insert already logs each rejected ISBN
            if catalog.insert(book).is_err() {
                skipped += 1;
            }
        }
        if skipped > 0 {
            warn!(skipped, "Dropped duplicate books while collecting a catalog");
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::book::sample_books;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        for book in sample_books() {
            catalog.insert(book).unwrap();
        }
        catalog
    }

    #[test]
    fn test_sample_scenario() {
        let mut catalog = sample_catalog();
        assert_eq!(catalog.count_books(), 4);

        let found = catalog.find_book("97814493").unwrap();
        assert_eq!(found.title, "Binary Search Trees");
        assert_eq!(found.author, "Tony");

        let by_tony: Vec<_> = catalog.books_by_author("Tony").collect();
        assert_eq!(by_tony.len(), 1);
        assert_eq!(by_tony[0].key(), "97814493");

        let removed = catalog.remove_book("97814493").unwrap();
        assert_eq!(removed.title, "Binary Search Trees");
        assert_eq!(catalog.count_books(), 3);
        assert!(catalog.find_book("97814493").is_none());
        assert!(!catalog.order_index().contains("97814493"));
        assert!(catalog.hash_index().get("97814493").is_none());
    }

    #[test]
    fn test_duplicate_add_is_rejected() {
        let mut catalog = sample_catalog();
        let err = catalog
            .add_book("97801348", "Another title", "Someone")
            .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateKey(Isbn::new("97801348")));
        assert_eq!(catalog.count_books(), 4);
        // The original record is untouched
        assert_eq!(catalog.find_book("97801348").unwrap().author, "Tom");
    }

    #[test]
    fn test_remove_missing_is_not_found() {
        let mut catalog = sample_catalog();
        let err = catalog.remove_book("00000000").unwrap_err();
        assert_eq!(err, CatalogError::NotFound(Isbn::new("00000000")));
        assert_eq!(catalog.count_books(), 4);
    }

    #[test]
    fn test_remove_twice() {
        let mut catalog = sample_catalog();
        assert!(catalog.remove_book("97801351").is_ok());
        assert!(matches!(
            catalog.remove_book("97801351"),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = Catalog::with_config(&CatalogConfig { capacity: 0 }).unwrap_err();
        assert_eq!(err, CatalogError::InvalidCapacity(0));
    }

    #[test]
    fn test_configured_capacity_is_used() {
        let catalog = Catalog::with_config(&CatalogConfig { capacity: 3 }).unwrap();
        assert_eq!(catalog.capacity(), 3);
        assert_eq!(catalog.hash_index().bucket_lens(), vec![0, 0, 0]);
        assert_eq!(Catalog::new().capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_single_bucket_catalog() {
        let mut catalog = Catalog::with_config(&CatalogConfig { capacity: 1 }).unwrap();
        for book in sample_books() {
            catalog.insert(book).unwrap();
        }
        // One bucket means canonical order is plain insertion order
        let keys: Vec<_> = catalog.list_all().map(Book::key).collect();
        assert_eq!(keys, vec!["97801348", "97814493", "97815932", "97801351"]);
        assert_eq!(catalog.stats().longest_bucket, 4);
    }

    #[test]
    fn test_list_sorted() {
        let catalog = sample_catalog();
        let keys: Vec<_> = catalog.list_sorted().map(Book::key).collect();
        assert_eq!(keys, vec!["97801348", "97801351", "97814493", "97815932"]);
    }

    #[test]
    fn test_books_by_author_is_case_sensitive() {
        let mut catalog = sample_catalog();
        catalog.add_book("1", "Another", "Tom").unwrap();

        assert_eq!(catalog.books_by_author("Tom").count(), 2);
        assert_eq!(catalog.books_by_author("tom").count(), 0);
        assert_eq!(catalog.books_by_author("Nobody").count(), 0);
    }

    #[test]
    fn test_stats() {
        let catalog = sample_catalog();
        let stats = catalog.stats();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.capacity, DEFAULT_CAPACITY);
        assert!(stats.occupied_buckets >= 1 && stats.occupied_buckets <= 4);
        assert!(stats.longest_bucket >= 1);
        assert!(stats.tree_height >= 2 && stats.tree_height <= 4);
    }

    #[test]
    fn test_from_iterator_skips_duplicates() {
        let mut books = sample_books();
        books.push(Book::new("97801348", "Dup", "Dup"));
        let catalog: Catalog = books.into_iter().collect();
        assert_eq!(catalog.count_books(), 4);
        assert_eq!(catalog.find_book("97801348").unwrap().title, "Singly linked list");
        assert_eq!(catalog.list_all().filter(|b| b.key() == "97801348").count(), 1);
    }

    #[test]
    fn test_catalog_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Catalog>();
    }
}
