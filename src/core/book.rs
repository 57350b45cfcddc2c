use serde::{Deserialize, Serialize};

use crate::core::types::Isbn;

/// A single catalog entry.
///
/// Books are never modified once inserted; the catalog only hands out shared
/// references or clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique key
    pub isbn: Isbn,

    /// Title as entered
    pub title: String,

    /// Author as entered, matched case-sensitively
    pub author: String,
}

impl Book {
    pub fn new(
        isbn: impl Into<Isbn>,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
        }
    }

    /// The key as a plain string slice
    #[must_use]
    pub fn key(&self) -> &str {
        self.isbn.as_str()
    }
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ISBN: {}, Title: {}, Author: {}",
            self.isbn, self.title, self.author
        )
    }
}

/// The books a fresh interactive session starts with
#[must_use]
pub fn sample_books() -> Vec<Book> {
    vec![
        Book::new("97801348", "Singly linked list", "Tom"),
        Book::new("97814493", "Binary Search Trees", "Tony"),
        Book::new("97815932", "Doubly linked List", "Bruce"),
        Book::new("97801351", "Hash Table", "Dhoni"),
    ]
}
