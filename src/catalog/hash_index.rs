use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::core::book::Book;

use super::bucket::{BucketIter, BucketList};

/// Map a key to a bucket.
///
/// Uses the first 8 bytes of the key's MD5 digest so bucket placement is the
/// same on every run and platform.
#[must_use]
pub fn bucket_for(key: &str, capacity: NonZeroUsize) -> usize {
    let digest = md5::compute(key.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest.0[..8]);
    let hash = u64::from_le_bytes(prefix);

    #[allow(clippy::cast_possible_truncation)]
    {
        (hash % capacity.get() as u64) as usize
    }
}

/// Fixed-size table of bucket lists.
///
/// Buckets are created the first time a key lands in them and are kept, possibly
/// empty, from then on.
#[derive(Debug)]
pub struct HashIndex {
    buckets: Vec<Option<BucketList>>,
    capacity: NonZeroUsize,
    len: usize,
}

impl HashIndex {
    #[must_use]
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            buckets: std::iter::repeat_with(|| None).take(capacity.get()).collect(),
            capacity,
            len: 0,
        }
    }

    /// Number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    #[must_use]
    pub fn bucket_of(&self, key: &str) -> usize {
        bucket_for(key, self.capacity)
    }

    /// Append a book to its bucket, returning the bucket number
    pub fn insert(&mut self, book: Arc<Book>) -> usize {
        let bucket = self.bucket_of(book.key());
        self.buckets[bucket]
            .get_or_insert_with(BucketList::new)
            .append(book);
        self.len += 1;
        bucket
    }

    /// Unlink the book with this key. A key missing from its bucket is a no-op.
    pub fn remove(&mut self, key: &str) -> Option<Arc<Book>> {
        let bucket = self.bucket_of(key);
        let list = self.buckets[bucket].as_mut()?;
        let node = list.find(key)?;
        let book = list.remove(node);
        self.len -= 1;
        Some(book)
    }

    /// Bucket-local lookup
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Book> {
        let list = self.buckets[self.bucket_of(key)].as_ref()?;
        list.get(list.find(key)?)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of every bucket, 0 for buckets never created
    #[must_use]
    pub fn bucket_lens(&self) -> Vec<usize> {
        self.buckets
            .iter()
            .map(|bucket| bucket.as_ref().map_or(0, BucketList::len))
            .collect()
    }

    /// Books in canonical order: bucket 0 first, insertion order within a bucket
    #[must_use]
    pub fn iter(&self) -> HashIter<'_> {
        HashIter {
            buckets: self.buckets.iter(),
            current: None,
        }
    }
}

/// Iterator over a [`HashIndex`] in canonical order
pub struct HashIter<'a> {
    buckets: std::slice::Iter<'a, Option<BucketList>>,
    current: Option<BucketIter<'a>>,
}

impl<'a> Iterator for HashIter<'a> {
    type Item = &'a Book;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(book) = self.current.as_mut().and_then(Iterator::next) {
                return Some(book);
            }
            // Absent buckets are skipped; exhausting the slice ends iteration
            self.current = self.buckets.next()?.as_ref().map(BucketList::iter);
        }
    }
}
