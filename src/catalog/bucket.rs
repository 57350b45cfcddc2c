use std::sync::Arc;

use crate::core::book::Book;

use super::arena::{Arena, NodeId};

#[derive(Debug)]
struct ListNode {
    book: Arc<Book>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

/// Doubly linked list of the books that hash to one bucket.
///
/// Appends go to the tail and removal by handle relinks the neighbours
/// directly, so both are O(1). Key uniqueness is not checked here.
#[derive(Debug, Default)]
pub struct BucketList {
    nodes: Arena<ListNode>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
}

impl BucketList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Link a book at the tail and return its handle
    pub fn append(&mut self, book: Arc<Book>) -> NodeId {
        let id = self.nodes.allocate(ListNode {
            book,
            prev: self.tail,
            next: None,
        });

        match self.tail.and_then(|tail| self.nodes.get_mut(tail)) {
            Some(tail) => tail.next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    /// Unlink a node and hand back its book.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a live member of this list. Such a handle can
    /// only come from another list or from a node that was already removed.
    pub fn remove(&mut self, node: NodeId) -> Arc<Book> {
        let Some(removed) = self.nodes.deallocate(node) else {
            panic!("bucket list node {node:?} is not a member of this list");
        };

        match removed.prev.and_then(|prev| self.nodes.get_mut(prev)) {
            Some(prev) => prev.next = removed.next,
            None => self.head = removed.next,
        }
        match removed.next.and_then(|next| self.nodes.get_mut(next)) {
            Some(next) => next.prev = removed.prev,
            None => self.tail = removed.prev,
        }

        removed.book
    }

    /// First node whose book has the given key
    #[must_use]
    pub fn find(&self, key: &str) -> Option<NodeId> {
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let node = self.nodes.get(id)?;
            if node.book.key() == key {
                return Some(id);
            }
            cursor = node.next;
        }
        None
    }

    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<&Book> {
        self.nodes.get(node).map(|n| n.book.as_ref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Books in insertion order
    #[must_use]
    pub fn iter(&self) -> BucketIter<'_> {
        BucketIter {
            list: self,
            cursor: self.head,
        }
    }
}

/// Iterator over a bucket, head to tail
pub struct BucketIter<'a> {
    list: &'a BucketList,
    cursor: Option<NodeId>,
}

impl<'a> Iterator for BucketIter<'a> {
    type Item = &'a Book;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.nodes.get(self.cursor?)?;
        self.cursor = node.next;
        Some(node.book.as_ref())
    }
}

impl<'a> IntoIterator for &'a BucketList {
    type Item = &'a Book;
    type IntoIter = BucketIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
