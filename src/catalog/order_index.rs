use std::cmp::Ordering;
use std::sync::Arc;

use crate::core::book::Book;

use super::arena::{Arena, NodeId};

#[derive(Debug)]
struct TreeNode {
    book: Arc<Book>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// Unbalanced binary search tree keyed by ISBN.
///
/// Keys in a node's left subtree compare less than the node's key and keys in
/// its right subtree compare greater or equal. There is no rebalancing, so
/// inserting keys in sorted order produces a chain. Every walk is iterative,
/// which keeps a degenerate tree from exhausting the stack.
#[derive(Debug, Default)]
pub struct OrderIndex {
    nodes: Arena<TreeNode>,
    root: Option<NodeId>,
}

impl OrderIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a book as a new leaf. Equal keys go right.
    pub fn insert(&mut self, book: Arc<Book>) {
        let mut parent = None;
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let Some(node) = self.nodes.get(id) else {
                break;
            };
            let go_left = book.key() < node.book.key();
            parent = Some((id, go_left));
            cursor = if go_left { node.left } else { node.right };
        }

        let leaf = self.nodes.allocate(TreeNode {
            book,
            left: None,
            right: None,
        });

        match parent.and_then(|(id, go_left)| Some((self.nodes.get_mut(id)?, go_left))) {
            Some((node, true)) => node.left = Some(leaf),
            Some((node, false)) => node.right = Some(leaf),
            None => self.root = Some(leaf),
        }
    }

    #[must_use]
    pub fn search(&self, key: &str) -> Option<&Book> {
        let (id, _) = self.locate(key)?;
        self.nodes.get(id).map(|node| node.book.as_ref())
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.locate(key).is_some()
    }

    /// Remove the node holding `key` and return its book.
    ///
    /// A node with two children takes over the book of its in-order successor
    /// (the leftmost node of its right subtree), and the successor node, which
    /// has no left child, is spliced out in its place.
    pub fn remove(&mut self, key: &str) -> Option<Arc<Book>> {
        let (target, parent) = self.locate(key)?;
        let (left, right) = {
            let node = self.nodes.get(target)?;
            (node.left, node.right)
        };

        match (left, right) {
            (Some(_), Some(right)) => {
                let mut successor_parent = target;
                let mut successor = right;
                while let Some(next) = self.nodes.get(successor).and_then(|n| n.left) {
                    successor_parent = successor;
                    successor = next;
                }

                let successor_node = self.nodes.deallocate(successor)?;
                self.replace_child(Some(successor_parent), successor, successor_node.right);

                let node = self.nodes.get_mut(target)?;
                Some(std::mem::replace(&mut node.book, successor_node.book))
            }
            (child, None) | (None, child) => {
                let node = self.nodes.deallocate(target)?;
                self.replace_child(parent, target, child);
                Some(node.book)
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes on the longest root-to-leaf path
    #[must_use]
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|id| (id, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            if let Some(node) = self.nodes.get(id) {
                stack.extend(node.left.map(|child| (child, depth + 1)));
                stack.extend(node.right.map(|child| (child, depth + 1)));
            }
        }
        height
    }

    /// In-order traversal, i.e. ascending by key
    #[must_use]
    pub fn iter(&self) -> InOrderIter<'_> {
        let mut iter = InOrderIter {
            nodes: &self.nodes,
            stack: Vec::new(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    /// Find the node holding `key` along with its parent
    fn locate(&self, key: &str) -> Option<(NodeId, Option<NodeId>)> {
        let mut parent = None;
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = self.nodes.get(id)?;
            cursor = match key.cmp(node.book.key()) {
                Ordering::Equal => return Some((id, parent)),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
            parent = Some(id);
        }
        None
    }

    /// Point whichever link referenced `old` at `new`
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        let Some(parent) = parent else {
            self.root = new;
            return;
        };
        if let Some(node) = self.nodes.get_mut(parent) {
            if node.left == Some(old) {
                node.left = new;
            } else {
                node.right = new;
            }
        }
    }
}

/// Ascending-key iterator over an [`OrderIndex`]
pub struct InOrderIter<'a> {
    nodes: &'a Arena<TreeNode>,
    stack: Vec<NodeId>,
}

impl InOrderIter<'_> {
    fn push_left_spine(&mut self, mut cursor: Option<NodeId>) {
        while let Some(id) = cursor {
            self.stack.push(id);
            cursor = self.nodes.get(id).and_then(|node| node.left);
        }
    }
}

impl<'a> Iterator for InOrderIter<'a> {
    type Item = &'a Book;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.stack.pop()?)?;
        self.push_left_spine(node.right);
        Some(node.book.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(keys: &[&str]) -> OrderIndex {
        let mut index = OrderIndex::new();
        for key in keys {
            index.insert(Arc::new(Book::new(*key, "Title", "Author")));
        }
        index
    }

    fn keys(index: &OrderIndex) -> Vec<&str> {
        index.iter().map(Book::key).collect()
    }

    /// Walk every node and check the left < node <= right ordering
    fn assert_bst(index: &OrderIndex) {
        let mut stack: Vec<(NodeId, Option<String>, Option<String>)> =
            index.root.map(|id| (id, None, None)).into_iter().collect();
        let mut seen = 0;
        while let Some((id, low, high)) = stack.pop() {
            let node = index.nodes.get(id).expect("dangling child link");
            let key = node.book.key().to_string();
            if let Some(low) = &low {
                assert!(&key >= low, "{key} sits right of {low}");
            }
            if let Some(high) = &high {
                assert!(&key < high, "{key} sits left of {high}");
            }
            if let Some(left) = node.left {
                stack.push((left, low.clone(), Some(key.clone())));
            }
            if let Some(right) = node.right {
                stack.push((right, Some(key.clone()), high.clone()));
            }
            seen += 1;
        }
        assert_eq!(seen, index.len(), "unreachable nodes left in the arena");
    }

    #[test]
    fn test_insert_and_search() {
        let index = tree(&["m", "c", "t", "a", "e"]);
        assert_eq!(index.len(), 5);
        assert_eq!(index.search("e").map(Book::key), Some("e"));
        assert!(index.search("z").is_none());
        assert!(index.contains("m"));
        assert_bst(&index);
    }

    #[test]
    fn test_iter_is_sorted() {
        let index = tree(&["97815932", "97801348", "97814493", "97801351"]);
        assert_eq!(
            keys(&index),
            vec!["97801348", "97801351", "97814493", "97815932"]
        );
    }

    #[test]
    fn test_remove_leaf() {
        let mut index = tree(&["m", "c", "t"]);
        assert_eq!(index.remove("c").unwrap().key(), "c");
        assert_eq!(keys(&index), vec!["m", "t"]);
        assert!(!index.contains("c"));
        assert_bst(&index);
    }

    #[test]
    fn test_remove_node_with_one_child() {
        let mut index = tree(&["m", "c", "a"]);
        index.remove("c");
        assert_eq!(keys(&index), vec!["a", "m"]);
        assert_eq!(index.height(), 2);
        assert_bst(&index);
    }

    #[test]
    fn test_remove_node_with_two_children() {
        //        m
        //      /   \
        //     c     t
        //    / \   /
        //   a   e p
        //        \
        //         f
        let mut index = tree(&["m", "c", "t", "a", "e", "p", "f"]);
        assert_eq!(index.remove("c").unwrap().key(), "c");
        assert_eq!(keys(&index), vec!["a", "e", "f", "m", "p", "t"]);
        assert!(index.search("e").is_some());
        assert_bst(&index);

        // Successor of the root is the leftmost node of its right subtree
        assert_eq!(index.remove("m").unwrap().key(), "m");
        assert_eq!(keys(&index), vec!["a", "e", "f", "p", "t"]);
        assert_bst(&index);
    }

    #[test]
    fn test_remove_successor_with_right_child() {
        // Successor "n" of the root has a right child "o" that must be kept
        let mut index = tree(&["m", "c", "t", "n", "o"]);
        index.remove("m");
        assert_eq!(keys(&index), vec!["c", "n", "o", "t"]);
        assert_bst(&index);
    }

    #[test]
    fn test_remove_root_until_empty() {
        let mut index = tree(&["b", "a", "c"]);
        for key in ["b", "a", "c"] {
            assert!(index.remove(key).is_some());
            assert_bst(&index);
        }
        assert!(index.is_empty());
        assert_eq!(index.height(), 0);
        assert_eq!(index.iter().count(), 0);
    }

    #[test]
    fn test_remove_missing_key() {
        let mut index = tree(&["b"]);
        assert!(index.remove("a").is_none());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_sorted_insertion_degrades_to_chain() {
        let keys: Vec<String> = (0..50).map(|i| format!("{i:04}")).collect();
        let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
        let index = tree(&refs);
        assert_eq!(index.height(), 50);
    }

    #[test]
    fn test_deep_chain_walks_without_recursion() {
        let mut index = OrderIndex::new();
        for i in 0..5_000 {
            index.insert(Arc::new(Book::new(format!("{i:06}"), "T", "A")));
        }
        assert_eq!(index.iter().count(), 5_000);
        assert!(index.remove("004999").is_some());
        assert_eq!(index.height(), 4_999);
    }
}
