//! Prefix enumeration and views.
//!
//! This module provides the depth-first iterators behind `Trie::list_keys` and
//! friends, and the `PrefixView` type, a borrowed window onto the keys that
//! share a prefix.

use std::fmt;

use crate::node::TrieNode;
use crate::Trie;

/// A lightweight view of the keys in a trie that begin with a given prefix.
///
/// The prefix node is resolved once when the view is created; the view
/// borrows the trie, so it always reflects its current contents.
///
/// # Examples
///
/// ```
/// use prefix_tree::Trie;
///
/// let mut trie = Trie::new();
/// trie.insert("hello", 1).unwrap();
/// trie.insert("help", 2).unwrap();
/// trie.insert("world", 3).unwrap();
///
/// let view = trie.view_prefix("hel");
/// assert_eq!(view.len(), 2);
/// assert!(view.contains_key("help"));
/// assert!(!view.contains_key("world"));
/// assert_eq!(view.get("hello"), Some(&1));
/// ```
pub struct PrefixView<'a, T> {
    /// The source trie for this view
    trie: &'a Trie<T>,

    /// The key prefix defining this view
    prefix: String,

    /// The node the prefix resolves to, if it exists
    subtrie_node: Option<&'a TrieNode<T>>,
}

impl<'a, T> PrefixView<'a, T> {
    /// Creates a new prefix view for the given trie and prefix.
    pub fn new(trie: &'a Trie<T>, prefix: String) -> Self {
        let subtrie_node = trie.root.descend(&prefix);

        PrefixView {
            trie,
            prefix,
            subtrie_node,
        }
    }

    /// Returns the key prefix for this view.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the underlying trie.
    pub fn trie(&self) -> &'a Trie<T> {
        self.trie
    }

    /// Returns whether the prefix resolves to a node in the trie.
    pub fn exists(&self) -> bool {
        self.subtrie_node.is_some()
    }

    /// Returns the number of keys in this view.
    pub fn len(&self) -> usize {
        self.subtrie_node.map_or(0, TrieNode::subtree_size)
    }

    /// Returns whether this view holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks if the view contains a key.
    ///
    /// Only returns true if the key is in the trie and starts with the prefix.
    pub fn contains_key<K: AsRef<str>>(&self, key: K) -> bool {
        self.resolve(key.as_ref())
            .map_or(false, |node| node.end_of_key)
    }

    /// Gets the value for a key if it exists in this prefix view.
    pub fn get<K: AsRef<str>>(&self, key: K) -> Option<&'a T> {
        self.resolve(key.as_ref()).and_then(TrieNode::payload)
    }

    /// Iterates over the keys in this view.
    pub fn keys(&self) -> Keys<'a, T> {
        Keys::new(self.iter())
    }

    /// Iterates over the `(key, value)` pairs in this view, in `char` order.
    pub fn iter(&self) -> Iter<'a, T> {
        Iter::new(self.subtrie_node, self.prefix.clone())
    }

    // Walks only the part of `key` below the prefix node
    fn resolve(&self, key: &str) -> Option<&'a TrieNode<T>> {
        let suffix = key.strip_prefix(self.prefix.as_str())?;
        self.subtrie_node?.descend(suffix)
    }
}

impl<'a, T> Clone for PrefixView<'a, T> {
    fn clone(&self) -> Self {
        PrefixView {
            trie: self.trie,
            prefix: self.prefix.clone(),
            subtrie_node: self.subtrie_node,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PrefixView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefixView")
            .field("prefix", &self.prefix)
            .field("keys", &self.keys().collect::<Vec<_>>())
            .finish()
    }
}

// Views compare by what lies below their prefixes, so "he" and "hel" over the
// same keys are equal.
impl<T: PartialEq> PartialEq for PrefixView<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        match (self.subtrie_node, other.subtrie_node) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                Iter::new(Some(a), String::new()).eq(Iter::new(Some(b), String::new()))
            }
            _ => false,
        }
    }
}

impl<T: Eq> Eq for PrefixView<'_, T> {}

impl<'a, T> IntoIterator for &PrefixView<'a, T> {
    type Item = (String, Option<&'a T>);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the `(key, value)` pairs below a node.
///
/// This iterator performs a depth-first traversal with an explicit stack,
/// visiting siblings in `char` order, so keys come out sorted. Keys stored
/// without a value yield `None`.
pub struct Iter<'a, T> {
    /// Nodes still to visit, each with the key spelled by its path
    stack: Vec<(String, &'a TrieNode<T>)>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(start: Option<&'a TrieNode<T>>, base: String) -> Self {
        Iter {
            stack: start.map(|node| (base, node)).into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (String, Option<&'a T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((path, node)) = self.stack.pop() {
            // Reversed so the smallest character is popped first
            for (ch, child) in node.sorted_children().into_iter().rev() {
                let mut child_path = String::with_capacity(path.len() + ch.len_utf8());
                child_path.push_str(&path);
                child_path.push(ch);
                self.stack.push((child_path, child));
            }

            if node.end_of_key {
                return Some((path, node.payload()));
            }
        }

        None
    }
}

/// An iterator over the keys below a node, in `char` order.
pub struct Keys<'a, T> {
    inner: Iter<'a, T>,
}

impl<'a, T> Keys<'a, T> {
    pub(crate) fn new(inner: Iter<'a, T>) -> Self {
        Keys { inner }
    }
}

impl<T> Iterator for Keys<'_, T> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }
}
