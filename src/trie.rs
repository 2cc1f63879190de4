//! The main trie implementation.
//!
//! This module contains the `Trie` type, which provides the primary API for working
//! with the prefix tree.

use std::fmt;
use std::iter::FromIterator;

use crate::key::KeyPolicy;
use crate::node::TrieNode;
use crate::prefix_view::{Iter, Keys, PrefixView};
use crate::Result;

/// A mutable prefix tree mapping character sequences to optional values.
///
/// Every key is stored as one node per character below a sentinel root. A key
/// may carry a value of type `T` or be stored bare (see [`insert_key`]); in both
/// cases it counts as present for [`contains`].
///
/// Enumeration visits siblings in `char` order, so [`list_keys`] and friends
/// return keys sorted lexicographically by code point.
///
/// [`insert_key`]: Trie::insert_key
/// [`contains`]: Trie::contains
/// [`list_keys`]: Trie::list_keys
///
/// # Examples
///
/// ```
/// use prefix_tree::Trie;
///
/// let mut trie = Trie::new();
/// trie.insert("cat", 1).unwrap();
/// trie.insert("car", 2).unwrap();
/// trie.insert("cart", 3).unwrap();
///
/// assert!(trie.contains("car"));
/// assert!(!trie.contains("ca"));
/// assert!(trie.starts_with("ca"));
/// assert_eq!(trie.list_keys_matching("car"), vec!["car", "cart"]);
///
/// assert!(trie.remove("car"));
/// assert_eq!(trie.get("cart"), Some(&3));
/// ```
#[derive(Clone)]
pub struct Trie<T> {
    /// The root node of the trie; never detached
    pub(crate) root: TrieNode<T>,

    /// The number of keys stored in the trie
    size: usize,

    /// Rules applied to keys before they are stored
    policy: KeyPolicy,
}

impl<T> Trie<T> {
    /// Creates a new, empty trie with the default [`KeyPolicy`].
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tree::Trie;
    ///
    /// let trie = Trie::<i32>::new();
    /// assert!(trie.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_policy(KeyPolicy::default())
    }

    /// Creates a new, empty trie that validates keys with `policy`.
    pub fn with_policy(policy: KeyPolicy) -> Self {
        Trie {
            root: TrieNode::new(),
            size: 0,
            policy,
        }
    }

    /// Builds a trie holding `keys`, none of which carries a value.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tree::Trie;
    ///
    /// let trie = Trie::<()>::from_keys(vec!["open", "opener", "close"]).unwrap();
    /// assert_eq!(trie.len(), 3);
    /// assert_eq!(trie.get("open"), None);
    /// assert!(trie.contains("open"));
    /// ```
    pub fn from_keys<I, K>(keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut trie = Self::new();
        trie.insert_keys(keys)?;
        Ok(trie)
    }

    /// Builds a trie from key/value pairs. Later duplicates overwrite earlier ones.
    pub fn from_entries<I, K>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, T)>,
        K: AsRef<str>,
    {
        let mut trie = Self::new();
        trie.insert_entries(entries)?;
        Ok(trie)
    }

    /// Returns the policy keys are checked against.
    pub fn policy(&self) -> &KeyPolicy {
        &self.policy
    }

    /// Returns the number of keys stored in the trie, including the empty key.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the root has no children.
    ///
    /// This is a structural test: a trie holding only the empty key is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tree::Trie;
    ///
    /// let mut trie = Trie::new();
    /// trie.insert("", 1).unwrap();
    /// assert!(trie.is_empty());
    /// assert_eq!(trie.len(), 1);
    /// ```
    pub fn is_empty(&self) -> bool {
        self.root.is_leaf()
    }

    /// Returns the number of nodes below the root.
    pub fn node_count(&self) -> usize {
        self.root.descendant_count()
    }

    /// Inserts `key` with `value`, returning the value it previously held.
    ///
    /// Re-inserting an existing key overwrites its value without touching the
    /// node structure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`](crate::Error::InvalidKey) if the trie's
    /// [`KeyPolicy`] rejects `key`.
    pub fn insert<K: AsRef<str>>(&mut self, key: K, value: T) -> Result<Option<T>> {
        let key = key.as_ref();
        self.policy.check(key)?;
        Ok(self.insert_unchecked(key, Some(value)).1)
    }

    /// Inserts `key` without a value, returning `true` if it was not present.
    ///
    /// Any value the key held before is discarded.
    pub fn insert_key<K: AsRef<str>>(&mut self, key: K) -> Result<bool> {
        let key = key.as_ref();
        self.policy.check(key)?;
        Ok(self.insert_unchecked(key, None).0)
    }

    /// Inserts every key in `keys` without a value.
    ///
    /// Stops at the first rejected key; keys before it stay inserted.
    pub fn insert_keys<I, K>(&mut self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut count = 0usize;
        for key in keys {
            self.insert_key(key)?;
            count += 1;
        }
        log::debug!("inserted {} keys, trie now holds {}", count, self.size);
        Ok(())
    }

    /// Inserts every pair in `entries`. Later duplicates overwrite earlier ones.
    ///
    /// Stops at the first rejected key; entries before it stay inserted.
    pub fn insert_entries<I, K>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, T)>,
        K: AsRef<str>,
    {
        let mut count = 0usize;
        for (key, value) in entries {
            self.insert(key, value)?;
            count += 1;
        }
        log::debug!("inserted {} entries, trie now holds {}", count, self.size);
        Ok(())
    }

    // Returns whether the key is new, and the payload it held before.
    fn insert_unchecked(&mut self, key: &str, value: Option<T>) -> (bool, Option<T>) {
        let node = self.root.descend_or_create(key);
        let added = !node.end_of_key;
        let old = node.mark(value);

        if added {
            self.size += 1;
        }
        log::trace!("insert {:?} (new: {})", key, added);

        (added, old)
    }

    /// Returns `true` if `key` was inserted and not removed since.
    pub fn contains<K: AsRef<str>>(&self, key: K) -> bool {
        self.root
            .descend(key.as_ref())
            .map_or(false, |node| node.end_of_key)
    }

    /// Returns `true` if at least one of `keys` is present.
    pub fn contains_any<I, K>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        keys.into_iter().any(|key| self.contains(key))
    }

    /// Returns `true` if every one of `keys` is present.
    pub fn contains_all<I, K>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        keys.into_iter().all(|key| self.contains(key))
    }

    /// Returns `true` if some stored key begins with `prefix`.
    ///
    /// `prefix` need not be a key itself. The empty prefix matches as soon as
    /// the trie holds any key at all.
    pub fn starts_with<K: AsRef<str>>(&self, prefix: K) -> bool {
        let prefix = prefix.as_ref();
        if prefix.is_empty() {
            return self.size > 0;
        }
        self.root.descend(prefix).is_some()
    }

    /// Returns the value stored for `key`.
    ///
    /// `None` covers both a missing key and a key inserted without a value; use
    /// [`contains`](Trie::contains) to tell them apart.
    pub fn get<K: AsRef<str>>(&self, key: K) -> Option<&T> {
        self.root.descend(key.as_ref()).and_then(TrieNode::payload)
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn get_mut<K: AsRef<str>>(&mut self, key: K) -> Option<&mut T> {
        let node = self.root.descend_mut(key.as_ref())?;
        if node.end_of_key {
            node.value.as_mut()
        } else {
            None
        }
    }

    /// Replaces the value of an existing key.
    ///
    /// Unlike [`insert`](Trie::insert) this never creates nodes: if `key` is
    /// not present nothing changes and `false` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tree::Trie;
    ///
    /// let mut trie = Trie::new();
    /// trie.insert("car", 1).unwrap();
    ///
    /// assert!(trie.set("car", 2));
    /// assert!(!trie.set("ca", 3));
    /// assert_eq!(trie.get("car"), Some(&2));
    /// assert!(!trie.contains("ca"));
    /// ```
    pub fn set<K: AsRef<str>>(&mut self, key: K, value: T) -> bool {
        match self.root.descend_mut(key.as_ref()) {
            Some(node) if node.end_of_key => {
                node.value = Some(value);
                true
            }
            _ => false,
        }
    }

    /// Removes `key`, returning `true` if it was present.
    ///
    /// Nodes that no other key passes through are pruned. Nodes shared with
    /// other keys stay.
    pub fn remove<K: AsRef<str>>(&mut self, key: K) -> bool {
        self.remove_entry(key).is_some()
    }

    /// Removes `key`, returning its payload if the key was present.
    ///
    /// The outer `Option` reports presence, the inner one the stored value.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tree::Trie;
    ///
    /// let mut trie = Trie::new();
    /// trie.insert("dog", 4).unwrap();
    /// trie.insert_key("cat").unwrap();
    ///
    /// assert_eq!(trie.remove_entry("dog"), Some(Some(4)));
    /// assert_eq!(trie.remove_entry("cat"), Some(None));
    /// assert_eq!(trie.remove_entry("cow"), None);
    /// ```
    pub fn remove_entry<K: AsRef<str>>(&mut self, key: K) -> Option<Option<T>> {
        let key = key.as_ref();

        // Find the terminal node, remembering the last node on the way that
        // survives the removal (the root, another key, or a branch) and the
        // edge leading out of it.
        let mut cut: Option<(usize, char)> = None;
        let mut node = &self.root;
        for (offset, ch) in key.char_indices() {
            if offset == 0 || node.end_of_key || node.children.len() > 1 {
                cut = Some((offset, ch));
            }
            node = node.children.get(&ch)?;
        }
        if !node.end_of_key {
            return None;
        }
        let prune = node.is_leaf();

        let payload = self.root.descend_mut(key)?.unmark();
        debug_assert!(self.size > 0);
        self.size -= 1;

        // Everything below the cut point led only to this key
        if prune {
            if let Some((offset, ch)) = cut {
                if let Some(keeper) = self.root.descend_mut(&key[..offset]) {
                    keeper.children.remove(&ch);
                    log::trace!("pruned {} nodes at {:?}", key[offset..].chars().count(), ch);
                }
            }
        }
        log::trace!("removed {:?}, {} keys left", key, self.size);

        Some(payload)
    }

    /// Removes each of `keys`, returning `true` only if every one was present.
    ///
    /// All keys are attempted even after a miss.
    pub fn remove_all<I, K>(&mut self, keys: I) -> bool
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut all_removed = true;
        for key in keys {
            if !self.remove(key) {
                all_removed = false;
            }
        }
        all_removed
    }

    /// Removes every key, including the empty key.
    pub fn clear(&mut self) {
        log::debug!("clearing trie with {} keys", self.size);
        self.root = TrieNode::new();
        self.size = 0;
    }

    /// Returns every stored key, sorted by `char` order.
    pub fn list_keys(&self) -> Vec<String> {
        self.keys().collect()
    }

    /// Returns every stored key beginning with `prefix`, sorted by `char` order.
    ///
    /// An unknown prefix yields an empty list.
    pub fn list_keys_matching<K: AsRef<str>>(&self, prefix: K) -> Vec<String> {
        self.keys_with_prefix(prefix).collect()
    }

    /// Lazily iterates over every stored key.
    pub fn keys(&self) -> Keys<'_, T> {
        self.keys_with_prefix("")
    }

    /// Lazily iterates over the stored keys beginning with `prefix`.
    pub fn keys_with_prefix<K: AsRef<str>>(&self, prefix: K) -> Keys<'_, T> {
        Keys::new(self.iter_prefix(prefix))
    }

    /// Iterates over `(key, value)` pairs. Keys stored without a value yield `None`.
    pub fn iter(&self) -> Iter<'_, T> {
        self.iter_prefix("")
    }

    /// Iterates over the `(key, value)` pairs whose key begins with `prefix`.
    pub fn iter_prefix<K: AsRef<str>>(&self, prefix: K) -> Iter<'_, T> {
        let prefix = prefix.as_ref();
        Iter::new(self.root.descend(prefix), prefix.to_string())
    }

    /// Returns a borrowed view of the keys beginning with `prefix`.
    pub fn view_prefix<K: AsRef<str>>(&self, prefix: K) -> PrefixView<'_, T> {
        PrefixView::new(self, prefix.as_ref().to_string())
    }

    /// Returns the longest stored key that is a prefix of `text`.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tree::Trie;
    ///
    /// let trie = Trie::<()>::from_keys(vec!["git", "git-log"]).unwrap();
    /// assert_eq!(trie.longest_prefix_of("git-log --oneline").as_deref(), Some("git-log"));
    /// assert_eq!(trie.longest_prefix_of("gi"), None);
    /// ```
    pub fn longest_prefix_of<K: AsRef<str>>(&self, text: K) -> Option<String> {
        let text = text.as_ref();
        let mut current = &self.root;
        let mut longest = if current.end_of_key { Some(0) } else { None };

        for (offset, ch) in text.char_indices() {
            current = match current.children.get(&ch) {
                Some(child) => child,
                None => break,
            };
            if current.end_of_key {
                longest = Some(offset + ch.len_utf8());
            }
        }

        longest.map(|end| text[..end].to_string())
    }

    /// Returns the only stored key beginning with `prefix`, if there is exactly one.
    ///
    /// # Examples
    ///
    /// ```
    /// use prefix_tree::Trie;
    ///
    /// let trie = Trie::<()>::from_keys(vec!["status", "stash", "commit"]).unwrap();
    /// assert_eq!(trie.complete("c").as_deref(), Some("commit"));
    /// assert_eq!(trie.complete("sta"), None);
    /// assert_eq!(trie.complete("x"), None);
    /// ```
    pub fn complete<K: AsRef<str>>(&self, prefix: K) -> Option<String> {
        let mut matches = self.keys_with_prefix(prefix);
        let first = matches.next()?;
        match matches.next() {
            Some(_) => None,
            None => Some(first),
        }
    }
}

impl<T> Default for Trie<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects pairs into a trie whose policy accepts every key.
///
/// Use [`Trie::from_entries`] to build a trie under the default policy.
impl<K: AsRef<str>, T> FromIterator<(K, T)> for Trie<T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut trie = Trie::with_policy(KeyPolicy::default().unbounded());
        for (key, value) in iter {
            trie.insert_unchecked(key.as_ref(), Some(value));
        }
        trie
    }
}

impl<'a, T> IntoIterator for &'a Trie<T> {
    type Item = (String, Option<&'a T>);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for Trie<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// Two tries are equal when they hold the same keys with equal values
impl<T: PartialEq> PartialEq for Trie<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Trie<T> {}
