//! Internal node implementation for the prefix tree.
//!
//! This module contains the internal `TrieNode` structure that forms the backbone
//! of the tree. Each node is owned by exactly one parent; the root is owned by
//! the `Trie` itself.

use std::collections::HashMap;

/// Internal node type for the prefix tree.
///
/// The character a node stands for is its key in the parent's `children` map,
/// so the root carries no character at all.
///
/// `Clone` and `Drop` work with an explicit stack, so a chain as long as the
/// longest key never deepens the call stack.
pub(crate) struct TrieNode<T> {
    /// Child nodes indexed by the next character of the key
    pub children: HashMap<char, TrieNode<T>>,

    /// Whether the path from the root to this node spells an inserted key
    pub end_of_key: bool,

    /// Payload for the key ending here; ignored unless `end_of_key` is set
    pub value: Option<T>,
}

impl<T> TrieNode<T> {
    /// Creates a new node that does not terminate any key
    pub fn new() -> Self {
        TrieNode {
            children: HashMap::new(),
            end_of_key: false,
            value: None,
        }
    }

    /// Returns whether this node is a leaf node (has no children)
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// A node that ends no key and leads nowhere is dead weight and may be detached.
    pub fn is_prunable(&self) -> bool {
        self.is_leaf() && !self.end_of_key
    }

    /// Marks this node as terminating a key and stores `value`, returning the old payload.
    pub fn mark(&mut self, value: Option<T>) -> Option<T> {
        let old = if self.end_of_key { self.value.take() } else { None };
        self.end_of_key = true;
        self.value = value;
        old
    }

    /// Clears the end-of-key marker, returning the payload it held.
    pub fn unmark(&mut self) -> Option<T> {
        self.end_of_key = false;
        self.value.take()
    }

    /// Payload of this node, if it terminates a key
    pub fn payload(&self) -> Option<&T> {
        if self.end_of_key {
            self.value.as_ref()
        } else {
            None
        }
    }

    /// Follows `key` one character at a time, without creating anything
    pub fn descend(&self, key: &str) -> Option<&TrieNode<T>> {
        let mut current = self;
        for ch in key.chars() {
            current = current.children.get(&ch)?;
        }
        Some(current)
    }

    /// Mutable counterpart of [`descend`](Self::descend)
    pub fn descend_mut(&mut self, key: &str) -> Option<&mut TrieNode<T>> {
        let mut current = self;
        for ch in key.chars() {
            current = current.children.get_mut(&ch)?;
        }
        Some(current)
    }

    /// Follows `key`, creating any missing nodes on the way
    pub fn descend_or_create(&mut self, key: &str) -> &mut TrieNode<T> {
        let mut current = self;
        for ch in key.chars() {
            current = current.children.entry(ch).or_insert_with(TrieNode::new);
        }
        current
    }

    /// Returns the number of keys stored in this subtree
    pub fn subtree_size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            if node.end_of_key {
                count += 1;
            }
            stack.extend(node.children.values());
        }

        count
    }

    /// Returns the number of nodes below this one
    pub fn descendant_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&TrieNode<T>> = self.children.values().collect();

        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.values());
        }

        count
    }

    /// Children sorted by character, for deterministic traversal
    pub fn sorted_children(&self) -> Vec<(char, &TrieNode<T>)> {
        let mut children: Vec<(char, &TrieNode<T>)> =
            self.children.iter().map(|(&ch, child)| (ch, child)).collect();
        children.sort_by_key(|&(ch, _)| ch);
        children
    }
}

// One frame per level of the node being copied
struct CloneFrame<'a, T> {
    /// Edge from the parent frame; unused for the root
    ch: char,
    /// Source children not copied yet
    pending: Vec<(char, &'a TrieNode<T>)>,
    /// Copy under construction
    node: TrieNode<T>,
}

impl<'a, T: Clone> CloneFrame<'a, T> {
    fn new(ch: char, source: &'a TrieNode<T>) -> Self {
        CloneFrame {
            ch,
            pending: source.children.iter().map(|(&ch, child)| (ch, child)).collect(),
            node: TrieNode {
                children: HashMap::with_capacity(source.children.len()),
                end_of_key: source.end_of_key,
                value: source.value.clone(),
            },
        }
    }
}

impl<T: Clone> Clone for TrieNode<T> {
    fn clone(&self) -> Self {
        let mut stack = vec![CloneFrame::new('\0', self)];
        let mut copied = None;

        while let Some(mut frame) = stack.pop() {
            if let Some((ch, child)) = frame.pending.pop() {
                stack.push(frame);
                stack.push(CloneFrame::new(ch, child));
                continue;
            }

            // Every child is copied, hand the finished node to its parent
            match stack.last_mut() {
                Some(parent) => {
                    parent.node.children.insert(frame.ch, frame.node);
                }
                None => copied = Some(frame.node),
            }
        }

        copied.unwrap_or_else(TrieNode::new)
    }
}

impl<T> Drop for TrieNode<T> {
    fn drop(&mut self) {
        // Detach children before they drop, so each node is freed childless
        let mut stack: Vec<TrieNode<T>> = self.children.drain().map(|(_, child)| child).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.drain().map(|(_, child)| child));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node() {
        let node: TrieNode<u32> = TrieNode::new();

        assert!(!node.end_of_key);
        assert!(node.value.is_none());
        assert!(node.is_leaf());
        assert!(node.is_prunable());
    }

    #[test]
    fn test_mark_and_unmark() {
        let mut node: TrieNode<u32> = TrieNode::new();

        assert_eq!(node.mark(Some(42)), None);
        assert!(node.end_of_key);
        assert_eq!(node.payload(), Some(&42));
        assert!(!node.is_prunable());

        // Re-marking overwrites and hands back the old payload
        assert_eq!(node.mark(Some(7)), Some(42));
        assert_eq!(node.payload(), Some(&7));

        assert_eq!(node.unmark(), Some(7));
        assert!(!node.end_of_key);
        assert_eq!(node.payload(), None);
        assert!(node.is_prunable());
    }

    #[test]
    fn test_stale_value_is_not_a_payload() {
        let mut node: TrieNode<u32> = TrieNode::new();
        node.value = Some(3);

        assert_eq!(node.payload(), None);
        // A stale value is not reported as the previous payload either
        assert_eq!(node.mark(None), None);
    }

    #[test]
    fn test_descend() {
        let mut root: TrieNode<u32> = TrieNode::new();
        root.descend_or_create("car").mark(Some(1));
        root.descend_or_create("cat").mark(Some(2));

        assert_eq!(root.descendant_count(), 4);
        assert_eq!(root.subtree_size(), 2);

        let ca = root.descend("ca").unwrap();
        assert!(!ca.end_of_key);
        assert_eq!(ca.children.len(), 2);

        assert!(root.descend("cab").is_none());
        assert!(std::ptr::eq(root.descend("").unwrap(), &root));

        root.descend_mut("car").unwrap().value = Some(10);
        assert_eq!(root.descend("car").unwrap().payload(), Some(&10));
    }

    #[test]
    fn test_sorted_children() {
        let mut root: TrieNode<()> = TrieNode::new();
        for key in &["z", "a", "m"] {
            root.descend_or_create(key).mark(None);
        }

        let order: Vec<char> = root.sorted_children().into_iter().map(|(ch, _)| ch).collect();
        assert_eq!(order, vec!['a', 'm', 'z']);
    }

    fn chain(len: usize) -> TrieNode<u32> {
        let key: String = std::iter::repeat('k').take(len).collect();
        let mut root = TrieNode::new();
        root.descend_or_create(&key).mark(Some(1));
        root
    }

    #[test]
    fn test_clone_copies_structure() {
        let mut root: TrieNode<u32> = TrieNode::new();
        root.descend_or_create("car").mark(Some(1));
        root.descend_or_create("cart").mark(None);
        root.descend_or_create("dog").mark(Some(3));

        let copy = root.clone();
        assert_eq!(copy.descendant_count(), root.descendant_count());
        assert_eq!(copy.subtree_size(), 3);
        assert_eq!(copy.descend("car").unwrap().payload(), Some(&1));
        assert!(copy.descend("cart").unwrap().end_of_key);
        assert_eq!(copy.descend("cart").unwrap().payload(), None);
        assert_eq!(copy.descend("dog").unwrap().payload(), Some(&3));
        assert!(!copy.descend("ca").unwrap().end_of_key);

        // The copy is independent of the source
        root.descend_mut("dog").unwrap().value = Some(30);
        assert_eq!(copy.descend("dog").unwrap().payload(), Some(&3));
    }

    #[test]
    fn test_deep_chain_clone_and_drop() {
        let root = chain(200_000);

        let copy = root.clone();
        assert_eq!(copy.descendant_count(), 200_000);
        assert_eq!(copy.subtree_size(), 1);

        drop(root);
        drop(copy);
    }
}
