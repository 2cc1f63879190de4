//! # Prefix Tree
//!
//! A generic prefix tree (trie) keyed by character sequences.
//!
//! This crate provides a mutable trie of owned nodes, one node per key
//! character, for autocomplete lists, command-name resolution and similar
//! lookups where prefixes matter as much as whole keys.
//!
//! ## Features
//!
//! - **Prefix queries**: test whether any key starts with a prefix, or list the keys that do
//! - **Pruning removal**: removing a key detaches every node no other key needs
//! - **Optional values**: keys may carry a value of any type, or be stored bare
//! - **Key policy**: bound key length and reject control characters at the API boundary
//! - **Prefix views**: borrow the part of the tree below a prefix and query it directly
//!
//! Keys are split into `char`s; enumeration returns keys sorted by code point.
//!
//! ## Example
//!
//! ```rust
//! use prefix_tree::Trie;
//!
//! let mut trie = Trie::new();
//! trie.insert("cat", 1)?;
//! trie.insert("car", 2)?;
//! trie.insert("cart", 3)?;
//! trie.insert("dog", 4)?;
//!
//! assert!(trie.contains("car"));
//! assert!(!trie.contains("ca"));
//! assert!(trie.starts_with("ca"));
//! assert_eq!(trie.list_keys_matching("ca"), vec!["car", "cart", "cat"]);
//!
//! trie.remove("car");
//! assert_eq!(trie.list_keys_matching("ca"), vec!["cart", "cat"]);
//! # Ok::<(), prefix_tree::Error>(())
//! ```
//!
//! ## Cargo features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Trie`] (as a map of key to
//!   optional value) and [`KeyPolicy`].

mod key;
mod node;
mod prefix_view;
#[cfg(feature = "serde")]
mod serde_impl;
mod trie;

// Re-export public types
pub use crate::key::{KeyPolicy, DEFAULT_MAX_KEY_LEN};
pub use crate::prefix_view::{Iter, Keys, PrefixView};
pub use crate::trie::Trie;

/// Errors that can occur in trie operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Key is invalid for the operation
    #[error("invalid key: {0}")]
    InvalidKey(KeyRejection),
}

/// Why a [`KeyPolicy`] refused a key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyRejection {
    /// The key has more characters than the policy allows
    #[error("{len} characters exceeds the limit of {max}")]
    TooLong { len: usize, max: usize },
    /// The key contains a control character and the policy forbids them
    #[error("control character {ch:?} at position {index}")]
    ControlChar { index: usize, ch: char },
}

/// Result alias for fallible trie operations
pub type Result<T> = std::result::Result<T, Error>;
