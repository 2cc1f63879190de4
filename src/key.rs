//! Key policy applied at the API boundary.
//!
//! Every operation that may create nodes runs its key through a [`KeyPolicy`]
//! first. A rejected key never reaches the tree walk.

use crate::{Error, KeyRejection};

/// Default upper bound on key length, counted in `char`s.
pub const DEFAULT_MAX_KEY_LEN: usize = 4096;

/// Rules a key must satisfy before it can be stored in a [`Trie`](crate::Trie).
///
/// # Examples
///
/// ```
/// use prefix_tree::{KeyPolicy, Trie};
///
/// let policy = KeyPolicy::default().with_max_key_len(8).deny_control_chars();
/// let mut trie: Trie<u32> = Trie::with_policy(policy);
///
/// assert!(trie.insert("short", 1).is_ok());
/// assert!(trie.insert("far too long", 2).is_err());
/// assert!(trie.insert("tab\there", 3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KeyPolicy {
    /// Longest accepted key in `char`s; `None` accepts any length.
    pub max_key_len: Option<usize>,
    /// Whether keys may contain control characters such as `'\0'` or `'\n'`.
    pub allow_control_chars: bool,
}

impl Default for KeyPolicy {
    fn default() -> Self {
        KeyPolicy {
            max_key_len: Some(DEFAULT_MAX_KEY_LEN),
            allow_control_chars: true,
        }
    }
}

impl KeyPolicy {
    /// Sets the maximum key length.
    pub fn with_max_key_len(mut self, max: usize) -> Self {
        self.max_key_len = Some(max);
        self
    }

    /// Removes the key length bound.
    pub fn unbounded(mut self) -> Self {
        self.max_key_len = None;
        self
    }

    /// Rejects keys containing control characters.
    pub fn deny_control_chars(mut self) -> Self {
        self.allow_control_chars = false;
        self
    }

    /// Checks `key` against this policy.
    pub fn check(&self, key: &str) -> Result<(), Error> {
        if let Some(max) = self.max_key_len {
            let len = key.chars().count();
            if len > max {
                return Err(self.reject(key, KeyRejection::TooLong { len, max }));
            }
        }

        if !self.allow_control_chars {
            if let Some((index, ch)) = key.chars().enumerate().find(|(_, c)| c.is_control()) {
                return Err(self.reject(key, KeyRejection::ControlChar { index, ch }));
            }
        }

        Ok(())
    }

    fn reject(&self, key: &str, rejection: KeyRejection) -> Error {
        log::warn!(
            "rejected key {:?}: {}",
            key.chars().take(32).collect::<String>(),
            rejection
        );
        Error::InvalidKey(rejection)
    }
}
