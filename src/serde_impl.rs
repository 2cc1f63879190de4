//! `Serialize`/`Deserialize` for `Trie`.
//!
//! A trie is written as a map from key to optional value, in enumeration
//! order. Deserializing checks every key against the default `KeyPolicy`.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Trie;

impl<T: Serialize> Serialize for Trie<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(&key, &value)?;
        }
        map.end()
    }
}

struct TrieVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for TrieVisitor<T> {
    type Value = Trie<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of string keys to optional values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut trie = Trie::new();

        while let Some((key, value)) = access.next_entry::<String, Option<T>>()? {
            let inserted = match value {
                Some(value) => trie.insert(&key, value).map(|_| ()),
                None => trie.insert_key(&key).map(|_| ()),
            };
            inserted.map_err(de::Error::custom)?;
        }

        Ok(trie)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Trie<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TrieVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KeyPolicy;
    use serde_test::{assert_de_tokens_error, assert_tokens, Token};

    #[test]
    fn test_trie_tokens() {
        let mut trie = Trie::new();
        trie.insert("car", 1u32).unwrap();
        trie.insert_key("ca").unwrap();

        assert_tokens(
            &trie,
            &[
                Token::Map { len: Some(2) },
                Token::Str("ca"),
                Token::None,
                Token::Str("car"),
                Token::Some,
                Token::U32(1),
                Token::MapEnd,
            ],
        );
    }

    #[test]
    fn test_empty_trie_tokens() {
        let trie: Trie<u32> = Trie::new();
        assert_tokens(&trie, &[Token::Map { len: Some(0) }, Token::MapEnd]);
    }

    #[test]
    fn test_rejected_key() {
        let long: String = std::iter::repeat('a')
            .take(crate::DEFAULT_MAX_KEY_LEN + 1)
            .collect();
        let long: &'static str = Box::leak(long.into_boxed_str());

        assert_de_tokens_error::<Trie<u32>>(
            &[Token::Map { len: Some(1) }, Token::Str(long), Token::None],
            "invalid key: 4097 characters exceeds the limit of 4096",
        );
    }

    #[test]
    fn test_policy_tokens() {
        let policy = KeyPolicy::default().with_max_key_len(16).deny_control_chars();

        assert_tokens(
            &policy,
            &[
                Token::Struct {
                    name: "KeyPolicy",
                    len: 2,
                },
                Token::Str("max_key_len"),
                Token::Some,
                Token::U64(16),
                Token::Str("allow_control_chars"),
                Token::Bool(false),
                Token::StructEnd,
            ],
        );
    }
}
