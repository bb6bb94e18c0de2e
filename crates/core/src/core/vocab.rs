//! Vocabulary storage and lookup.
//!
//! The vocabulary is only ever membership-tested during seeding, so it is a
//! plain `AHashMap` keyed by `CompactString`. Lookups borrow as `&str`, which
//! lets the seed pass probe substrings of the input without allocating.

use ahash::AHashMap;
use compact_str::CompactString;

/// Forward mapping: token string -> ID
pub type Vocab = AHashMap<CompactString, i64>;

/// Known token strings with their identifiers.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    /// Forward mapping: token string -> ID
    vocab: Vocab,
    /// Length in characters of the longest entry
    max_token_chars: usize,
}

impl Vocabulary {
    /// Create a new empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new vocabulary with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vocab: Vocab::with_capacity(capacity),
            max_token_chars: 0,
        }
    }

    /// Insert a token with its ID.
    ///
    /// Returns the previous ID if the token was already present. IDs are not
    /// required to be unique.
    pub fn insert(&mut self, token: &str, id: i64) -> Option<i64> {
        self.max_token_chars = self.max_token_chars.max(token.chars().count());
        self.vocab.insert(CompactString::new(token), id)
    }

    /// Get the ID for a token string.
    #[inline]
    pub fn get_id(&self, token: &str) -> Option<i64> {
        self.vocab.get(token).copied()
    }

    /// Check whether a token string is known.
    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.vocab.contains_key(token)
    }

    /// Length in characters of the longest token.
    ///
    /// No candidate longer than this can match, so seeding stops growing a
    /// candidate once it reaches this length.
    #[inline]
    pub fn max_token_chars(&self) -> usize {
        self.max_token_chars
    }

    /// Get the size of the vocabulary.
    #[inline]
    pub fn len(&self) -> usize {
        self.vocab.len()
    }

    /// Check if the vocabulary is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vocab.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(S, i64)> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut vocab = Vocabulary::with_capacity(iter.size_hint().0);
        for (token, id) in iter {
            vocab.insert(token.as_ref(), id);
        }
        vocab
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut vocab = Vocabulary::new();
        assert_eq!(vocab.insert("hello", 0), None);
        assert_eq!(vocab.insert("world", 1), None);

        assert_eq!(vocab.get_id("hello"), Some(0));
        assert_eq!(vocab.get_id("world"), Some(1));
        assert!(vocab.contains("hello"));
        assert!(!vocab.contains("hell"));
        assert_eq!(vocab.len(), 2);
    }

    #[test]
    fn test_duplicate_token_replaces_id() {
        let mut vocab = Vocabulary::new();
        vocab.insert("hello", 0);
        assert_eq!(vocab.insert("hello", 7), Some(0));
        assert_eq!(vocab.get_id("hello"), Some(7));
        assert_eq!(vocab.len(), 1);
    }

    #[test]
    fn test_shared_ids_allowed() {
        let vocab: Vocabulary = [("a", 0), ("b", 0)].into_iter().collect();
        assert_eq!(vocab.get_id("a"), Some(0));
        assert_eq!(vocab.get_id("b"), Some(0));
    }

    #[test]
    fn test_negative_ids() {
        let vocab: Vocabulary = [("a", -1), ("b", i64::MAX)].into_iter().collect();
        assert_eq!(vocab.get_id("a"), Some(-1));
        assert_eq!(vocab.get_id("b"), Some(i64::MAX));
    }

    #[test]
    fn test_max_token_chars_counts_characters() {
        let vocab: Vocabulary = [("ab", 0), ("héé", 1), ("x", 2)].into_iter().collect();
        assert_eq!(vocab.max_token_chars(), 3);
        assert!(Vocabulary::new().is_empty());
        assert_eq!(Vocabulary::new().max_token_chars(), 0);
    }
}
