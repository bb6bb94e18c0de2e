//! Main tokenizer implementation.
//!
//! This module provides the `Tokenizer` struct that combines the vocabulary
//! and merge table into a pure segmentation function.

pub mod merge;

use crate::pre_tokenizer::{seed_word, split_words};
use chatbpe_core::{MergeTable, Token, Vocabulary};
use merge::apply_table;
use rayon::prelude::*;

/// BPE tokenizer over a fixed vocabulary and merge table.
///
/// A `Tokenizer` only exists once its data has been loaded, so every method
/// on it is infallible. Code that has to handle the not-yet-loaded case goes
/// through [`crate::TokenizerSession`].
#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// Vocabulary used for longest-match seeding
    vocab: Vocabulary,
    /// Merge rules in priority order
    merges: MergeTable,
}

impl Tokenizer {
    /// Build a tokenizer from a loaded vocabulary and merge table.
    pub fn initialize(vocab: Vocabulary, merges: MergeTable) -> Self {
        Self { vocab, merges }
    }

    /// Segment text into tokens.
    ///
    /// Words are seeded and merged independently, which is the same as one
    /// merge pass per rule over the whole sequence with word boundaries that
    /// no pair may straddle.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut word_tokens = Vec::new();
        let mut scratch = Vec::new();

        for word in split_words(text) {
            seed_word(&self.vocab, word, &mut word_tokens);
            apply_table(&mut word_tokens, &mut scratch, &self.merges);
            tokens.append(&mut word_tokens);
        }

        tokens
    }

    /// Seed segmentation only, before any merge rule is applied.
    pub fn seed(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        for word in split_words(text) {
            seed_word(&self.vocab, word, &mut tokens);
        }
        tokens
    }

    /// Number of tokens in `text`.
    pub fn count(&self, text: &str) -> usize {
        self.tokenize(text).len()
    }

    /// Count tokens for a batch of texts (parallelized).
    pub fn count_batch<T>(&self, texts: &[T]) -> Vec<usize>
    where
        T: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.count(text.as_ref()))
            .collect()
    }

    /// Get a reference to the vocabulary.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Get a reference to the merge table.
    pub fn merges(&self) -> &MergeTable {
        &self.merges
    }
}
