//! Chatbpe-core - Data model for the chatbpe tokenizer
//!
//! This crate holds the static data a BPE tokenizer is built from: the
//! vocabulary used for longest-match seeding and the ordered merge table.
//! Neither is mutated once a tokenizer has been constructed from it.
//!
//! # Example
//!
//! ```rust
//! use chatbpe_core::{MergeRule, MergeTable, Vocabulary};
//!
//! let vocab: Vocabulary = [("a", 0), ("b", 1)].into_iter().collect();
//! let merges = MergeTable::from_rules([MergeRule::new("a", "b")]);
//!
//! assert!(vocab.contains("a"));
//! assert_eq!(merges.len(), 1);
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

pub mod core;
pub use core::{MergeRule, MergeTable, SessionStatus, Token, Vocab, Vocabulary};
