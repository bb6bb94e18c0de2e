//! Chatbpe-tokenizer - BPE token counting for chat text
//!
//! This crate segments text into subword tokens using a trained vocabulary
//! and an ordered merge table. It is used to estimate the token counts of
//! outgoing and incoming chat messages.
//!
//! # Features
//!
//! - Greedy longest-match seeding against the vocabulary, per space-separated word
//! - Merge rules applied in table order, never across word boundaries
//! - Lazy, session-scoped loading from a file or HTTP(S) resource
//! - Per-day request/response token tallies
//!
//! # Example
//!
//! ```rust
//! use chatbpe_tokenizer::{MergeTable, Tokenizer, Vocabulary};
//!
//! let vocab: Vocabulary = [("a", 0), ("b", 1)].into_iter().collect();
//! let merges = MergeTable::from_pairs([("a", "b")]);
//! let tokenizer = Tokenizer::initialize(vocab, merges);
//!
//! assert_eq!(tokenizer.tokenize("ab a b"), vec!["ab", "a", "b"]);
//! assert_eq!(tokenizer.count("ab a b"), 3);
//! ```

// Re-export core types
pub use chatbpe_core::{
    MergeRule, MergeTable, Result, SessionStatus, Token, TokenizerError, Vocabulary,
};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::Tokenizer;

// Configuration
pub mod config;
pub use config::{MergePolicy, ResourceLocation, TokenizerConfig, TokenizerConfigBuilder};

// Resource loading
pub mod io;
pub use io::{TokenizerLoader, VocabularySource};

// Pre-tokenization
pub mod pre_tokenizer;

// Session lifecycle
pub mod session;
pub use session::TokenizerSession;

// Usage accounting
pub mod usage;
pub use usage::{DailyCount, Direction, UsageLedger};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
