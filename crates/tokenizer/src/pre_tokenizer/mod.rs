//! Pre-tokenization pipeline.
//!
//! Text is split into words on single spaces, then each word is segmented
//! by greedy longest match against the vocabulary. The merge pass only ever
//! sees tokens from one word at a time.

pub mod seed;
pub mod split;

pub use seed::seed_word;
pub use split::split_words;
