//! Vocabulary and merge table storage.
//!
//! These are the two inputs of BPE segmentation. Both are loaded together
//! and treated as read-only afterwards.

pub mod merges;
pub mod status;
pub mod vocab;

pub use merges::{MergeRule, MergeTable};
pub use status::SessionStatus;
pub use vocab::{Vocab, Vocabulary};

/// Atomic unit of tokenizer output.
pub type Token = compact_str::CompactString;
