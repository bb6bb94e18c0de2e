//! Tokenizer resource format.
//!
//! The resource is a JSON document whose `model` object carries `vocab`
//! (token -> id) and `merges`. Any other fields are ignored, so complete
//! published tokenizer files load as-is.

use chatbpe_core::{MergeRule, Result, TokenizerError};
use serde::Deserialize;
use std::collections::HashMap;

/// Top-level resource document.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenizerResource {
    pub model: ModelSection,
}

/// The `model` section of the resource.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelSection {
    /// Token string -> ID
    pub vocab: HashMap<String, i64>,
    /// Merge rules in priority order
    pub merges: Vec<MergeEntry>,
}

/// One merge entry.
///
/// Older files store `"left right"` strings, newer ones two-element arrays.
/// Anything else is kept as raw JSON so it can be skipped like any other
/// malformed entry instead of failing the whole document.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MergeEntry {
    Joined(String),
    Pair(Vec<String>),
    Other(serde_json::Value),
}

impl MergeEntry {
    /// Convert to a rule; `index` is the entry's position in the table.
    pub fn to_rule(&self, index: usize) -> Result<MergeRule> {
        match self {
            MergeEntry::Joined(entry) => MergeRule::parse(index, entry),
            MergeEntry::Pair(parts) => match parts.as_slice() {
                [left, right] if !left.is_empty() && !right.is_empty() => {
                    Ok(MergeRule::new(left, right))
                }
                _ => Err(TokenizerError::MalformedMergeRule {
                    index,
                    entry: format!("{:?}", parts),
                }),
            },
            MergeEntry::Other(value) => Err(TokenizerError::MalformedMergeRule {
                index,
                entry: value.to_string(),
            }),
        }
    }
}
