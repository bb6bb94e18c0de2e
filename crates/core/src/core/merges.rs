//! Merge rule management for BPE.
//!
//! Merge rules are kept as token strings in table order. The position of a
//! rule in the table is its priority: every rule is applied over the whole
//! sequence before the next one is considered.

use crate::error::{Result, TokenizerError};
use compact_str::CompactString;

/// An ordered pair of tokens designated for concatenation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRule {
    left: CompactString,
    right: CompactString,
    /// `left + right`, built once so a match does not allocate a fresh string
    merged: CompactString,
}

impl MergeRule {
    /// Create a rule merging `left` followed by `right`.
    pub fn new(left: &str, right: &str) -> Self {
        let mut merged = CompactString::with_capacity(left.len() + right.len());
        merged.push_str(left);
        merged.push_str(right);

        Self {
            left: CompactString::new(left),
            right: CompactString::new(right),
            merged,
        }
    }

    /// Parse a `"left right"` entry.
    ///
    /// The entry must consist of exactly two non-empty fields separated by a
    /// single ASCII space. `index` is only used for error reporting.
    pub fn parse(index: usize, entry: &str) -> Result<Self> {
        let malformed = || TokenizerError::MalformedMergeRule {
            index,
            entry: entry.to_string(),
        };

        let (left, right) = entry.split_once(' ').ok_or_else(malformed)?;
        if left.is_empty() || right.is_empty() || right.contains(' ') {
            return Err(malformed());
        }

        Ok(Self::new(left, right))
    }

    /// Left-hand token.
    #[inline]
    pub fn left(&self) -> &str {
        &self.left
    }

    /// Right-hand token.
    #[inline]
    pub fn right(&self) -> &str {
        &self.right
    }

    /// The token produced by this rule.
    #[inline]
    pub fn merged(&self) -> &CompactString {
        &self.merged
    }

    /// Whether the adjacent pair `(a, b)` is exactly this rule's pair.
    #[inline]
    pub fn matches(&self, a: &str, b: &str) -> bool {
        self.left == a && self.right == b
    }
}

/// Ordered collection of merge rules. Insertion order is priority order.
#[derive(Debug, Clone, Default)]
pub struct MergeTable {
    rules: Vec<MergeRule>,
}

impl MergeTable {
    /// Create a new empty merge table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new table with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rules: Vec::with_capacity(capacity),
        }
    }

    /// Build a table from rules, keeping their order.
    pub fn from_rules(rules: impl IntoIterator<Item = MergeRule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// Build a table from `(left, right)` string pairs, keeping their order.
    pub fn from_pairs<L, R>(pairs: impl IntoIterator<Item = (L, R)>) -> Self
    where
        L: AsRef<str>,
        R: AsRef<str>,
    {
        Self::from_rules(
            pairs
                .into_iter()
                .map(|(l, r)| MergeRule::new(l.as_ref(), r.as_ref())),
        )
    }

    /// Append a rule with the lowest priority so far.
    pub fn push(&mut self, rule: MergeRule) {
        self.rules.push(rule);
    }

    /// Rule at the given rank.
    #[inline]
    pub fn get(&self, rank: usize) -> Option<&MergeRule> {
        self.rules.get(rank)
    }

    /// Iterate rules in priority order.
    pub fn iter(&self) -> std::slice::Iter<'_, MergeRule> {
        self.rules.iter()
    }

    /// Get the number of merge rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if there are no merge rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a MergeTable {
    type Item = &'a MergeRule;
    type IntoIter = std::slice::Iter<'a, MergeRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
