//! Merge pass over a word's seed tokens.

use chatbpe_core::{MergeRule, MergeTable, Token};

/// Apply one rule in a single left-to-right pass.
///
/// The sequence is rebuilt into `scratch` rather than spliced in place: a
/// matching pair is emitted as the merged token and both inputs are
/// consumed, otherwise the token is emitted unchanged. A merged token is
/// never re-examined within the same pass. Returns the number of merges.
pub fn apply_rule(tokens: &mut Vec<Token>, scratch: &mut Vec<Token>, rule: &MergeRule) -> usize {
    if !tokens
        .windows(2)
        .any(|pair| rule.matches(&pair[0], &pair[1]))
    {
        return 0;
    }

    scratch.clear();
    let mut merged = 0;
    let mut iter = tokens.drain(..).peekable();

    while let Some(token) = iter.next() {
        if let Some(next) = iter.peek() {
            if rule.matches(&token, next) {
                iter.next();
                scratch.push(rule.merged().clone());
                merged += 1;
                continue;
            }
        }
        scratch.push(token);
    }

    drop(iter);
    std::mem::swap(tokens, scratch);
    merged
}

/// Apply every rule of the table in priority order.
///
/// Each rule is exhausted over the whole sequence before the next rule runs.
pub fn apply_table(tokens: &mut Vec<Token>, scratch: &mut Vec<Token>, table: &MergeTable) {
    for rule in table {
        if tokens.len() < 2 {
            break;
        }
        apply_rule(tokens, scratch, rule);
    }
}
