//! Greedy longest-match seed segmentation.

use chatbpe_core::{Token, Vocabulary};

/// Segment one word into seed tokens, appending them to `out`.
///
/// From each position the candidate grows one character at a time and the
/// longest candidate present in the vocabulary is emitted. When no candidate
/// matches, the single character at the position is emitted as-is. The scan
/// then resumes right after the emitted token.
pub fn seed_word(vocab: &Vocabulary, word: &str, out: &mut Vec<Token>) {
    let max_chars = vocab.max_token_chars();
    let mut rest = word;

    while let Some(first) = rest.chars().next() {
        let mut best = first.len_utf8();

        for (taken, (idx, ch)) in rest.char_indices().enumerate() {
            if taken >= max_chars {
                break;
            }
            let end = idx + ch.len_utf8();
            if vocab.contains(&rest[..end]) {
                best = end;
            }
        }

        out.push(Token::new(&rest[..best]));
        rest = &rest[best..];
    }
}
