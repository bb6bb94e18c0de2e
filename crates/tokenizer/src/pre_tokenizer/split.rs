//! Word splitting for pre-tokenization.

/// Split text into words on single ASCII space characters.
///
/// Consecutive spaces produce empty words, which carry no tokens and are
/// dropped. Other whitespace (tabs, newlines) stays inside the word.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|word| !word.is_empty())
}
