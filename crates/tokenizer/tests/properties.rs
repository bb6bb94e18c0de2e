use chatbpe_tokenizer::{MergeTable, Tokenizer};
use proptest::prelude::*;

fn tokenizer() -> Tokenizer {
    Tokenizer::initialize(
        [("a", 0), ("ab", 1), ("ba", 2), ("c", 3), ("abc", 4)]
            .into_iter()
            .collect(),
        MergeTable::from_pairs([("ab", "c"), ("a", "b"), ("ab", "ab"), ("c", "c"), ("b", "a")]),
    )
}

proptest! {
    #[test]
    fn tokens_concatenate_back_to_words(text in "[abc ]{0,40}") {
        let tok = tokenizer();
        let joined: String = tok.tokenize(&text).concat();
        let words: String = text.split(' ').collect();
        prop_assert_eq!(joined, words);
    }

    #[test]
    fn no_token_contains_a_space(text in "[abcd ]{0,40}") {
        let tok = tokenizer();
        prop_assert!(tok.tokenize(&text).iter().all(|t| !t.contains(' ')));
    }

    #[test]
    fn merging_never_increases_count(text in "[abc ]{0,40}") {
        let tok = tokenizer();
        prop_assert!(tok.count(&text) <= tok.seed(&text).len());
    }

    #[test]
    fn tokenize_is_deterministic(text in "\\PC{0,30}") {
        let tok = tokenizer();
        prop_assert_eq!(tok.tokenize(&text), tok.tokenize(&text));
    }

    #[test]
    fn words_are_tokenized_independently(a in "[abc]{1,10}", b in "[abc]{1,10}") {
        let tok = tokenizer();
        let mut expected = tok.tokenize(&a);
        expected.extend(tok.tokenize(&b));
        prop_assert_eq!(tok.tokenize(&format!("{} {}", a, b)), expected);
    }
}
