//! Property-based tests for listing input

use proptest::prelude::*;
use rewear::client::listing::parse_tags;

proptest! {
    #[test]
    fn test_tags_are_trimmed_unique_and_non_empty(input in "[a-z ,]{0,40}") {
        let tags = parse_tags(&input);
        for (i, tag) in tags.iter().enumerate() {
            prop_assert!(!tag.is_empty());
            prop_assert_eq!(tag.trim(), tag.as_str());
            prop_assert!(!tags[..i].contains(tag));
        }
    }

    #[test]
    fn test_every_word_survives(words in prop::collection::vec("[a-z]{1,8}", 0..6)) {
        let tags = parse_tags(&words.join(" , "));
        for word in &words {
            prop_assert!(tags.contains(word));
        }
    }
}
