//! Property-style checks for the decoration engine over the public API.

use rephrase_core::{
    Decoration, DecorationOptions, DecorationRange, FrozenSet, HighlightClass, compute,
};
use unicode_segmentation::UnicodeSegmentation;

fn by_class(decorations: &[Decoration], class: HighlightClass) -> Vec<DecorationRange> {
    decorations
        .iter()
        .filter(|d| d.class == class)
        .map(|d| d.range)
        .collect()
}

fn options(limit: usize) -> DecorationOptions {
    DecorationOptions {
        limit,
        frozen: FrozenSet::new(),
        active_sentence: None,
    }
}

#[test]
fn test_idempotence_over_varied_inputs() {
    let texts = [
        "",
        "plain words only",
        "One. One. Two! Two! three? three?",
        "due process and more due process.",
        "বাংলা বাক্য। বাংলা বাক্য।",
    ];
    let opts = DecorationOptions {
        limit: 4,
        frozen: FrozenSet::new()
            .toggle("due process")
            .toggle("process")
            .toggle("বাংলা"),
        active_sentence: Some(1),
    };
    for text in texts {
        assert_eq!(compute(text, &opts), compute(text, &opts), "text: {text:?}");
    }
}

#[test]
fn test_word_limit_exactness() {
    // For N tokens and limit L, exactly max(0, N-L) tokens overflow, and
    // they are precisely the last N-L in document order.
    let text = "alpha beta gamma delta epsilon zeta";
    let tokens: Vec<&str> = text.unicode_words().collect();
    let n = tokens.len();

    for limit in 0..=n + 2 {
        let overflow = by_class(&compute(text, &options(limit)), HighlightClass::Overflow);
        assert_eq!(overflow.len(), n.saturating_sub(limit), "limit {limit}");

        let decorated: Vec<String> = overflow
            .iter()
            .map(|r| text.chars().skip(r.start).take(r.end - r.start).collect())
            .collect();
        let expected: Vec<String> = tokens[limit.min(n)..].iter().map(|t| t.to_string()).collect();
        assert_eq!(decorated, expected, "limit {limit}");
    }
}

#[test]
fn test_duplicate_groups_all_marked() {
    let text = "A cat sat. A dog ran. a cat sat. A CAT SAT. A dog ran.";
    let duplicates = by_class(&compute(text, &options(100)), HighlightClass::Duplicate);
    // Three "a cat sat." plus two "a dog ran." occurrences.
    assert_eq!(duplicates.len(), 5);
}

#[test]
fn test_duplicate_groups_detected_with_danda_terminator() {
    let text = "এক কথা। অন্য কথা। এক কথা।";
    let duplicates = by_class(&compute(text, &options(100)), HighlightClass::Duplicate);
    // Both occurrences of the repeated danda-terminated sentence.
    assert_eq!(duplicates.len(), 2);
}

#[test]
fn test_unique_sentences_unmarked() {
    let text = "First idea. Second idea. Third idea.";
    assert!(by_class(&compute(text, &options(100)), HighlightClass::Duplicate).is_empty());
}

#[test]
fn test_frozen_ranges_within_a_rule_never_overlap() {
    let mut opts = options(100);
    opts.frozen = FrozenSet::new()
        .toggle("machine learning")
        .toggle("learning")
        .toggle("machine");
    let text = "machine learning beats manual machine learning learning";
    let frozen = by_class(&compute(text, &opts), HighlightClass::Frozen);

    for (i, a) in frozen.iter().enumerate() {
        for b in frozen.iter().skip(i + 1) {
            assert!(!a.overlaps(b), "{a:?} overlaps {b:?}");
        }
    }
}

#[test]
fn test_word_inside_matched_phrase_gets_single_decoration() {
    let mut opts = options(100);
    opts.frozen = FrozenSet::new().toggle("rest api").toggle("api");
    let text = "the rest api works";
    let frozen = by_class(&compute(text, &opts), HighlightClass::Frozen);
    assert_eq!(frozen.len(), 1);
    let covered: String = text
        .chars()
        .skip(frozen[0].start)
        .take(frozen[0].end - frozen[0].start)
        .collect();
    assert_eq!(covered, "rest api");
}

#[test]
fn test_empty_text_yields_no_decorations() {
    let mut opts = options(0);
    opts.frozen = FrozenSet::builtin();
    opts.active_sentence = Some(1);
    assert!(compute("", &opts).is_empty());
}

#[test]
fn test_builtin_terms_decorate_out_of_the_box() {
    let mut opts = options(100);
    opts.frozen = FrozenSet::builtin();
    let text = "We apply machine learning to the evidence.";
    let frozen = by_class(&compute(text, &opts), HighlightClass::Frozen);
    assert_eq!(frozen.len(), 2);
}
