//! Highlight decoration computation.
//!
//! Decorations are derived state: `(range, class)` highlight instructions
//! recomputed from a document text snapshot plus configuration on every
//! relevant change. They are never persisted, and
//! [`compute`] is a pure function: identical arguments yield identical
//! decoration sets, so hosts may memoize freely.
//!
//! All offsets are **character offsets** (Unicode scalar values), half-open.
//!
//! The computation runs five passes in a fixed order:
//!
//! 1. word-limit overflow: every word token past the limit
//! 2. frozen phrases, longest-first, case-insensitive, non-overlapping
//! 3. frozen single words, except where a phrase match already covers them
//! 4. duplicate sentences (normalized content appearing more than once)
//! 5. the active sentence, if one is set
//!
//! Phrase matches take precedence over word matches at overlapping offsets;
//! this is a fixed tie-break, not configurable. Two frozen phrases of equal
//! length are scanned in lexicographic order, so the lexicographically
//! smaller phrase wins at overlapping offsets.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};
use unicode_segmentation::UnicodeSegmentation;

use crate::document::AnnotatedDocument;
use crate::freeze::FrozenSet;

/// A highlight classification for a decorated range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HighlightClass {
    /// A word token past the configured word limit.
    Overflow,
    /// A frozen (protected) word or phrase.
    Frozen,
    /// A sentence whose normalized content occurs more than once.
    Duplicate,
    /// The sentence containing the caret in the tracked surface.
    Active,
}

/// A half-open character-offset range (`start..end`) in the document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DecorationRange {
    /// Range start offset (inclusive), in Unicode scalar values.
    pub start: usize,
    /// Range end offset (exclusive), in Unicode scalar values.
    pub end: usize,
}

impl DecorationRange {
    /// Create a new decoration range.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the range in characters.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the range is empty.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether two half-open ranges share any offset.
    pub fn overlaps(&self, other: &DecorationRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A single derived highlight instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoration {
    /// The decorated character range.
    pub range: DecorationRange,
    /// The highlight classification.
    pub class: HighlightClass,
}

impl Decoration {
    /// Create a decoration.
    pub fn new(start: usize, end: usize, class: HighlightClass) -> Self {
        Self {
            range: DecorationRange::new(start, end),
            class,
        }
    }
}

/// Configuration for a decoration pass.
#[derive(Debug, Clone)]
pub struct DecorationOptions {
    /// Word-count limit; tokens past it are decorated [`HighlightClass::Overflow`].
    pub limit: usize,
    /// The frozen word/phrase sets.
    pub frozen: FrozenSet,
    /// One-based index of the active sentence, if any.
    pub active_sentence: Option<usize>,
}

impl DecorationOptions {
    /// Options with the given limit, no frozen terms, no active sentence.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            frozen: FrozenSet::new(),
            active_sentence: None,
        }
    }
}

/// Byte-offset to char-offset conversion for regex match positions.
struct CharIndex {
    char_to_byte: Vec<usize>,
    text_len: usize,
}

impl CharIndex {
    fn new(text: &str) -> Self {
        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        char_to_byte.push(text.len());
        Self {
            char_to_byte,
            text_len: text.len(),
        }
    }

    fn byte_to_char(&self, byte_offset: usize) -> usize {
        let clamped = byte_offset.min(self.text_len);
        match self.char_to_byte.binary_search(&clamped) {
            Ok(idx) => idx,
            Err(idx) => idx,
        }
    }
}

/// Punctuation-terminated sentence spans, as matched by the duplicate pass.
fn sentence_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^.!?।]+[.!?।]+").expect("sentence pattern is valid"))
}

fn char_range(index: &CharIndex, byte_start: usize, byte_end: usize) -> DecorationRange {
    DecorationRange::new(index.byte_to_char(byte_start), index.byte_to_char(byte_end))
}

/// Compute the full decoration set for a document text snapshot.
///
/// Pure and deterministic: the output depends only on `text` and `options`.
/// Decorations are returned grouped by rule in pass order; ranges from the
/// same rule never overlap, while `Overflow` may coexist with `Frozen` or
/// `Duplicate` on the same offsets (they render on different visual
/// channels).
pub fn compute(text: &str, options: &DecorationOptions) -> Vec<Decoration> {
    let index = CharIndex::new(text);
    let mut decorations = Vec::new();

    overflow_pass(text, &index, options.limit, &mut decorations);

    let mut claimed: Vec<DecorationRange> = Vec::new();
    phrase_pass(text, &index, &options.frozen, &mut claimed, &mut decorations);
    word_pass(text, &index, &options.frozen, &mut claimed, &mut decorations);

    let spans = duplicate_pass(text, &index, &mut decorations);
    active_pass(&spans, options.active_sentence, &mut decorations);

    decorations
}

/// Compute decorations for the canonical document.
///
/// Passes 1–4 run over [`AnnotatedDocument::plain_text`]; the active-sentence
/// pass uses the document's own sentence spans rather than re-segmenting, so
/// an unterminated trailing sentence can still be active.
pub fn compute_for_document(
    doc: &AnnotatedDocument,
    options: &DecorationOptions,
) -> Vec<Decoration> {
    let text = doc.plain_text();
    let mut decorations = compute(
        &text,
        &DecorationOptions {
            active_sentence: None,
            ..options.clone()
        },
    );

    if let Some(active) = options.active_sentence
        && active >= 1
        && let Some(&(start, end)) = doc.sentence_spans().get(active - 1)
    {
        decorations.push(Decoration::new(start, end, HighlightClass::Active));
    }

    decorations
}

/// Pass 1: word tokens whose running count exceeds the limit.
fn overflow_pass(text: &str, index: &CharIndex, limit: usize, out: &mut Vec<Decoration>) {
    let mut word_count = 0usize;
    for (byte_start, token) in text.unicode_word_indices() {
        word_count += 1;
        if word_count > limit {
            let range = char_range(index, byte_start, byte_start + token.len());
            out.push(Decoration {
                range,
                class: HighlightClass::Overflow,
            });
        }
    }
}

/// Pass 2: frozen phrases, longest-first, non-overlapping, case-insensitive.
fn phrase_pass(
    text: &str,
    index: &CharIndex,
    frozen: &FrozenSet,
    claimed: &mut Vec<DecorationRange>,
    out: &mut Vec<Decoration>,
) {
    // Longest-match-first. The sort is stable over the set's lexicographic
    // iteration order, which pins the equal-length tie-break.
    let mut phrases: Vec<&String> = frozen.phrases().iter().collect();
    phrases.sort_by_key(|p| Reverse(p.chars().count()));

    for phrase in phrases {
        let Ok(pattern) = RegexBuilder::new(&regex::escape(phrase))
            .case_insensitive(true)
            .build()
        else {
            continue;
        };

        for m in pattern.find_iter(text) {
            let range = char_range(index, m.start(), m.end());
            if range.is_empty() || claimed.iter().any(|c| c.overlaps(&range)) {
                continue;
            }
            claimed.push(range);
            out.push(Decoration {
                range,
                class: HighlightClass::Frozen,
            });
        }
    }
}

/// Pass 3: frozen single words, skipping offsets a phrase match already covers.
fn word_pass(
    text: &str,
    index: &CharIndex,
    frozen: &FrozenSet,
    claimed: &mut Vec<DecorationRange>,
    out: &mut Vec<Decoration>,
) {
    if frozen.words().is_empty() {
        return;
    }
    for (byte_start, token) in text.unicode_word_indices() {
        if !frozen.words().contains(&token.to_lowercase()) {
            continue;
        }
        let range = char_range(index, byte_start, byte_start + token.len());
        if claimed.iter().any(|c| c.overlaps(&range)) {
            continue;
        }
        claimed.push(range);
        out.push(Decoration {
            range,
            class: HighlightClass::Frozen,
        });
    }
}

/// Pass 4: duplicate sentences. Returns all sentence spans for the active pass.
fn duplicate_pass(
    text: &str,
    index: &CharIndex,
    out: &mut Vec<Decoration>,
) -> Vec<DecorationRange> {
    let mut spans = Vec::new();
    let mut groups: BTreeMap<String, Vec<DecorationRange>> = BTreeMap::new();

    for m in sentence_pattern().find_iter(text) {
        let range = char_range(index, m.start(), m.end());
        spans.push(range);

        let key = m.as_str().trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        groups.entry(key).or_default().push(range);
    }

    let mut duplicates: Vec<DecorationRange> = groups
        .into_values()
        .filter(|ranges| ranges.len() > 1)
        .flatten()
        .collect();
    duplicates.sort_unstable_by_key(|r| (r.start, r.end));

    for range in duplicates {
        out.push(Decoration {
            range,
            class: HighlightClass::Duplicate,
        });
    }

    spans
}

/// Pass 5: the active sentence, addressed by one-based index.
fn active_pass(
    spans: &[DecorationRange],
    active_sentence: Option<usize>,
    out: &mut Vec<Decoration>,
) {
    if let Some(active) = active_sentence
        && active >= 1
        && let Some(&range) = spans.get(active - 1)
    {
        out.push(Decoration {
            range,
            class: HighlightClass::Active,
        });
    }
}
