//! The canonical annotated document model.
//!
//! One logical document backs both editing surfaces. It is an ordered
//! sequence of [`Sentence`]s, each an ordered sequence of [`Word`]s. Indices
//! are always derived positionally; nothing stores a sentence or word index
//! redundantly.
//!
//! Lifecycle invariants:
//!
//! - The document changes either by wholesale replacement with externally
//!   annotated sentences, or by local synthesis of provisional sentences when
//!   the raw text runs ahead of annotation.
//! - No sentence or word is ever mutated in place; replacement is always
//!   whole-sentence.

use crate::segment;

/// The tag assigned to locally synthesized words that the external annotator
/// has not processed yet.
pub const PROVISIONAL_TAG: &str = "none";

/// An atomic token with a grammatical tag and candidate synonym list.
///
/// Immutable once produced by the external annotator. Locally synthesized
/// words carry [`PROVISIONAL_TAG`] and an empty synonym list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// The token text.
    pub text: String,
    /// Grammatical category tag (e.g. `"NP"`, `"VP"`), or `"none"`.
    pub tag: String,
    /// Candidate synonyms, in the annotator's preference order.
    pub synonyms: Vec<String>,
}

impl Word {
    /// Create an annotated word.
    pub fn new(text: impl Into<String>, tag: impl Into<String>, synonyms: Vec<String>) -> Self {
        Self {
            text: text.into(),
            tag: tag.into(),
            synonyms,
        }
    }

    /// Create a provisional word pending authoritative annotation.
    pub fn provisional(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: PROVISIONAL_TAG.to_string(),
            synonyms: Vec::new(),
        }
    }

    /// Whether this word has authoritative annotation data.
    pub fn is_provisional(&self) -> bool {
        self.tag == PROVISIONAL_TAG
    }

    /// Whether this word is a standalone punctuation token (`.` `,` `;` `?` `!`).
    ///
    /// Punctuation tokens attach to the preceding word without a joining
    /// space when the document is rendered as text.
    pub fn is_punctuation(&self) -> bool {
        let mut chars = self.text.chars();
        matches!(
            (chars.next(), chars.next()),
            (Some('.' | ',' | ';' | '?' | '!'), None)
        )
    }
}

/// An ordered sequence of words terminated by the sentence delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sentence {
    /// The words of this sentence, in document order.
    pub words: Vec<Word>,
}

impl Sentence {
    /// Create a sentence from words.
    pub fn new(words: Vec<Word>) -> Self {
        Self { words }
    }

    /// Synthesize a provisional sentence by whitespace-tokenizing `text`.
    pub fn provisional(text: &str) -> Self {
        Self {
            words: segment::tokenize_words(text)
                .into_iter()
                .map(Word::provisional)
                .collect(),
        }
    }

    /// The sentence text with words joined by single spaces.
    ///
    /// This is the form handed to external collaborators (e.g. the paraphrase
    /// request for one sentence); it does not apply the punctuation join rule.
    pub fn joined_text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Whether `word` needs a joining space before it in rendered text.
///
/// The first word of the whole document and standalone punctuation tokens
/// render without a leading space; everything else gets one.
pub(crate) fn needs_leading_space(word: &Word, sentence_index: usize, word_index: usize) -> bool {
    if sentence_index == 0 && word_index == 0 {
        return false;
    }
    !word.is_punctuation()
}

/// The canonical document: an ordered sequence of sentences.
///
/// Sentence and word indices are 1-based where they face collaborators (the
/// render tree, the sentence tracker) and derived positionally from this
/// structure; internal storage is plain `Vec` order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnnotatedDocument {
    sentences: Vec<Sentence>,
}

impl AnnotatedDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from sentences.
    pub fn from_sentences(sentences: Vec<Sentence>) -> Self {
        Self { sentences }
    }

    /// The sentences in document order.
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Number of sentences currently in the document.
    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Whether the document holds no sentences.
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Look up a word by zero-based `(sentence_index, word_index)`.
    ///
    /// Resolved at call time against the canonical document, so callers never
    /// hold on to stale word snapshots.
    pub fn word(&self, sentence_index: usize, word_index: usize) -> Option<&Word> {
        self.sentences.get(sentence_index)?.words.get(word_index)
    }

    /// Look up a sentence by zero-based index.
    pub fn sentence(&self, sentence_index: usize) -> Option<&Sentence> {
        self.sentences.get(sentence_index)
    }

    /// Append a locally synthesized provisional sentence.
    pub fn push_provisional(&mut self, text: &str) {
        self.sentences.push(Sentence::provisional(text));
    }

    /// Replace the document wholesale with authoritative annotated sentences.
    ///
    /// The payload is the complete new document: nothing from the previous
    /// content survives, so sentences the user has deleted never linger.
    /// Sentences the annotator has not reached yet are re-synthesized by the
    /// caller from the raw text afterwards.
    pub fn apply_authoritative(&mut self, sentences: Vec<Sentence>) {
        self.sentences = sentences;
    }

    /// Reset the document to empty.
    pub fn clear(&mut self) {
        self.sentences.clear();
    }

    /// The document rendered as plain text.
    ///
    /// Words are joined with single spaces, except that standalone
    /// punctuation attaches directly to the preceding word.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for (s_index, sentence) in self.sentences.iter().enumerate() {
            for (w_index, word) in sentence.words.iter().enumerate() {
                if needs_leading_space(word, s_index, w_index) {
                    out.push(' ');
                }
                out.push_str(&word.text);
            }
        }
        out
    }

    /// Character-offset spans of each sentence in [`plain_text`](Self::plain_text).
    ///
    /// Spans are half-open `[start, end)` and exclude the joining space
    /// between sentences. Returned in document order, one per sentence.
    pub fn sentence_spans(&self) -> Vec<(usize, usize)> {
        let mut spans = Vec::with_capacity(self.sentences.len());
        let mut offset = 0usize;
        for (s_index, sentence) in self.sentences.iter().enumerate() {
            let mut start = offset;
            for (w_index, word) in sentence.words.iter().enumerate() {
                if needs_leading_space(word, s_index, w_index) {
                    offset += 1;
                }
                if w_index == 0 {
                    start = offset;
                }
                offset += word.text.chars().count();
            }
            spans.push((start, offset));
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_two_sentences() -> AnnotatedDocument {
        AnnotatedDocument::from_sentences(vec![
            Sentence::new(vec![
                Word::new("This", "NP", vec!["That".into()]),
                Word::new("is", "VP", vec![]),
                Word::new("fine", "AdjP", vec![]),
                Word::new(".", "dot", vec![]),
            ]),
            Sentence::new(vec![
                Word::new("Another", "NP", vec![]),
                Word::new("line", "NP", vec![]),
                Word::new(".", "dot", vec![]),
            ]),
        ])
    }

    #[test]
    fn test_plain_text_join_rule() {
        let doc = doc_two_sentences();
        assert_eq!(doc.plain_text(), "This is fine. Another line.");
    }

    #[test]
    fn test_sentence_spans_match_plain_text() {
        let doc = doc_two_sentences();
        let text: Vec<char> = doc.plain_text().chars().collect();
        let spans = doc.sentence_spans();
        assert_eq!(spans.len(), 2);

        let first: String = text[spans[0].0..spans[0].1].iter().collect();
        let second: String = text[spans[1].0..spans[1].1].iter().collect();
        assert_eq!(first, "This is fine.");
        assert_eq!(second, "Another line.");
    }

    #[test]
    fn test_provisional_sentence_tokenization() {
        let sentence = Sentence::provisional("  hello   brave world ");
        assert_eq!(sentence.words.len(), 3);
        assert!(sentence.words.iter().all(|w| w.is_provisional()));
        assert!(sentence.words.iter().all(|w| w.synonyms.is_empty()));
        assert_eq!(sentence.words[1].text, "brave");
    }

    #[test]
    fn test_word_lookup_resolves_positionally() {
        let doc = doc_two_sentences();
        assert_eq!(doc.word(0, 0).map(|w| w.text.as_str()), Some("This"));
        assert_eq!(doc.word(1, 2).map(|w| w.text.as_str()), Some("."));
        assert!(doc.word(2, 0).is_none());
        assert!(doc.word(0, 9).is_none());
    }

    #[test]
    fn test_apply_authoritative_replaces_wholesale() {
        let mut doc = AnnotatedDocument::new();
        doc.push_provisional("draft one");
        doc.push_provisional("draft two");
        doc.push_provisional("draft three");

        doc.apply_authoritative(vec![Sentence::new(vec![
            Word::new("Final", "NP", vec![]),
            Word::new("one", "NP", vec![]),
            Word::new(".", "dot", vec![]),
        ])]);

        // The payload is the whole new document; deleted sentences do not
        // survive the replacement.
        assert_eq!(doc.sentence_count(), 1);
        assert!(!doc.sentences()[0].words[0].is_provisional());
    }

    #[test]
    fn test_apply_authoritative_covers_payload_larger_than_document() {
        let mut doc = AnnotatedDocument::new();
        doc.push_provisional("draft");
        doc.apply_authoritative(vec![
            Sentence::provisional("a"),
            Sentence::provisional("b"),
        ]);
        assert_eq!(doc.sentence_count(), 2);
    }

    #[test]
    fn test_punctuation_classification() {
        assert!(Word::provisional(".").is_punctuation());
        assert!(Word::provisional("?").is_punctuation());
        assert!(!Word::provisional("..").is_punctuation());
        assert!(!Word::provisional("a").is_punctuation());
        assert!(!Word::provisional("").is_punctuation());
    }

    #[test]
    fn test_joined_text() {
        let doc = doc_two_sentences();
        assert_eq!(doc.sentences()[0].joined_text(), "This is fine .");
    }
}
