//! Render-tree production for the annotated surface.
//!
//! The engine does not render anything itself; it emits a tree of sentence
//! nodes and word nodes, pure rendering instructions the host view layer
//! consumes. Indices in the tree are one-based to match the surface's node
//! attributes; the color class is derived from the grammatical tag, leaving
//! concrete colors to the host theme.

use crate::document::{AnnotatedDocument, Sentence, needs_leading_space};

/// The visual color channel a word renders in, derived from its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorClass {
    /// Noun-phrase tags (`NP`).
    NounPhrase,
    /// Verb-phrase tags (`VP`).
    VerbPhrase,
    /// Other phrase-level tags (`PP`, `CP`, `AdvP`, `AdjP`).
    Phrase,
    /// Frozen terms.
    Frozen,
    /// No dedicated color; the host's default text color applies.
    Inherit,
}

impl ColorClass {
    /// Classify a grammatical tag. Checks run in fixed order; unrecognized
    /// tags (including `"none"` and `"dot"`) inherit.
    pub fn for_tag(tag: &str) -> Self {
        if tag.contains("NP") {
            Self::NounPhrase
        } else if tag.contains("VP") {
            Self::VerbPhrase
        } else if tag.contains("PP")
            || tag.contains("CP")
            || tag.contains("AdvP")
            || tag.contains("AdjP")
        {
            Self::Phrase
        } else if tag.contains("freeze") {
            Self::Frozen
        } else {
            Self::Inherit
        }
    }
}

/// A word node in the render tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordNode {
    /// One-based index of the containing sentence.
    pub sentence_index: usize,
    /// One-based index of this word within its sentence.
    pub word_index: usize,
    /// The grammatical tag as delivered by the annotator.
    pub tag: String,
    /// The derived color class.
    pub color: ColorClass,
    /// The text to render, including the joining space where one is needed.
    pub text: String,
}

/// A sentence node in the render tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceNode {
    /// One-based sentence index.
    pub index: usize,
    /// Whether this is the active sentence.
    pub active: bool,
    /// The word nodes, in order.
    pub words: Vec<WordNode>,
}

/// The full render tree for the annotated surface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderDoc {
    /// The sentence nodes, in document order.
    pub sentences: Vec<SentenceNode>,
}

impl RenderDoc {
    /// Whether the tree renders nothing.
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// The text the tree renders, concatenated.
    pub fn plain_text(&self) -> String {
        self.sentences
            .iter()
            .flat_map(|s| s.words.iter())
            .map(|w| w.text.as_str())
            .collect()
    }
}

/// Build the render tree for `doc`, marking `active_sentence` (one-based).
pub fn render(doc: &AnnotatedDocument, active_sentence: Option<usize>) -> RenderDoc {
    render_with_transient(doc, active_sentence, &[])
}

/// Build the render tree for `doc` plus transient trailing sentences.
///
/// `transient` holds sentence segments typed into the rendered surface that
/// the canonical document does not cover yet; they display as provisional
/// nodes after the document's sentences without ever entering the document.
pub fn render_with_transient(
    doc: &AnnotatedDocument,
    active_sentence: Option<usize>,
    transient: &[&str],
) -> RenderDoc {
    let mut sentences: Vec<SentenceNode> = doc
        .sentences()
        .iter()
        .enumerate()
        .map(|(s_index, sentence)| sentence_node(s_index, sentence, active_sentence))
        .collect();

    for (offset, text) in transient.iter().enumerate() {
        let s_index = doc.sentence_count() + offset;
        let sentence = Sentence::provisional(text);
        sentences.push(sentence_node(s_index, &sentence, active_sentence));
    }

    RenderDoc { sentences }
}

fn sentence_node(
    s_index: usize,
    sentence: &Sentence,
    active_sentence: Option<usize>,
) -> SentenceNode {
    SentenceNode {
        index: s_index + 1,
        active: active_sentence == Some(s_index + 1),
        words: sentence
            .words
            .iter()
            .enumerate()
            .map(|(w_index, word)| {
                let mut text = String::with_capacity(word.text.len() + 1);
                if needs_leading_space(word, s_index, w_index) {
                    text.push(' ');
                }
                text.push_str(&word.text);
                WordNode {
                    sentence_index: s_index + 1,
                    word_index: w_index + 1,
                    tag: word.tag.clone(),
                    color: ColorClass::for_tag(&word.tag),
                    text,
                }
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Sentence, Word};

    fn sample_doc() -> AnnotatedDocument {
        AnnotatedDocument::from_sentences(vec![
            Sentence::new(vec![
                Word::new("This", "NP", vec![]),
                Word::new("works", "VP", vec![]),
                Word::new(".", "dot", vec![]),
            ]),
            Sentence::new(vec![
                Word::new("Quite", "AdvP", vec![]),
                Word::new("well", "AdvP", vec![]),
                Word::new(".", "dot", vec![]),
            ]),
        ])
    }

    #[test]
    fn test_render_indices_are_one_based() {
        let tree = render(&sample_doc(), None);
        assert_eq!(tree.sentences[0].index, 1);
        assert_eq!(tree.sentences[1].index, 2);
        assert_eq!(tree.sentences[1].words[0].sentence_index, 2);
        assert_eq!(tree.sentences[1].words[1].word_index, 2);
    }

    #[test]
    fn test_render_marks_active_sentence() {
        let tree = render(&sample_doc(), Some(2));
        assert!(!tree.sentences[0].active);
        assert!(tree.sentences[1].active);
    }

    #[test]
    fn test_render_spacing_matches_plain_text() {
        let doc = sample_doc();
        let tree = render(&doc, None);
        assert_eq!(tree.plain_text(), doc.plain_text());
        assert_eq!(tree.plain_text(), "This works. Quite well.");
    }

    #[test]
    fn test_render_with_transient_appends_provisional_nodes() {
        let tree = render_with_transient(&sample_doc(), None, &["typed ahead"]);
        assert_eq!(tree.sentences.len(), 3);

        let extra = &tree.sentences[2];
        assert_eq!(extra.index, 3);
        assert!(!extra.active);
        assert!(extra.words.iter().all(|w| w.tag == "none"));
        assert_eq!(tree.plain_text(), "This works. Quite well. typed ahead");
    }

    #[test]
    fn test_color_classification() {
        assert_eq!(ColorClass::for_tag("NP"), ColorClass::NounPhrase);
        assert_eq!(ColorClass::for_tag("VP"), ColorClass::VerbPhrase);
        assert_eq!(ColorClass::for_tag("AdjP"), ColorClass::Phrase);
        assert_eq!(ColorClass::for_tag("AdvP"), ColorClass::Phrase);
        assert_eq!(ColorClass::for_tag("PP"), ColorClass::Phrase);
        assert_eq!(ColorClass::for_tag("freeze"), ColorClass::Frozen);
        assert_eq!(ColorClass::for_tag("none"), ColorClass::Inherit);
        assert_eq!(ColorClass::for_tag("dot"), ColorClass::Inherit);
    }
}
