//! External annotation payloads.
//!
//! The annotation collaborator (a network service, from this crate's point of
//! view a black box) returns, per request, a list of sentences where every
//! word carries a grammatical tag and a synonym list. Payloads arrive as JSON
//! and are shape-validated before anything touches the document: a payload
//! missing its sentence arrays, or containing a word entry without a `word`
//! field, is rejected wholesale and the engine stays in raw-text-only mode.
//!
//! Each request is tagged with a [`RequestGeneration`]; results carrying a
//! generation older than the last-issued one are stale and discarded on
//! arrival.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::{PROVISIONAL_TAG, Sentence, Word};
use crate::error::SyncError;

/// Monotonically increasing tag distinguishing in-flight annotation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestGeneration(pub u64);

/// One annotated word as produced by the external annotator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedWord {
    /// The token text.
    pub word: String,
    /// Grammatical category tag; defaults to `"none"` when absent.
    #[serde(rename = "type", default = "default_tag")]
    pub tag: String,
    /// Candidate synonyms in preference order; defaults to empty.
    #[serde(default)]
    pub synonyms: Vec<String>,
}

fn default_tag() -> String {
    PROVISIONAL_TAG.to_string()
}

/// A validated annotation payload: one word list per sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationResult {
    /// The annotated sentences, in document order.
    pub sentences: Vec<Vec<AnnotatedWord>>,
}

impl AnnotationResult {
    /// Validate a raw JSON value against the expected payload shape.
    ///
    /// Requirements: a `sentences` array of arrays, where every entry is an
    /// object with a string `word` field. `type` and `synonyms` are optional
    /// and default to `"none"` / empty. Anything else is
    /// [`SyncError::MalformedAnnotation`].
    pub fn from_value(value: &Value) -> Result<Self, SyncError> {
        let sentences = value
            .get("sentences")
            .and_then(Value::as_array)
            .ok_or_else(|| SyncError::malformed("missing `sentences` array"))?;

        let mut out = Vec::with_capacity(sentences.len());
        for (s_index, sentence) in sentences.iter().enumerate() {
            let words = sentence.as_array().ok_or_else(|| {
                SyncError::malformed(format!("sentence {s_index} is not a word array"))
            })?;

            let mut parsed = Vec::with_capacity(words.len());
            for (w_index, word) in words.iter().enumerate() {
                let text = word.get("word").and_then(Value::as_str).ok_or_else(|| {
                    SyncError::malformed(format!(
                        "sentence {s_index} word {w_index} is missing `word`"
                    ))
                })?;
                let tag = word
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or(PROVISIONAL_TAG);
                let synonyms = word
                    .get("synonyms")
                    .and_then(Value::as_array)
                    .map(|list| {
                        list.iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default();

                parsed.push(AnnotatedWord {
                    word: text.to_string(),
                    tag: tag.to_string(),
                    synonyms,
                });
            }
            out.push(parsed);
        }

        Ok(Self { sentences: out })
    }

    /// Parse and validate a payload from JSON text.
    pub fn from_json(json: &str) -> Result<Self, SyncError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|err| SyncError::malformed(format!("invalid JSON: {err}")))?;
        Self::from_value(&value)
    }

    /// Convert the payload into document sentences.
    pub fn into_sentences(self) -> Vec<Sentence> {
        self.sentences
            .into_iter()
            .map(|words| {
                Sentence::new(
                    words
                        .into_iter()
                        .map(|w| Word::new(w.word, w.tag, w.synonyms))
                        .collect(),
                )
            })
            .collect()
    }
}
