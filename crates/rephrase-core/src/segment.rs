//! Sentence and word segmentation.
//!
//! Splitting is purely lexical: a document is divided into sentences at a
//! locale-specific delimiter, and sentences into provisional words at
//! whitespace. Both operations are pure functions with no state, so they can
//! be re-run on every keystroke.

/// The locale-specific sentence delimiter.
///
/// The delimiter is the full separator string (terminator punctuation plus a
/// trailing space), matching how users actually type sentence boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SentenceDelimiter {
    /// Full stop followed by a space (`". "`), used for Latin-script locales.
    #[default]
    Period,
    /// Danda followed by a space (`"। "`), used for Bangla.
    Danda,
}

impl SentenceDelimiter {
    /// The separator string this delimiter splits on.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Period => ". ",
            Self::Danda => "। ",
        }
    }

    /// The terminator character alone, without the trailing space.
    pub fn terminator(&self) -> char {
        match self {
            Self::Period => '.',
            Self::Danda => '।',
        }
    }
}

/// Split `raw` into sentence segments at `delimiter`, dropping empty segments.
///
/// Segments are returned in document order as subslices of `raw`. The
/// delimiter itself is not included in any segment.
pub fn segment<'a>(raw: &'a str, delimiter: SentenceDelimiter) -> Vec<&'a str> {
    raw.split(delimiter.as_str())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Count the sentence segments the user has typed so far.
pub fn sentence_count(raw: &str, delimiter: SentenceDelimiter) -> usize {
    segment(raw, delimiter).len()
}

/// Tokenize a sentence segment into words at whitespace.
///
/// Used to synthesize provisional words for sentences the external annotator
/// has not processed yet.
pub fn tokenize_words(sentence: &str) -> Vec<&str> {
    sentence.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_drops_empty_segments() {
        let segments = segment("One. Two. ", SentenceDelimiter::Period);
        assert_eq!(segments, vec!["One", "Two"]);
    }

    #[test]
    fn test_segment_keeps_trailing_unterminated_sentence() {
        let segments = segment("One. Two", SentenceDelimiter::Period);
        assert_eq!(segments, vec!["One", "Two"]);
    }

    #[test]
    fn test_segment_empty_input() {
        assert!(segment("", SentenceDelimiter::Period).is_empty());
        assert_eq!(sentence_count("", SentenceDelimiter::Period), 0);
    }

    #[test]
    fn test_segment_danda_delimiter() {
        let segments = segment("এক। দুই। তিন", SentenceDelimiter::Danda);
        assert_eq!(segments, vec!["এক", "দুই", "তিন"]);
    }

    #[test]
    fn test_segment_does_not_split_on_bare_terminator() {
        // "3.14" has no delimiter (terminator + space), so it stays intact.
        let segments = segment("Pi is 3.14", SentenceDelimiter::Period);
        assert_eq!(segments, vec!["Pi is 3.14"]);
    }

    #[test]
    fn test_tokenize_words_collapses_whitespace() {
        assert_eq!(tokenize_words("  a   b\tc "), vec!["a", "b", "c"]);
        assert!(tokenize_words("   ").is_empty());
    }
}
