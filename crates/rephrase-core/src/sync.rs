//! The synchronization controller.
//!
//! One logical document backs two independently-editable surfaces: the raw
//! text surface the user types into, and the rendered annotated surface. The
//! [`SyncController`] is the sole writer to both; it decides on every raw
//! change, annotation arrival, focus change, or tracker report whether to
//! push freshly rendered content into the *other* surface, and defers when
//! doing so would clobber live editing.
//!
//! The controller is a reducer: [`SyncController::apply`] consumes one
//! [`SyncEvent`] and returns the [`SyncEffect`]s the host must carry out.
//! All work is synchronous; the only admitted race (the user still typing
//! while an annotation result arrives) is resolved by the request
//! generation counter (stale results are dropped on arrival) and by the
//! focus-gated replace condition (the focused surface is never overwritten).
//!
//! Every programmatic write the controller makes is tagged internal: the
//! next change notification caused by that write is swallowed exactly once,
//! so it is never mistaken for new user input re-triggering reconciliation.

use log::{debug, trace};

use crate::annotation::{AnnotationResult, RequestGeneration};
use crate::decorations::{self, Decoration, DecorationOptions};
use crate::document::AnnotatedDocument;
use crate::freeze::FrozenSet;
use crate::render::{self, RenderDoc};
use crate::segment::{self, SentenceDelimiter};

/// One of the two editing surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// The raw free-form text surface.
    Raw,
    /// The rendered annotated surface.
    Rendered,
}

/// Which surface currently owns focus, process-wide for the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    /// The raw surface is focused.
    RawFocused,
    /// The rendered surface is focused.
    RenderedFocused,
    /// Neither surface is focused.
    #[default]
    Neither,
}

impl FocusState {
    /// Whether `surface` currently owns focus.
    pub fn is_focused(&self, surface: Surface) -> bool {
        matches!(
            (self, surface),
            (Self::RawFocused, Surface::Raw) | (Self::RenderedFocused, Surface::Rendered)
        )
    }
}

/// An input to the reducer.
#[derive(Debug, Clone)]
pub enum SyncEvent {
    /// The raw surface reported a content change.
    RawTextChanged {
        /// The surface's full text after the change.
        text: String,
    },
    /// The rendered surface reported a content change.
    RenderedTextChanged {
        /// The surface's full text after the change.
        text: String,
    },
    /// An external annotation payload arrived.
    AnnotationArrived {
        /// The generation active when the request was issued.
        generation: RequestGeneration,
        /// The raw payload, validated before anything touches the document.
        payload: serde_json::Value,
    },
    /// A surface gained or lost focus.
    FocusChanged {
        /// Which surface.
        surface: Surface,
        /// True on focus, false on blur.
        focused: bool,
    },
    /// The tracker reported a new active sentence (one-based, or -1 for none).
    ActiveSentenceChanged {
        /// The reported index.
        index: i64,
    },
    /// The user clicked a word on the rendered surface.
    WordClicked {
        /// Zero-based sentence index.
        sentence_index: usize,
        /// Zero-based word index within the sentence.
        word_index: usize,
    },
    /// An externally triggered clear of the whole document.
    Clear,
}

/// A payload for the synonym-picker collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymRequest {
    /// Candidate synonyms for the clicked word.
    pub synonyms: Vec<String>,
    /// Zero-based sentence index of the clicked word.
    pub sentence_index: usize,
    /// Zero-based word index within the sentence.
    pub word_index: usize,
    /// The clicked word's sentence, space-joined.
    pub sentence_text: String,
}

/// An instruction the host must carry out after [`SyncController::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEffect {
    /// Replace the raw surface's content. Tagged internal: the resulting
    /// change notification is swallowed.
    SetRawContent(String),
    /// Replace the rendered surface's content. Tagged internal likewise.
    SetRenderedContent(RenderDoc),
    /// Hand the clicked word's synonyms to the synonym picker.
    ShowSynonyms(SynonymRequest),
}

/// Coordinates the raw and rendered surfaces over one canonical document.
#[derive(Debug, Default)]
pub struct SyncController {
    document: AnnotatedDocument,
    raw_text: String,
    /// The rendered surface's text as last reported or written. Content typed
    /// there ahead of annotation is carried into pushes transiently, never
    /// into the canonical document.
    rendered_text: String,
    delimiter: SentenceDelimiter,
    focus: FocusState,
    generation: u64,
    active_sentence: Option<usize>,
    /// Swallow the next change notification from the raw surface.
    suppress_raw: bool,
    /// Swallow the next change notification from the rendered surface.
    suppress_rendered: bool,
    /// A rendered-surface push is pending (deferred or not yet attempted).
    rendered_dirty: bool,
    /// A raw-surface push is pending.
    raw_dirty: bool,
}

impl SyncController {
    /// Create a controller for the given sentence delimiter.
    pub fn new(delimiter: SentenceDelimiter) -> Self {
        Self {
            delimiter,
            ..Self::default()
        }
    }

    /// The canonical document.
    pub fn document(&self) -> &AnnotatedDocument {
        &self.document
    }

    /// The authoritative raw text as last reported or written.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// The current focus state.
    pub fn focus(&self) -> FocusState {
        self.focus
    }

    /// The current active sentence (one-based), if any.
    pub fn active_sentence(&self) -> Option<usize> {
        self.active_sentence
    }

    /// The generation of the most recently issued annotation request.
    pub fn generation(&self) -> RequestGeneration {
        RequestGeneration(self.generation)
    }

    /// Issue a new annotation request: advances the generation counter and
    /// returns the tag the eventual result must carry to be applied.
    pub fn issue_request(&mut self) -> RequestGeneration {
        self.generation += 1;
        trace!("issued annotation request generation {}", self.generation);
        RequestGeneration(self.generation)
    }

    /// Compute the decoration set for the raw surface.
    ///
    /// Runs over the raw text (which carries the user's sentence
    /// punctuation) with the currently active sentence, if any.
    pub fn decorations(&self, limit: usize, frozen: &FrozenSet) -> Vec<Decoration> {
        decorations::compute(
            &self.raw_text,
            &DecorationOptions {
                limit,
                frozen: frozen.clone(),
                active_sentence: self.active_sentence,
            },
        )
    }

    /// Reduce one event into the effects the host must carry out.
    pub fn apply(&mut self, event: SyncEvent) -> Vec<SyncEffect> {
        match event {
            SyncEvent::RawTextChanged { text } => self.on_raw_changed(text),
            SyncEvent::RenderedTextChanged { text } => self.on_rendered_changed(text),
            SyncEvent::AnnotationArrived {
                generation,
                payload,
            } => self.on_annotation(generation, &payload),
            SyncEvent::FocusChanged { surface, focused } => self.on_focus(surface, focused),
            SyncEvent::ActiveSentenceChanged { index } => self.on_active_sentence(index),
            SyncEvent::WordClicked {
                sentence_index,
                word_index,
            } => self.on_word_clicked(sentence_index, word_index),
            SyncEvent::Clear => self.on_clear(),
        }
    }

    fn on_raw_changed(&mut self, text: String) -> Vec<SyncEffect> {
        if self.suppress_raw {
            // Echo of our own write; swallow exactly once.
            self.suppress_raw = false;
            self.raw_text = text;
            trace!("swallowed internal raw-surface change");
            return Vec::new();
        }

        self.raw_text = text;
        self.rendered_dirty = true;

        let annotated_before = self.document.sentence_count();
        let segments = segment::segment(&self.raw_text, self.delimiter);
        let raw_count = segments.len();

        if raw_count > annotated_before {
            for sentence in &segments[annotated_before..] {
                self.document.push_provisional(sentence);
            }
            trace!(
                "synthesized {} provisional sentence(s)",
                raw_count - annotated_before
            );
        }

        // The replace condition compares against the count as it stood when
        // this change arrived: growth synthesized above does not make the
        // document eligible until the next cycle.
        let mut effects = Vec::new();
        self.try_push_rendered(raw_count == annotated_before, &mut effects);
        effects
    }

    fn on_rendered_changed(&mut self, text: String) -> Vec<SyncEffect> {
        if self.suppress_rendered {
            self.suppress_rendered = false;
            self.rendered_text = text;
            trace!("swallowed internal rendered-surface change");
            return Vec::new();
        }

        // The rendered surface is editable too, but organic edits there never
        // touch the canonical document: the raw text stays the authority on
        // sentence counts, and sentences typed ahead of annotation are
        // carried into the next push transiently instead.
        self.rendered_text = text;
        self.rendered_dirty = true;

        let mut effects = Vec::new();
        self.try_push_rendered(self.counts_equal(), &mut effects);
        effects
    }

    fn on_annotation(
        &mut self,
        generation: RequestGeneration,
        payload: &serde_json::Value,
    ) -> Vec<SyncEffect> {
        if generation.0 != self.generation {
            debug!(
                "discarding stale annotation result (generation {}, current {})",
                generation.0, self.generation
            );
            return Vec::new();
        }

        let result = match AnnotationResult::from_value(payload) {
            Ok(result) => result,
            Err(err) => {
                // Degrade to raw-text-only mode; editing stays functional.
                debug!("ignoring annotation payload: {err}");
                return Vec::new();
            }
        };

        // The payload is the complete new document; sentences the annotator
        // has not reached yet are re-synthesized from the raw text, so
        // deletions on the raw surface shrink the document here instead of
        // pinning the sentence counts apart forever.
        self.document.apply_authoritative(result.into_sentences());
        let annotated = self.document.sentence_count();
        for sentence in segment::segment(&self.raw_text, self.delimiter)
            .iter()
            .skip(annotated)
        {
            self.document.push_provisional(sentence);
        }
        self.rendered_dirty = true;
        self.raw_dirty = true;

        let mut effects = Vec::new();
        let counts_equal = self.counts_equal();
        self.try_push_rendered(counts_equal, &mut effects);
        self.try_push_raw(counts_equal, &mut effects);
        effects
    }

    fn on_focus(&mut self, surface: Surface, focused: bool) -> Vec<SyncEffect> {
        if focused {
            self.focus = match surface {
                Surface::Raw => FocusState::RawFocused,
                Surface::Rendered => FocusState::RenderedFocused,
            };
        } else if self.focus.is_focused(surface) {
            self.focus = FocusState::Neither;
        }

        // A blur may release a deferred update; the dirty flags guarantee it
        // is applied exactly once.
        let mut effects = Vec::new();
        let counts_equal = self.counts_equal();
        self.try_push_rendered(counts_equal, &mut effects);
        self.try_push_raw(counts_equal, &mut effects);
        effects
    }

    fn on_active_sentence(&mut self, index: i64) -> Vec<SyncEffect> {
        let new = if index >= 1 { Some(index as usize) } else { None };
        if new == self.active_sentence {
            return Vec::new();
        }
        self.active_sentence = new;
        self.rendered_dirty = true;

        let mut effects = Vec::new();
        self.try_push_rendered(self.counts_equal(), &mut effects);
        effects
    }

    fn on_word_clicked(&mut self, sentence_index: usize, word_index: usize) -> Vec<SyncEffect> {
        // Resolved against the canonical document at event time; clicks on
        // nodes that no longer exist are ignored.
        let Some(word) = self.document.word(sentence_index, word_index) else {
            return Vec::new();
        };
        let Some(sentence) = self.document.sentence(sentence_index) else {
            return Vec::new();
        };

        vec![SyncEffect::ShowSynonyms(SynonymRequest {
            synonyms: word.synonyms.clone(),
            sentence_index,
            word_index,
            sentence_text: sentence.joined_text(),
        })]
    }

    fn on_clear(&mut self) -> Vec<SyncEffect> {
        debug!("clearing document");
        self.document.clear();
        self.raw_text.clear();
        self.rendered_text.clear();
        self.active_sentence = None;
        self.rendered_dirty = false;
        self.raw_dirty = false;

        // Both writes are internal: the clear must never be treated as
        // organic typing, so the echoed notifications are swallowed and no
        // provisional synthesis runs.
        self.suppress_raw = true;
        self.suppress_rendered = true;
        vec![
            SyncEffect::SetRawContent(String::new()),
            SyncEffect::SetRenderedContent(RenderDoc::default()),
        ]
    }

    fn counts_equal(&self) -> bool {
        segment::sentence_count(&self.raw_text, self.delimiter) == self.document.sentence_count()
    }

    fn try_push_rendered(&mut self, counts_equal: bool, effects: &mut Vec<SyncEffect>) {
        if !self.rendered_dirty {
            return;
        }
        if !counts_equal {
            debug!("deferring rendered-surface push: sentence counts differ");
            return;
        }
        if self.focus.is_focused(Surface::Rendered) {
            debug!("deferring rendered-surface push: surface is focused");
            return;
        }

        self.rendered_dirty = false;
        self.suppress_rendered = true;

        // Sentences typed into the rendered surface past the document's end
        // display transiently until annotation covers them.
        let segments = segment::segment(&self.rendered_text, self.delimiter);
        let transient: &[&str] = if segments.len() > self.document.sentence_count() {
            &segments[self.document.sentence_count()..]
        } else {
            &[]
        };
        effects.push(SyncEffect::SetRenderedContent(render::render_with_transient(
            &self.document,
            self.active_sentence,
            transient,
        )));
    }

    fn try_push_raw(&mut self, counts_equal: bool, effects: &mut Vec<SyncEffect>) {
        if !self.raw_dirty {
            return;
        }
        if !counts_equal {
            debug!("deferring raw-surface push: sentence counts differ");
            return;
        }
        if self.focus.is_focused(Surface::Raw) {
            debug!("deferring raw-surface push: surface is focused");
            return;
        }

        self.raw_dirty = false;
        self.suppress_raw = true;
        let text = self.document.plain_text();
        self.raw_text = text.clone();
        effects.push(SyncEffect::SetRawContent(text));
    }
}
