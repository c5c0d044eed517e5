//! Caret-to-sentence mapping.
//!
//! The tracker derives the sentence containing the caret and notifies
//! subscribers when it reports. It is gated by an `enabled` flag tied to
//! which surface currently owns focus: only the surface *not* being edited
//! tracks the active sentence, so the surface the user is typing into is
//! never visually jumped around by its own keystrokes.

use crate::document::AnnotatedDocument;

/// Sentinel reported when the caret is in no sentence.
pub const NO_ACTIVE_SENTENCE: i64 = -1;

/// A selection event on a surface, in character offsets over the document
/// text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionEvent {
    /// The selection anchor offset.
    pub anchor: usize,
    /// The selection head (caret) offset.
    pub head: usize,
}

impl SelectionEvent {
    /// A collapsed selection (caret placement) at `offset`.
    pub fn caret(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
        }
    }

    /// Whether this is a caret placement rather than a range selection.
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }
}

/// Tracker lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    /// Disabled; selection events are ignored without walking the document.
    Idle,
    /// Enabled; every collapsed-selection event reports an index.
    Tracking,
}

/// Callback invoked with the one-based active-sentence index, or
/// [`NO_ACTIVE_SENTENCE`].
pub type ActiveSentenceCallback = Box<dyn FnMut(i64) + Send>;

/// Derives the active sentence from caret position, when enabled.
#[derive(Default)]
pub struct SentenceIndexTracker {
    enabled: bool,
    callbacks: Vec<ActiveSentenceCallback>,
}

impl SentenceIndexTracker {
    /// Create a tracker; starts Idle.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current lifecycle state.
    pub fn state(&self) -> TrackerState {
        if self.enabled {
            TrackerState::Tracking
        } else {
            TrackerState::Idle
        }
    }

    /// Enable or disable tracking.
    ///
    /// While disabled the tracker performs no document walk and emits
    /// nothing; re-enabling resumes on the next selection event.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Subscribe to active-sentence reports.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(i64) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Process a selection event against the document.
    ///
    /// Returns the reported index: the one-based sentence containing the
    /// caret, or [`NO_ACTIVE_SENTENCE`] if none encloses it. Returns `None`
    /// without reporting when disabled or when the selection is a range.
    pub fn on_selection(
        &mut self,
        doc: &AnnotatedDocument,
        event: SelectionEvent,
    ) -> Option<i64> {
        if !self.enabled {
            return None;
        }
        if !event.is_collapsed() {
            return None;
        }

        let index = enclosing_sentence(doc, event.head);
        for callback in &mut self.callbacks {
            callback(index);
        }
        Some(index)
    }
}

/// Walk the document's sentence spans for the one enclosing `offset`.
///
/// Boundaries are inclusive on both ends: a caret sitting exactly at a
/// sentence edge still belongs to that sentence. The first enclosing span in
/// document order wins.
fn enclosing_sentence(doc: &AnnotatedDocument, offset: usize) -> i64 {
    for (index, (start, end)) in doc.sentence_spans().into_iter().enumerate() {
        if offset >= start && offset <= end {
            return (index + 1) as i64;
        }
    }
    NO_ACTIVE_SENTENCE
}
