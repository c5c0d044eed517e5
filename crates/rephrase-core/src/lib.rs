#![warn(missing_docs)]
//! Rephrase Core - Headless Dual-Surface Annotation Sync Engine
//!
//! # Overview
//!
//! `rephrase-core` keeps a raw free-form text surface and a rendered,
//! richly-annotated mirror surface consistent over one logical document. It
//! does not render anything itself; the host provides two view adapters and
//! forwards their events, and the engine answers with rendering instructions
//! and decoration sets.
//!
//! # Core Features
//!
//! - **Segmentation**: locale-aware sentence splitting and word tokenization
//! - **Frozen Terms**: copy-on-write protected word/phrase sets with
//!   capability-gated toggling
//! - **Decorations**: pure, deterministic highlight computation (word-limit
//!   overflow, frozen terms, duplicate sentences, active sentence)
//! - **Sentence Tracking**: caret-to-sentence mapping, gated by surface focus
//! - **Synchronization**: a reducer that reconciles both surfaces without
//!   feedback loops, defers writes to the focused surface, synthesizes
//!   provisional content ahead of annotation, and discards stale results
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  SyncController (reducer, sole writer)      │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Render Tree & Decorations                  │  ← Rendering Data
//! ├─────────────────────────────────────────────┤
//! │  Sentence Tracker & Frozen Sets             │  ← Derived State
//! ├─────────────────────────────────────────────┤
//! │  Annotated Document (canonical model)       │  ← Document State
//! ├─────────────────────────────────────────────┤
//! │  Segmentation (sentences / words)           │  ← Text Analysis
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use rephrase_core::{SentenceDelimiter, SyncController, SyncEffect, SyncEvent};
//!
//! let mut controller = SyncController::new(SentenceDelimiter::Period);
//!
//! // The user types into the raw surface.
//! let effects = controller.apply(SyncEvent::RawTextChanged {
//!     text: "Hello world. Second one".to_string(),
//! });
//!
//! // Sentences ahead of annotation are synthesized provisionally.
//! assert_eq!(controller.document().sentence_count(), 2);
//!
//! // Carry out whatever the controller asked for.
//! for effect in effects {
//!     match effect {
//!         SyncEffect::SetRenderedContent(tree) => { /* re-render */ }
//!         SyncEffect::SetRawContent(text) => { /* rewrite raw surface */ }
//!         SyncEffect::ShowSynonyms(request) => { /* open picker */ }
//!     }
//! }
//! ```
//!
//! # Concurrency Model
//!
//! Single-threaded and event-driven: everything runs as a synchronous
//! reaction to a [`SyncEvent`]. The only race (an annotation result
//! arriving while the user is still typing) is resolved by the
//! [`RequestGeneration`] counter (stale results are dropped) and the
//! focus-gated replace condition (the focused surface is never overwritten).
//! No failure interrupts editing: the worst case is raw text with reduced or
//! no decoration.
//!
//! # Module Description
//!
//! - [`segment`] - sentence and word segmentation
//! - [`document`] - the canonical annotated document model
//! - [`freeze`] - frozen (protected) term sets
//! - [`decorations`] - derived highlight computation
//! - [`tracker`] - caret-to-sentence mapping
//! - [`annotation`] - external annotation payloads and validation
//! - [`render`] - render-tree production for the annotated surface
//! - [`sync`] - the synchronization controller

pub mod annotation;
pub mod decorations;
pub mod document;
pub mod error;
pub mod freeze;
pub mod render;
pub mod segment;
pub mod sync;
pub mod tracker;

pub use annotation::{AnnotatedWord, AnnotationResult, RequestGeneration};
pub use decorations::{
    Decoration, DecorationOptions, DecorationRange, HighlightClass, compute, compute_for_document,
};
pub use document::{AnnotatedDocument, PROVISIONAL_TAG, Sentence, Word};
pub use error::SyncError;
pub use freeze::{FreezeConfig, FreezeOutcome, FreezeSetManager, FrozenSet};
pub use render::{ColorClass, RenderDoc, SentenceNode, WordNode, render, render_with_transient};
pub use segment::{SentenceDelimiter, segment, sentence_count, tokenize_words};
pub use sync::{FocusState, Surface, SyncController, SyncEffect, SyncEvent, SynonymRequest};
pub use tracker::{
    NO_ACTIVE_SENTENCE, SelectionEvent, SentenceIndexTracker, TrackerState,
};
