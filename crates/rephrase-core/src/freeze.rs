//! Frozen (protected) term sets.
//!
//! A frozen term is a word or phrase the system must never allow to be
//! paraphrased or altered. Terms are keyed by their lower-cased, trimmed
//! form; a term containing whitespace after normalization is a phrase,
//! anything else a single word.
//!
//! [`FrozenSet`] is a copy-on-write value: every toggle produces a new set
//! and never mutates in place, so a decoration pass holding a clone never
//! observes a half-updated set. The built-in protected terms load from an
//! embedded JSON configuration at first use.

use std::collections::BTreeSet;
use std::sync::{Arc, OnceLock};

use serde::Deserialize;

/// Normalize a term to its set key: trimmed and lower-cased.
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Whether a normalized term classifies as a phrase (contains whitespace).
pub fn is_phrase(normalized: &str) -> bool {
    normalized.chars().any(char::is_whitespace)
}

/// Declarative protected-terms configuration.
///
/// Loaded from JSON; the crate embeds a default under `assets/`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FreezeConfig {
    /// Protected single words.
    #[serde(default)]
    pub words: Vec<String>,
    /// Protected phrases.
    #[serde(default)]
    pub phrases: Vec<String>,
}

/// An immutable pair of frozen-term sets (single words and phrases).
///
/// Cloning is cheap: the underlying sets are shared until a toggle produces
/// a replacement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrozenSet {
    words: Arc<BTreeSet<String>>,
    phrases: Arc<BTreeSet<String>>,
}

impl FrozenSet {
    /// Create an empty set pair.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from configuration data, normalizing and classifying each
    /// entry by the whitespace rule regardless of which list it came from.
    pub fn from_config(config: &FreezeConfig) -> Self {
        let mut words = BTreeSet::new();
        let mut phrases = BTreeSet::new();
        for term in config.words.iter().chain(config.phrases.iter()) {
            let key = normalize_term(term);
            if key.is_empty() {
                continue;
            }
            if is_phrase(&key) {
                phrases.insert(key);
            } else {
                words.insert(key);
            }
        }
        Self {
            words: Arc::new(words),
            phrases: Arc::new(phrases),
        }
    }

    /// The built-in protected terms shipped with the crate.
    pub fn builtin() -> Self {
        static BUILTIN: OnceLock<FrozenSet> = OnceLock::new();
        BUILTIN
            .get_or_init(|| {
                let config: FreezeConfig =
                    serde_json::from_str(include_str!("../assets/protected_terms.json"))
                        .expect("embedded protected_terms.json is valid");
                Self::from_config(&config)
            })
            .clone()
    }

    /// The frozen single words, normalized, in sorted order.
    pub fn words(&self) -> &BTreeSet<String> {
        &self.words
    }

    /// The frozen phrases, normalized, in sorted order.
    pub fn phrases(&self) -> &BTreeSet<String> {
        &self.phrases
    }

    /// Pure membership check under the same normalization/classification rule
    /// as [`toggle`](Self::toggle).
    pub fn has(&self, term: &str) -> bool {
        let key = normalize_term(term);
        if is_phrase(&key) {
            self.phrases.contains(&key)
        } else {
            self.words.contains(&key)
        }
    }

    /// Return a new set with `term` added if absent, removed if present.
    ///
    /// Symmetric-difference semantics: toggling the same term twice yields a
    /// set equal to the original. `self` is left untouched.
    pub fn toggle(&self, term: &str) -> FrozenSet {
        let key = normalize_term(term);
        if key.is_empty() {
            return self.clone();
        }

        if is_phrase(&key) {
            let mut phrases = (*self.phrases).clone();
            if !phrases.remove(&key) {
                phrases.insert(key);
            }
            Self {
                words: Arc::clone(&self.words),
                phrases: Arc::new(phrases),
            }
        } else {
            let mut words = (*self.words).clone();
            if !words.remove(&key) {
                words.insert(key);
            }
            Self {
                words: Arc::new(words),
                phrases: Arc::clone(&self.phrases),
            }
        }
    }
}

/// The result of a freeze toggle request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FreezeOutcome {
    /// The toggle was applied; carries the updated set for the persistence
    /// collaborator.
    Applied(FrozenSet),
    /// The caller lacks the freeze capability; no state changed.
    Denied,
}

/// Owns the current [`FrozenSet`] and gates mutation on an externally
/// supplied capability flag.
///
/// How the capability is derived (plan gating, etc.) is not this crate's
/// concern; it arrives as a plain boolean.
#[derive(Debug, Clone, Default)]
pub struct FreezeSetManager {
    set: FrozenSet,
    can_freeze: bool,
}

impl FreezeSetManager {
    /// Create a manager over an initial set.
    pub fn new(set: FrozenSet, can_freeze: bool) -> Self {
        Self { set, can_freeze }
    }

    /// The current set. Cheap to clone into a decoration pass.
    pub fn set(&self) -> &FrozenSet {
        &self.set
    }

    /// Update the externally supplied freeze capability.
    pub fn set_capability(&mut self, can_freeze: bool) {
        self.can_freeze = can_freeze;
    }

    /// Membership check against the current set.
    pub fn has(&self, term: &str) -> bool {
        self.set.has(term)
    }

    /// Toggle `term`, replacing the current set on success.
    ///
    /// Returns [`FreezeOutcome::Denied`] without any state change when the
    /// capability flag is false.
    pub fn toggle(&mut self, term: &str) -> FreezeOutcome {
        if !self.can_freeze {
            return FreezeOutcome::Denied;
        }
        self.set = self.set.toggle(term);
        FreezeOutcome::Applied(self.set.clone())
    }
}
