//! Error taxonomy.
//!
//! Every failure in this crate is non-fatal and locally recovered: the worst
//! outcome is that the raw text stays editable with reduced or no decoration.
//! Nothing here should ever propagate to the hosting UI as a panic.

use thiserror::Error;

/// Errors surfaced by the synchronization core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// An external annotation payload failed shape validation and was
    /// discarded; the engine keeps running in raw-text-only mode.
    #[error("malformed annotation payload: {reason}")]
    MalformedAnnotation {
        /// What the validator found missing or mistyped.
        reason: String,
    },
}

impl SyncError {
    /// Convenience constructor for shape-validation failures.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedAnnotation {
            reason: reason.into(),
        }
    }
}
