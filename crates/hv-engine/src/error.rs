//! Error types for the engine.

use thiserror::Error;

use crate::intent::IntentKind;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Contract violations and collaborator failures.
///
/// Player mistakes never show up here; they are narrated through an
/// [`InteractionResult`](crate::result::InteractionResult). An `EngineError`
/// means the caller broke a contract, and the turn stops where it occurred.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An engine received an intent of the wrong variant.
    #[error("intent mismatch: expected {expected}, found {found}")]
    IntentMismatch {
        /// The variant the engine handles.
        expected: IntentKind,
        /// The variant it was given.
        found: IntentKind,
    },

    /// A required noun was empty.
    #[error("intent is missing a required noun")]
    EmptyNoun,

    /// The narration client failed.
    #[error("narration failed: {0}")]
    Narration(String),

    /// World graph error.
    #[error("{0}")]
    Core(#[from] hv_core::CoreError),
}
