//! The error hierarchy for the aligner.
//!
//! Mirrors the error kinds a caller of the original `ssw_align`/`ssw_init`
//! interface would see as a `NULL` return plus a logged message, but as a
//! proper `Result` instead of a nullable pointer.

use thiserror::Error;

/// An error produced by [`Aligner::init`] or [`Aligner::align`].
///
/// [`Aligner::init`]: crate::aligner::Aligner::init
/// [`Aligner::align`]: crate::aligner::Aligner::align
#[derive(Debug, Error)]
pub enum AlignError {
    /// `align` was called before `init`.
    #[error("align() called before init()")]
    NotInitialized,

    /// `init` was asked to build only a byte profile, but the query/matrix
    /// combination requires a word profile (or vice versa at `align` time).
    #[error("score_size {requested:?} insufficient to satisfy the alignment: {reason}")]
    InsufficientScoreWidth {
        /// The score width that was configured at `init` time.
        requested: crate::matrix::ScoreWidth,
        /// Human-readable explanation.
        reason:    &'static str,
    },

    /// The byte kernel's score reached 255 and no word profile was built.
    #[error("byte kernel saturated at 255 and no word profile is available; re-run init with ScoreWidth::Word or ScoreWidth::Both")]
    Saturated,

    /// The forward and reverse passes disagreed on the best score, or the
    /// banded traceback reached an undefined back-pointer state.
    #[error("internal inconsistency: {0}")]
    InternalInconsistency(String),
}
