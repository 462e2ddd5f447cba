//! Error types for statistics and quiz grading.
//!
//! Defined here so callers can match on the exact failure instead of
//! string-matching an `anyhow` chain. All computations are synchronous
//! and local; errors surface immediately to the caller.

use thiserror::Error;

/// Errors from the descriptive statistics and progress helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// A statistic was requested over zero observations.
    #[error("empty input: at least one observation is required")]
    EmptyInput,

    /// The input contained a NaN or infinite value.
    #[error("non-finite value at index {0}")]
    NonFinite(usize),

    /// A percentage was requested for a zero total.
    #[error("percentage is undefined when the total count is zero")]
    DivisionUndefined,
}

/// Errors from grading a quiz response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// A field has no selection (still at its placeholder).
    #[error("no selection for field `{0}`")]
    IncompleteSelection(String),

    /// The response names a field the quiz does not have.
    #[error("unknown field `{0}`")]
    UnknownField(String),

    /// The selected value is not one of the field's options.
    #[error("`{selected}` is not an option for field `{field}`")]
    UnknownOption { field: String, selected: String },
}

impl QuizError {
    /// Returns `true` if the response is merely incomplete, as opposed to
    /// referencing fields or options that do not exist.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, QuizError::IncompleteSelection(_))
    }
}
