//! Domain error types.

use thiserror::Error;

/// Why a piece of input was ignored.
///
/// Ignored input is never a failure for the widget: the host logs it and
/// carries on, the same way a disabled button simply does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    /// No game is running.
    Inactive,
    /// The current question already has a submitted answer.
    AnswerPending,
    /// The chosen option does not exist.
    ChoiceOutOfRange(usize),
    /// The track has no questions left.
    TrackExhausted,
    /// There is no submitted answer to settle.
    NoPendingAnswer,
    /// Deferred work scheduled for an earlier game.
    StaleTask,
    /// Player identity other than 1 or 2.
    UnknownPlayer(u8),
    /// A recitation is already playing.
    RecitationInProgress,
    /// The recitation being finished is not the one playing.
    NotPlaying,
}

impl std::fmt::Display for IgnoredReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inactive => f.write_str("no active game"),
            Self::AnswerPending => f.write_str("answer already submitted for this question"),
            Self::ChoiceOutOfRange(choice) => write!(f, "choice {choice} is out of range"),
            Self::TrackExhausted => f.write_str("track is exhausted"),
            Self::NoPendingAnswer => f.write_str("no pending answer to settle"),
            Self::StaleTask => f.write_str("deferred task belongs to an earlier game"),
            Self::UnknownPlayer(id) => write!(f, "unknown player {id}"),
            Self::RecitationInProgress => f.write_str("a recitation is already playing"),
            Self::NotPlaying => f.write_str("recitation is not playing"),
        }
    }
}

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An operation was invoked in a state that forbids it.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A position was read past the end of a sequence.
    #[error("index {index} out of range for length {len}")]
    OutOfRange {
        /// The requested position.
        index: usize,
        /// The sequence length.
        len: usize,
    },

    /// Input that is dropped as a silent no-op.
    #[error("ignored input: {0}")]
    IgnoredInput(IgnoredReason),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Returns `true` for input that should be dropped without complaint.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::IgnoredInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_ignored_input_is_ignored() {
        assert!(DomainError::IgnoredInput(IgnoredReason::Inactive).is_ignored());
        assert!(!DomainError::InvalidState("busy".into()).is_ignored());
        assert!(!DomainError::OutOfRange { index: 20, len: 20 }.is_ignored());
    }

    #[test]
    fn test_display_includes_reason() {
        let err = DomainError::IgnoredInput(IgnoredReason::ChoiceOutOfRange(7));
        assert_eq!(err.to_string(), "ignored input: choice 7 is out of range");
    }
}
