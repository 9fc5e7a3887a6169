//! Per-player track state machine.

use adzan_core::error::{DomainError, IgnoredReason};
use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::question_bank::{OPTION_COUNT, Question};

/// Lifecycle of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackPhase {
    /// No game has been begun since creation or the last reset.
    NotStarted,
    /// Questions remain.
    InProgress,
    /// Every question has been answered and settled.
    Exhausted,
}

/// Result of grading one submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    /// Position of the question within the track's order.
    pub question_index: usize,
    /// Option the player picked.
    pub choice: usize,
    /// Option that was correct, so a wrong answer can reveal it.
    pub correct_index: usize,
    /// Whether `choice == correct_index`.
    pub correct: bool,
    /// Score after grading.
    pub score: usize,
}

/// One player's progress through a shuffled question sequence.
///
/// `score <= current_index <= order.len()` holds whenever no answer is
/// pending; while one is pending, the score may already include it.
#[derive(Debug, Clone)]
pub struct Track {
    player: PlayerId,
    phase: TrackPhase,
    score: usize,
    current_index: usize,
    order: Vec<Question>,
    pending: Option<AnswerOutcome>,
}

impl Track {
    /// Creates an idle track.
    #[must_use]
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            phase: TrackPhase::NotStarted,
            score: 0,
            current_index: 0,
            order: Vec::new(),
            pending: None,
        }
    }

    /// Starts the track on `order`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidState` if the track is already in
    /// progress, and `DomainError::Validation` if `order` is empty.
    pub fn begin(&mut self, order: Vec<Question>) -> Result<(), DomainError> {
        if self.phase == TrackPhase::InProgress {
            return Err(DomainError::InvalidState(format!(
                "track for {} is already in progress",
                self.player
            )));
        }
        if order.is_empty() {
            return Err(DomainError::Validation(
                "a track needs at least one question".to_owned(),
            ));
        }
        self.phase = TrackPhase::InProgress;
        self.score = 0;
        self.current_index = 0;
        self.order = order;
        self.pending = None;
        Ok(())
    }

    /// The question currently shown.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::OutOfRange` once the track is exhausted (or
    /// before it has begun).
    pub fn current_question(&self) -> Result<&Question, DomainError> {
        self.order
            .get(self.current_index)
            .ok_or(DomainError::OutOfRange {
                index: self.current_index,
                len: self.order.len(),
            })
    }

    /// Grades `choice` against the current question without advancing.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IgnoredInput` when the track is not in progress,
    /// an answer is already pending, or `choice` is not a valid option.
    pub fn submit_answer(&mut self, choice: usize) -> Result<AnswerOutcome, DomainError> {
        match self.phase {
            TrackPhase::InProgress => {}
            TrackPhase::NotStarted => {
                return Err(DomainError::IgnoredInput(IgnoredReason::Inactive));
            }
            TrackPhase::Exhausted => {
                return Err(DomainError::IgnoredInput(IgnoredReason::TrackExhausted));
            }
        }
        if self.pending.is_some() {
            return Err(DomainError::IgnoredInput(IgnoredReason::AnswerPending));
        }
        if choice >= OPTION_COUNT {
            return Err(DomainError::IgnoredInput(IgnoredReason::ChoiceOutOfRange(
                choice,
            )));
        }

        let correct_index = self.current_question()?.correct_index();
        let correct = choice == correct_index;
        if correct {
            self.score += 1;
        }
        let outcome = AnswerOutcome {
            question_index: self.current_index,
            choice,
            correct_index,
            correct,
            score: self.score,
        };
        self.pending = Some(outcome);
        Ok(outcome)
    }

    /// Moves past the answered question. Called once the settle delay is over.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IgnoredInput` if no answer is pending.
    pub fn advance(&mut self) -> Result<TrackPhase, DomainError> {
        if self.pending.take().is_none() {
            return Err(DomainError::IgnoredInput(IgnoredReason::NoPendingAnswer));
        }
        self.current_index += 1;
        if self.current_index >= self.order.len() {
            self.phase = TrackPhase::Exhausted;
        }
        Ok(self.phase)
    }

    /// Returns the track to its idle, zeroed shape.
    pub fn reset(&mut self) {
        *self = Self::new(self.player);
    }

    /// The owning player.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> TrackPhase {
        self.phase
    }

    /// Correct answers so far.
    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    /// Position of the question currently shown.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Number of questions in this game's order.
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.order.len()
    }

    /// The shuffled order for this game.
    #[must_use]
    pub fn order(&self) -> &[Question] {
        &self.order
    }

    /// The graded answer awaiting its settle delay, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&AnswerOutcome> {
        self.pending.as_ref()
    }

    /// `true` once every question has been settled.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.phase == TrackPhase::Exhausted
    }

    /// Score as shown beside the climber, e.g. `"7 / 20"`.
    #[must_use]
    pub fn score_display(&self) -> String {
        format!("{} / {}", self.score, self.order.len())
    }

    /// Climber height: share of questions answered correctly, in percent.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_percent(&self) -> f64 {
        if self.order.is_empty() {
            return 0.0;
        }
        self.score as f64 / self.order.len() as f64 * 100.0
    }
}
