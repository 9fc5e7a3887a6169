//! Domain events for the Competition context.

use adzan_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::player::{Outcome, PlayerId};
use super::timer::ElapsedTime;
use super::track::AnswerOutcome;

/// Emitted when a game starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionStarted {
    /// Identifier of the new game.
    pub game_id: Uuid,
    /// Generation that deferred work for this game must carry.
    pub generation: u64,
    /// Questions per track.
    pub question_count: usize,
}

/// Emitted when a player's answer has been graded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmitted {
    /// The answering player.
    pub player: PlayerId,
    /// Grading result.
    pub outcome: AnswerOutcome,
}

/// Emitted when a track moves past an answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackAdvanced {
    /// The advancing player.
    pub player: PlayerId,
    /// Index of the question now shown (equals the count when exhausted).
    pub current_index: usize,
    /// Whether the track has no questions left.
    pub exhausted: bool,
}

/// Emitted once per timer period while a game is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerTicked {
    /// Time since the game started.
    pub elapsed: ElapsedTime,
}

/// Emitted exactly once per game, when both tracks are exhausted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionEnded {
    /// Who won.
    pub outcome: Outcome,
    /// Final score of player 1.
    pub player_one_score: usize,
    /// Final score of player 2.
    pub player_two_score: usize,
    /// Time the game took.
    pub elapsed: ElapsedTime,
}

/// Emitted when the competition is reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionReset {
    /// Generation in force after the reset.
    pub generation: u64,
    /// Whether a game was interrupted.
    pub interrupted: bool,
}

/// Event type identifier for [`CompetitionStarted`].
pub const COMPETITION_STARTED_EVENT_TYPE: &str = "competition.started";

/// Event type identifier for [`AnswerSubmitted`].
pub const ANSWER_SUBMITTED_EVENT_TYPE: &str = "competition.answer_submitted";

/// Event type identifier for [`TrackAdvanced`].
pub const TRACK_ADVANCED_EVENT_TYPE: &str = "competition.track_advanced";

/// Event type identifier for [`TimerTicked`].
pub const TIMER_TICKED_EVENT_TYPE: &str = "competition.timer_ticked";

/// Event type identifier for [`CompetitionEnded`].
pub const COMPETITION_ENDED_EVENT_TYPE: &str = "competition.ended";

/// Event type identifier for [`CompetitionReset`].
pub const COMPETITION_RESET_EVENT_TYPE: &str = "competition.reset";

/// Event payload variants for the Competition context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompetitionEventKind {
    /// A game has started.
    CompetitionStarted(CompetitionStarted),
    /// An answer has been graded.
    AnswerSubmitted(AnswerSubmitted),
    /// A track has moved on.
    TrackAdvanced(TrackAdvanced),
    /// The timer has ticked.
    TimerTicked(TimerTicked),
    /// Both tracks finished.
    CompetitionEnded(CompetitionEnded),
    /// The competition was reset.
    CompetitionReset(CompetitionReset),
}

impl CompetitionEventKind {
    /// The event type identifier for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::CompetitionStarted(_) => COMPETITION_STARTED_EVENT_TYPE,
            Self::AnswerSubmitted(_) => ANSWER_SUBMITTED_EVENT_TYPE,
            Self::TrackAdvanced(_) => TRACK_ADVANCED_EVENT_TYPE,
            Self::TimerTicked(_) => TIMER_TICKED_EVENT_TYPE,
            Self::CompetitionEnded(_) => COMPETITION_ENDED_EVENT_TYPE,
            Self::CompetitionReset(_) => COMPETITION_RESET_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the Competition context.
#[derive(Debug, Clone)]
pub struct CompetitionEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: CompetitionEventKind,
}

impl DomainEvent for CompetitionEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("CompetitionEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
