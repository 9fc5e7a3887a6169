//! Commands for the Competition context.

use adzan_core::command::Command;
use uuid::Uuid;

use super::player::PlayerId;

/// Command to start a fresh game.
#[derive(Debug, Clone)]
pub struct StartCompetition {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for StartCompetition {
    fn command_type(&self) -> &'static str {
        "competition.start"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command carrying a player's answer selection.
#[derive(Debug, Clone)]
pub struct SubmitAnswer {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The answering player.
    pub player: PlayerId,
    /// Zero-based option index.
    pub choice: usize,
}

impl Command for SubmitAnswer {
    fn command_type(&self) -> &'static str {
        "competition.submit_answer"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command delivered when a track's settle delay has elapsed.
#[derive(Debug, Clone)]
pub struct CompleteSettleDelay {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The track to advance.
    pub player: PlayerId,
    /// Game generation the delay was scheduled under.
    pub generation: u64,
}

impl Command for CompleteSettleDelay {
    fn command_type(&self) -> &'static str {
        "competition.complete_settle_delay"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command delivered on every timer period.
#[derive(Debug, Clone)]
pub struct AdvanceTimer {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Game generation the timer was started under.
    pub generation: u64,
}

impl Command for AdvanceTimer {
    fn command_type(&self) -> &'static str {
        "competition.advance_timer"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to abandon any game and return to the idle state.
#[derive(Debug, Clone)]
pub struct ResetCompetition {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for ResetCompetition {
    fn command_type(&self) -> &'static str {
        "competition.reset"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
