//! Player identity and game outcome.

use adzan_core::error::{DomainError, IgnoredReason};
use serde::{Deserialize, Serialize};

/// One of the two competing players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    /// Player 1.
    One,
    /// Player 2.
    Two,
}

impl PlayerId {
    /// Both players, in display order.
    pub const ALL: [Self; 2] = [Self::One, Self::Two];

    /// Zero-based slot used to address per-player arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    /// The number shown to users (1 or 2).
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(DomainError::IgnoredInput(IgnoredReason::UnknownPlayer(other))),
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player {}", self.number())
    }
}

/// Final result of a competition, derived purely from the two scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Player 1 has the strictly higher score.
    PlayerOneWins,
    /// Player 2 has the strictly higher score.
    PlayerTwoWins,
    /// Equal scores. Speed is not a tiebreaker.
    Tie,
}

impl Outcome {
    /// Compares final scores.
    #[must_use]
    pub fn from_scores(player_one: usize, player_two: usize) -> Self {
        match player_one.cmp(&player_two) {
            std::cmp::Ordering::Greater => Self::PlayerOneWins,
            std::cmp::Ordering::Less => Self::PlayerTwoWins,
            std::cmp::Ordering::Equal => Self::Tie,
        }
    }

    /// The winning player, if any.
    #[must_use]
    pub const fn winner(self) -> Option<PlayerId> {
        match self {
            Self::PlayerOneWins => Some(PlayerId::One),
            Self::PlayerTwoWins => Some(PlayerId::Two),
            Self::Tie => None,
        }
    }
}
