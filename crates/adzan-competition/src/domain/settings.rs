//! Tunable competition constants.

use std::time::Duration;

use adzan_core::error::DomainError;

use super::question_bank::BANK_SIZE;

/// Default pause between an answer and the next question.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(1500);

/// Default period of the elapsed-time tick.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

/// Per-game configuration. Hosts may override the defaults for testing or
/// accessibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompetitionSettings {
    /// Questions each player answers per game.
    pub question_count: usize,
    /// Delay before a track advances after an answer.
    pub settle_delay: Duration,
    /// Period of the elapsed-time counter.
    pub tick_period: Duration,
}

impl Default for CompetitionSettings {
    fn default() -> Self {
        Self {
            question_count: BANK_SIZE,
            settle_delay: DEFAULT_SETTLE_DELAY,
            tick_period: DEFAULT_TICK_PERIOD,
        }
    }
}

impl CompetitionSettings {
    /// Checks the settings against the banks they will be used with.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the question count is zero or
    /// larger than `bank_len`, or the tick period is zero.
    pub fn validate(&self, bank_len: usize) -> Result<(), DomainError> {
        if self.question_count == 0 || self.question_count > bank_len {
            return Err(DomainError::Validation(format!(
                "question_count must be between 1 and {bank_len}, got {}",
                self.question_count
            )));
        }
        if self.tick_period.is_zero() {
            return Err(DomainError::Validation(
                "tick_period must be greater than zero".to_owned(),
            ));
        }
        Ok(())
    }
}
