//! Command handlers for the Competition context.
//!
//! The controller owns the single `Competition` aggregate and the handles of
//! the deferred work it schedules. Each handler executes one command against
//! the aggregate, arranges timers through the injected `Scheduler`, and
//! returns the events the command produced.

use adzan_core::aggregate::AggregateRoot;
use adzan_core::clock::Clock;
use adzan_core::command::Command;
use adzan_core::error::DomainError;
use adzan_core::rng::DeterministicRng;
use adzan_core::scheduler::{Scheduler, TaskHandle};
use tracing::{debug, info, instrument};

use crate::domain::aggregates::Competition;
use crate::domain::commands::{
    AdvanceTimer, CompleteSettleDelay, ResetCompetition, StartCompetition, SubmitAnswer,
};
use crate::domain::events::{CompetitionEvent, CompetitionEventKind};
use crate::domain::player::PlayerId;

/// Deferred work the competition asks the host to run later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledTask {
    /// A track's settle delay is over and it may advance.
    SettleElapsed {
        /// Track to advance.
        player: PlayerId,
        /// Game the delay belongs to.
        generation: u64,
    },
    /// One timer period has passed.
    TimerTick {
        /// Game the timer belongs to.
        generation: u64,
    },
}

impl ScheduledTask {
    /// Game generation this task was scheduled under.
    #[must_use]
    pub fn generation(&self) -> u64 {
        match self {
            Self::SettleElapsed { generation, .. } | Self::TimerTick { generation } => *generation,
        }
    }
}

/// Events produced by one handled command.
#[derive(Debug, Default)]
pub struct CompetitionCommandResult {
    /// Newly recorded events, oldest first.
    pub events: Vec<CompetitionEvent>,
}

impl CompetitionCommandResult {
    /// Whether this command ended the game.
    #[must_use]
    pub fn ended(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event.kind, CompetitionEventKind::CompetitionEnded(_)))
    }
}

/// Drives the competition aggregate and its timers.
#[derive(Debug)]
pub struct CompetitionController {
    competition: Competition,
    timer: Option<TaskHandle>,
    settles: [Option<TaskHandle>; 2],
}

impl CompetitionController {
    /// Wraps an idle competition.
    #[must_use]
    pub fn new(competition: Competition) -> Self {
        Self {
            competition,
            timer: None,
            settles: [None, None],
        }
    }

    /// The aggregate, for queries.
    #[must_use]
    pub fn competition(&self) -> &Competition {
        &self.competition
    }

    /// Handle of the running elapsed-time timer, if any.
    #[must_use]
    pub fn timer_handle(&self) -> Option<TaskHandle> {
        self.timer
    }

    /// Handles `StartCompetition`: shuffles fresh tracks and starts the timer.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidState` if a game is already running.
    #[instrument(skip_all, fields(correlation_id = %command.correlation_id))]
    pub fn handle_start(
        &mut self,
        command: &StartCompetition,
        clock: &dyn Clock,
        rng: &mut dyn DeterministicRng,
        scheduler: &mut dyn Scheduler<ScheduledTask>,
    ) -> Result<CompetitionCommandResult, DomainError> {
        info!(command = command.command_type(), "handling start command");

        let generation = self.competition.start(command.correlation_id, clock, rng)?;

        self.cancel_settles(scheduler);
        if let Some(old) = self.timer.take() {
            scheduler.cancel(old);
        }
        let period = self.competition.settings().tick_period;
        let handle = scheduler.schedule_repeating(period, ScheduledTask::TimerTick { generation });
        self.timer = Some(handle);

        Ok(self.drain())
    }

    /// Handles `SubmitAnswer`: grades it and schedules the settle delay.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IgnoredInput` when the answer cannot be taken.
    #[instrument(skip_all, fields(correlation_id = %command.correlation_id, player = %command.player))]
    pub fn handle_submit_answer(
        &mut self,
        command: &SubmitAnswer,
        clock: &dyn Clock,
        scheduler: &mut dyn Scheduler<ScheduledTask>,
    ) -> Result<CompetitionCommandResult, DomainError> {
        let outcome = self.competition.submit_answer(
            command.player,
            command.choice,
            command.correlation_id,
            clock,
        )?;
        info!(
            choice = command.choice,
            correct = outcome.correct,
            score = outcome.score,
            "answer graded"
        );

        let delay = self.competition.settings().settle_delay;
        let task = ScheduledTask::SettleElapsed {
            player: command.player,
            generation: self.competition.generation(),
        };
        self.settles[command.player.index()] = Some(scheduler.schedule_once(delay, task));

        Ok(self.drain())
    }

    /// Handles `CompleteSettleDelay`: advances the track and, if the game is
    /// over, stops the timer.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IgnoredInput` for stale or unexpected deliveries.
    #[instrument(skip_all, fields(correlation_id = %command.correlation_id, player = %command.player))]
    pub fn handle_settle_elapsed(
        &mut self,
        command: &CompleteSettleDelay,
        clock: &dyn Clock,
        scheduler: &mut dyn Scheduler<ScheduledTask>,
    ) -> Result<CompetitionCommandResult, DomainError> {
        if command.generation == self.competition.generation() {
            self.settles[command.player.index()] = None;
        }
        let phase = self.competition.advance_track(
            command.player,
            command.generation,
            command.correlation_id,
            clock,
        )?;
        debug!(?phase, "track advanced");

        let result = self.drain();
        if result.ended() {
            info!(outcome = ?self.competition.outcome(), "competition ended");
            self.stop_timer(scheduler);
        }
        Ok(result)
    }

    /// Handles `AdvanceTimer`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IgnoredInput` for ticks from a finished or
    /// replaced game.
    pub fn handle_timer_tick(
        &mut self,
        command: &AdvanceTimer,
        clock: &dyn Clock,
    ) -> Result<CompetitionCommandResult, DomainError> {
        self.competition
            .tick(command.generation, command.correlation_id, clock)?;
        Ok(self.drain())
    }

    /// Handles `ResetCompetition`: clears the game and cancels every
    /// outstanding timer. Never fails.
    #[instrument(skip_all, fields(correlation_id = %command.correlation_id))]
    pub fn handle_reset(
        &mut self,
        command: &ResetCompetition,
        clock: &dyn Clock,
        scheduler: &mut dyn Scheduler<ScheduledTask>,
    ) -> CompetitionCommandResult {
        info!(command = command.command_type(), "handling reset command");

        self.competition.reset(command.correlation_id, clock);
        self.stop_timer(scheduler);
        self.cancel_settles(scheduler);

        self.drain()
    }

    fn stop_timer(&mut self, scheduler: &mut dyn Scheduler<ScheduledTask>) {
        if let Some(handle) = self.timer.take() {
            scheduler.cancel(handle);
        }
    }

    fn cancel_settles(&mut self, scheduler: &mut dyn Scheduler<ScheduledTask>) {
        for slot in &mut self.settles {
            if let Some(handle) = slot.take() {
                scheduler.cancel(handle);
            }
        }
    }

    fn drain(&mut self) -> CompetitionCommandResult {
        CompetitionCommandResult {
            events: self.competition.take_uncommitted_events(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use adzan_core::error::IgnoredReason;
    use adzan_test_support::{FixedClock, ManualScheduler, MockRng};
    use uuid::Uuid;

    use super::*;
    use crate::domain::player::Outcome;
    use crate::domain::question_bank::{BANK_SIZE, OPTION_COUNT};

    struct Harness {
        controller: CompetitionController,
        clock: FixedClock,
        scheduler: ManualScheduler<ScheduledTask>,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                controller: CompetitionController::new(Competition::with_default_banks()),
                clock: FixedClock::default_instant(),
                scheduler: ManualScheduler::new(),
            }
        }

        fn start(&mut self) -> CompetitionCommandResult {
            self.controller
                .handle_start(
                    &StartCompetition {
                        correlation_id: Uuid::new_v4(),
                    },
                    &self.clock,
                    &mut MockRng,
                    &mut self.scheduler,
                )
                .unwrap()
        }

        fn submit(
            &mut self,
            player: PlayerId,
            choice: usize,
        ) -> Result<CompetitionCommandResult, DomainError> {
            self.controller.handle_submit_answer(
                &SubmitAnswer {
                    correlation_id: Uuid::new_v4(),
                    player,
                    choice,
                },
                &self.clock,
                &mut self.scheduler,
            )
        }

        fn choice(&self, player: PlayerId, correct: bool) -> usize {
            let correct_index = self
                .controller
                .competition()
                .track(player)
                .current_question()
                .unwrap()
                .correct_index();
            if correct {
                correct_index
            } else {
                (correct_index + 1) % OPTION_COUNT
            }
        }

        /// Delivers every pending one-shot task, as if the settle delay passed.
        fn fire_settles(&mut self) -> Vec<Result<CompetitionCommandResult, DomainError>> {
            self.scheduler
                .take_one_shots()
                .into_iter()
                .map(|task| match task {
                    ScheduledTask::SettleElapsed { player, generation } => {
                        self.controller.handle_settle_elapsed(
                            &CompleteSettleDelay {
                                correlation_id: Uuid::new_v4(),
                                player,
                                generation,
                            },
                            &self.clock,
                            &mut self.scheduler,
                        )
                    }
                    ScheduledTask::TimerTick { .. } => panic!("timer ticks are repeating"),
                })
                .collect()
        }

        fn reset(&mut self) -> CompetitionCommandResult {
            self.controller.handle_reset(
                &ResetCompetition {
                    correlation_id: Uuid::new_v4(),
                },
                &self.clock,
                &mut self.scheduler,
            )
        }
    }

    #[test]
    fn test_start_schedules_one_repeating_timer() {
        // Arrange
        let mut harness = Harness::new();

        // Act
        let result = harness.start();

        // Assert
        assert_eq!(result.events.len(), 1);
        let repeating = harness.scheduler.active_repeating();
        assert_eq!(repeating.len(), 1);
        assert_eq!(repeating[0].delay, Duration::from_secs(1));
        assert_eq!(repeating[0].task, ScheduledTask::TimerTick { generation: 1 });
        assert_eq!(harness.controller.timer_handle(), Some(repeating[0].handle));
    }

    #[test]
    fn test_answer_schedules_settle_delay_for_that_track() {
        let mut harness = Harness::new();
        harness.start();
        let choice = harness.choice(PlayerId::Two, true);

        let result = harness.submit(PlayerId::Two, choice).unwrap();

        assert_eq!(result.events.len(), 1);
        let pending = harness.scheduler.pending_one_shots();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].delay, Duration::from_millis(1500));
        assert_eq!(
            pending[0].task,
            ScheduledTask::SettleElapsed {
                player: PlayerId::Two,
                generation: 1,
            }
        );
    }

    #[test]
    fn test_answer_before_start_is_ignored_and_schedules_nothing() {
        let mut harness = Harness::new();

        let result = harness.submit(PlayerId::One, 0);

        assert!(matches!(
            result,
            Err(DomainError::IgnoredInput(IgnoredReason::Inactive))
        ));
        assert!(harness.scheduler.pending_one_shots().is_empty());
    }

    #[test]
    fn test_game_end_cancels_timer_exactly_once() {
        // Arrange
        let mut harness = Harness::new();
        harness.start();
        let timer = harness.controller.timer_handle().unwrap();

        // Act
        let mut ended = 0;
        for _ in 0..BANK_SIZE {
            for player in PlayerId::ALL {
                let choice = harness.choice(player, player == PlayerId::One);
                harness.submit(player, choice).unwrap();
            }
            for result in harness.fire_settles() {
                if result.unwrap().ended() {
                    ended += 1;
                }
            }
        }

        // Assert
        assert_eq!(ended, 1);
        assert_eq!(harness.scheduler.cancelled(), &[timer]);
        assert!(harness.scheduler.active_repeating().is_empty());
        assert!(harness.controller.timer_handle().is_none());
        assert_eq!(
            harness.controller.competition().outcome(),
            Some(Outcome::PlayerOneWins)
        );
    }

    #[test]
    fn test_reset_cancels_timer_and_pending_settles() {
        let mut harness = Harness::new();
        harness.start();
        let timer = harness.controller.timer_handle().unwrap();
        let choice = harness.choice(PlayerId::One, true);
        harness.submit(PlayerId::One, choice).unwrap();
        let settle = harness.scheduler.pending_one_shots()[0].handle;

        let result = harness.reset();

        assert_eq!(result.events.len(), 1);
        assert!(harness.scheduler.cancelled().contains(&timer));
        assert!(harness.scheduler.cancelled().contains(&settle));
        assert!(harness.scheduler.pending_one_shots().is_empty());
        assert!(harness.scheduler.active_repeating().is_empty());
    }

    #[test]
    fn test_reset_when_idle_cancels_nothing() {
        let mut harness = Harness::new();

        harness.reset();

        assert!(harness.scheduler.cancelled().is_empty());
    }

    #[test]
    fn test_settle_from_previous_game_is_stale() {
        // Arrange
        let mut harness = Harness::new();
        harness.start();
        let choice = harness.choice(PlayerId::One, true);
        harness.submit(PlayerId::One, choice).unwrap();
        let stale = CompleteSettleDelay {
            correlation_id: Uuid::new_v4(),
            player: PlayerId::One,
            generation: harness.controller.competition().generation(),
        };
        harness.reset();
        harness.start();

        // Act
        let result = harness.controller.handle_settle_elapsed(
            &stale,
            &harness.clock,
            &mut harness.scheduler,
        );

        // Assert
        assert!(matches!(
            result,
            Err(DomainError::IgnoredInput(IgnoredReason::StaleTask))
        ));
        let track = harness.controller.competition().track(PlayerId::One);
        assert_eq!(track.current_index(), 0);
        assert_eq!(track.score(), 0);
    }

    #[test]
    fn test_timer_tick_advances_elapsed_and_rejects_stale_generation() {
        let mut harness = Harness::new();
        harness.start();
        let generation = harness.controller.competition().generation();

        harness
            .controller
            .handle_timer_tick(
                &AdvanceTimer {
                    correlation_id: Uuid::new_v4(),
                    generation,
                },
                &harness.clock,
            )
            .unwrap();
        let stale = harness.controller.handle_timer_tick(
            &AdvanceTimer {
                correlation_id: Uuid::new_v4(),
                generation: generation - 1,
            },
            &harness.clock,
        );

        assert_eq!(harness.controller.competition().elapsed().as_secs(), 1);
        assert!(stale.unwrap_err().is_ignored());
    }

    #[test]
    fn test_start_while_running_keeps_existing_timer() {
        let mut harness = Harness::new();
        harness.start();
        let timer = harness.controller.timer_handle();

        let result = harness.controller.handle_start(
            &StartCompetition {
                correlation_id: Uuid::new_v4(),
            },
            &harness.clock,
            &mut MockRng,
            &mut harness.scheduler,
        );

        assert!(matches!(result, Err(DomainError::InvalidState(_))));
        assert_eq!(harness.controller.timer_handle(), timer);
        assert_eq!(harness.scheduler.active_repeating().len(), 1);
    }

    #[test]
    fn test_scheduled_task_reports_generation() {
        assert_eq!(ScheduledTask::TimerTick { generation: 4 }.generation(), 4);
        assert_eq!(
            ScheduledTask::SettleElapsed {
                player: PlayerId::Two,
                generation: 7,
            }
            .generation(),
            7
        );
    }
}
