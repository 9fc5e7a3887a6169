//! Aggregate root for the Competition context.

use adzan_core::aggregate::AggregateRoot;
use adzan_core::clock::Clock;
use adzan_core::error::{DomainError, IgnoredReason};
use adzan_core::event::EventMetadata;
use adzan_core::rng::DeterministicRng;
use uuid::Uuid;

use super::events::{
    AnswerSubmitted, CompetitionEnded, CompetitionEvent, CompetitionEventKind, CompetitionReset,
    CompetitionStarted, TimerTicked, TrackAdvanced,
};
use super::player::{Outcome, PlayerId};
use super::question_bank::QuestionBanks;
use super::settings::CompetitionSettings;
use super::shuffle::shuffle;
use super::timer::ElapsedTime;
use super::track::{AnswerOutcome, Track, TrackPhase};

/// The aggregate root for the two-player competition.
///
/// One instance lives for the whole session; every `start` replaces the game
/// it holds. The `generation` counter identifies the current game so that
/// deferred work scheduled for an older one can be recognised and dropped.
#[derive(Debug)]
pub struct Competition {
    /// Identifier of the current (or last) game.
    id: Uuid,
    /// Number of events recorded.
    version: i64,
    generation: u64,
    banks: QuestionBanks,
    settings: CompetitionSettings,
    tracks: [Track; 2],
    elapsed: ElapsedTime,
    active: bool,
    outcome: Option<Outcome>,
    uncommitted_events: Vec<CompetitionEvent>,
}

impl Competition {
    /// Creates an idle competition over `banks`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `settings` do not fit the banks.
    pub fn new(banks: QuestionBanks, settings: CompetitionSettings) -> Result<Self, DomainError> {
        settings.validate(banks.min_len())?;
        Ok(Self::idle(banks, settings))
    }

    /// Creates an idle competition over the built-in banks with default
    /// settings.
    #[must_use]
    pub fn with_default_banks() -> Self {
        // Twenty questions per built-in bank always fit the default count.
        Self::idle(QuestionBanks::default(), CompetitionSettings::default())
    }

    fn idle(banks: QuestionBanks, settings: CompetitionSettings) -> Self {
        Self {
            id: Uuid::nil(),
            version: 0,
            generation: 0,
            banks,
            settings,
            tracks: [Track::new(PlayerId::One), Track::new(PlayerId::Two)],
            elapsed: ElapsedTime::ZERO,
            active: false,
            outcome: None,
            uncommitted_events: Vec::new(),
        }
    }

    /// Starts a fresh game, discarding whatever the previous one left behind.
    ///
    /// Each track gets its own shuffle of its own bank.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidState` while a game is active.
    pub fn start(
        &mut self,
        correlation_id: Uuid,
        clock: &dyn Clock,
        rng: &mut dyn DeterministicRng,
    ) -> Result<u64, DomainError> {
        if self.active {
            return Err(DomainError::InvalidState(
                "a competition is already in progress".to_owned(),
            ));
        }

        self.generation += 1;
        self.id = Uuid::new_v4();
        self.elapsed = ElapsedTime::ZERO;
        self.outcome = None;

        let count = self.settings.question_count;
        for track in &mut self.tracks {
            track.reset();
            let bank = self.banks.bank(track.player());
            let mut order = shuffle(bank.questions(), rng);
            order.truncate(count);
            track.begin(order)?;
        }
        self.active = true;

        self.record(
            CompetitionEventKind::CompetitionStarted(CompetitionStarted {
                game_id: self.id,
                generation: self.generation,
                question_count: count,
            }),
            correlation_id,
            clock,
        );
        Ok(self.generation)
    }

    /// Grades an answer for `player`'s current question.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IgnoredInput` when no game is active or the
    /// track rejects the submission.
    pub fn submit_answer(
        &mut self,
        player: PlayerId,
        choice: usize,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<AnswerOutcome, DomainError> {
        if !self.active {
            return Err(DomainError::IgnoredInput(IgnoredReason::Inactive));
        }

        let outcome = self.tracks[player.index()].submit_answer(choice)?;

        self.record(
            CompetitionEventKind::AnswerSubmitted(AnswerSubmitted { player, outcome }),
            correlation_id,
            clock,
        );
        Ok(outcome)
    }

    /// Advances `player`'s track after its settle delay, then re-checks the
    /// completion barrier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IgnoredInput` if `generation` is not the current
    /// game, the game is no longer active, or nothing is pending.
    pub fn advance_track(
        &mut self,
        player: PlayerId,
        generation: u64,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<TrackPhase, DomainError> {
        self.ensure_current(generation)?;

        let track = &mut self.tracks[player.index()];
        let phase = track.advance()?;
        let current_index = track.current_index();

        self.record(
            CompetitionEventKind::TrackAdvanced(TrackAdvanced {
                player,
                current_index,
                exhausted: phase == TrackPhase::Exhausted,
            }),
            correlation_id,
            clock,
        );

        self.check_completion(correlation_id, clock);
        Ok(phase)
    }

    /// Adds one second to the elapsed time.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IgnoredInput` for ticks from another game or
    /// after the game ended.
    pub fn tick(
        &mut self,
        generation: u64,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<ElapsedTime, DomainError> {
        self.ensure_current(generation)?;

        self.elapsed = self.elapsed.incremented();
        self.record(
            CompetitionEventKind::TimerTicked(TimerTicked {
                elapsed: self.elapsed,
            }),
            correlation_id,
            clock,
        );
        Ok(self.elapsed)
    }

    /// Abandons any game and clears both tracks. Safe to call at any time.
    pub fn reset(&mut self, correlation_id: Uuid, clock: &dyn Clock) {
        let interrupted = self.active;
        self.generation += 1;
        self.active = false;
        self.elapsed = ElapsedTime::ZERO;
        self.outcome = None;
        for track in &mut self.tracks {
            track.reset();
        }

        self.record(
            CompetitionEventKind::CompetitionReset(CompetitionReset {
                generation: self.generation,
                interrupted,
            }),
            correlation_id,
            clock,
        );
    }

    /// Ends the game if, and only if, this call is the one that finds both
    /// tracks exhausted while the game is still active.
    fn check_completion(&mut self, correlation_id: Uuid, clock: &dyn Clock) {
        if !self.active || !self.tracks.iter().all(Track::is_exhausted) {
            return;
        }

        self.active = false;
        let player_one_score = self.tracks[PlayerId::One.index()].score();
        let player_two_score = self.tracks[PlayerId::Two.index()].score();
        let outcome = Outcome::from_scores(player_one_score, player_two_score);
        self.outcome = Some(outcome);

        self.record(
            CompetitionEventKind::CompetitionEnded(CompetitionEnded {
                outcome,
                player_one_score,
                player_two_score,
                elapsed: self.elapsed,
            }),
            correlation_id,
            clock,
        );
    }

    fn ensure_current(&self, generation: u64) -> Result<(), DomainError> {
        if generation != self.generation || !self.active {
            return Err(DomainError::IgnoredInput(IgnoredReason::StaleTask));
        }
        Ok(())
    }

    /// Returns the next sequence number for a new event.
    fn next_sequence_number(&self) -> i64 {
        self.version + 1
    }

    fn record(&mut self, kind: CompetitionEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        let metadata = EventMetadata::new(
            kind.event_type(),
            self.id,
            self.next_sequence_number(),
            correlation_id,
            clock.now(),
        );
        self.version += 1;
        self.uncommitted_events
            .push(CompetitionEvent { metadata, kind });
    }

    /// Whether a game is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current game generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Time since the current game started.
    #[must_use]
    pub fn elapsed(&self) -> ElapsedTime {
        self.elapsed
    }

    /// The track for `player`.
    #[must_use]
    pub fn track(&self, player: PlayerId) -> &Track {
        &self.tracks[player.index()]
    }

    /// Result of the last finished game, cleared by `start` and `reset`.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// The settings this competition was built with.
    #[must_use]
    pub fn settings(&self) -> &CompetitionSettings {
        &self.settings
    }
}

impl AggregateRoot for Competition {
    type Event = CompetitionEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn take_uncommitted_events(&mut self) -> Vec<Self::Event> {
        std::mem::take(&mut self.uncommitted_events)
    }
}
