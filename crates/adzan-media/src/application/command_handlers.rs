//! Command handlers for the Media context.
//!
//! The controller executes commands against the `AudioDeck`, drives the
//! `AudioOutput` to match the deck's new state, and keeps the backsound
//! preference in sync with the `PreferenceStore`.

use std::sync::Arc;

use adzan_core::aggregate::AggregateRoot;
use adzan_core::clock::Clock;
use adzan_core::error::DomainError;
use adzan_core::preferences::{BACKSOUND_ENABLED_KEY, PreferenceStore};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::application::output::{AudioOutput, PlaybackError};
use crate::domain::aggregates::AudioDeck;
use crate::domain::audio::Cue;
use crate::domain::commands::{FinishRecitation, PlayRecitation, ResumeBacksound, ToggleBacksound};
use crate::domain::events::MediaEvent;

/// Outcome of one handled media command.
#[derive(Debug)]
pub struct MediaCommandResult {
    /// Newly recorded events, oldest first.
    pub events: Vec<MediaEvent>,
    /// Playback failures to show the user. Informational only.
    pub notices: Vec<PlaybackError>,
    /// Whether the backsound preference reached the store. Always `true`
    /// for commands that do not write it.
    pub persisted: bool,
}

/// Owns the audio deck and the collaborators that make it audible.
pub struct MediaController {
    deck: AudioDeck,
    output: Arc<dyn AudioOutput>,
    preferences: Arc<dyn PreferenceStore>,
}

impl std::fmt::Debug for MediaController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaController")
            .field("deck", &self.deck)
            .finish_non_exhaustive()
    }
}

impl MediaController {
    /// Builds the controller, reading the backsound preference once.
    ///
    /// A missing value means enabled. An unreadable store is logged and
    /// also treated as enabled.
    #[must_use]
    pub fn load(output: Arc<dyn AudioOutput>, preferences: Arc<dyn PreferenceStore>) -> Self {
        let enabled = match preferences.get_bool(BACKSOUND_ENABLED_KEY) {
            Ok(value) => value.unwrap_or(true),
            Err(e) => {
                warn!(error = %e, "could not read backsound preference, defaulting to enabled");
                true
            }
        };
        debug!(backsound_enabled = enabled, "media preferences loaded");

        Self {
            deck: AudioDeck::new(Uuid::new_v4(), enabled),
            output,
            preferences,
        }
    }

    /// The deck, for queries.
    #[must_use]
    pub fn deck(&self) -> &AudioDeck {
        &self.deck
    }

    /// Handles `PlayRecitation`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IgnoredInput` while another recitation plays.
    #[instrument(skip_all, fields(correlation_id = %command.correlation_id, recitation = %command.recitation))]
    pub fn handle_play_recitation(
        &mut self,
        command: &PlayRecitation,
        clock: &dyn Clock,
    ) -> Result<MediaCommandResult, DomainError> {
        self.deck
            .play_recitation(command.recitation, command.correlation_id, clock)?;
        info!("recitation started");

        self.output.stop(Cue::Backsound);
        let notices = self.play(Cue::Recitation(command.recitation));
        Ok(self.drain(notices, true))
    }

    /// Handles `FinishRecitation`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IgnoredInput` if that recitation is not playing.
    #[instrument(skip_all, fields(correlation_id = %command.correlation_id, recitation = %command.recitation))]
    pub fn handle_finish_recitation(
        &mut self,
        command: &FinishRecitation,
        clock: &dyn Clock,
    ) -> Result<MediaCommandResult, DomainError> {
        let resumed =
            self.deck
                .finish_recitation(command.recitation, command.correlation_id, clock)?;
        info!(backsound_resumed = resumed, "recitation finished");

        let notices = if resumed {
            self.play(Cue::Backsound)
        } else {
            Vec::new()
        };
        Ok(self.drain(notices, true))
    }

    /// Handles `ToggleBacksound` and writes the new preference.
    #[instrument(skip_all, fields(correlation_id = %command.correlation_id))]
    pub fn handle_toggle_backsound(
        &mut self,
        command: &ToggleBacksound,
        clock: &dyn Clock,
    ) -> MediaCommandResult {
        let enabled = self.deck.toggle_backsound(command.correlation_id, clock);
        info!(backsound_enabled = enabled, "backsound toggled");

        let notices = if self.deck.backsound_playing() {
            self.play(Cue::Backsound)
        } else {
            self.output.stop(Cue::Backsound);
            Vec::new()
        };

        let persisted = match self.preferences.set_bool(BACKSOUND_ENABLED_KEY, enabled) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "could not store backsound preference");
                false
            }
        };
        self.drain(notices, persisted)
    }

    /// Handles `ResumeBacksound`, typically once at startup.
    pub fn handle_resume_backsound(
        &mut self,
        command: &ResumeBacksound,
        clock: &dyn Clock,
    ) -> MediaCommandResult {
        let notices = if self.deck.resume_backsound(command.correlation_id, clock) {
            self.play(Cue::Backsound)
        } else {
            Vec::new()
        };
        self.drain(notices, true)
    }

    /// Plays a short cue. Deck state is unaffected either way.
    pub fn play_cue(&self, cue: Cue) -> Option<PlaybackError> {
        self.play(cue).pop()
    }

    fn play(&self, cue: Cue) -> Vec<PlaybackError> {
        match self.output.play(cue) {
            Ok(()) => Vec::new(),
            Err(e) => {
                warn!(%cue, error = %e, "audio playback failed");
                vec![e]
            }
        }
    }

    fn drain(&mut self, notices: Vec<PlaybackError>, persisted: bool) -> MediaCommandResult {
        MediaCommandResult {
            events: self.deck.take_uncommitted_events(),
            notices,
            persisted,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use adzan_core::error::IgnoredReason;
    use adzan_test_support::{FailingPreferenceStore, FixedClock, InMemoryPreferenceStore};

    use super::*;
    use crate::domain::audio::Recitation;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Play(Cue),
        Stop(Cue),
    }

    #[derive(Default)]
    struct RecordingOutput {
        calls: Mutex<Vec<Call>>,
        fail_with: Option<PlaybackError>,
    }

    impl RecordingOutput {
        fn failing(error: PlaybackError) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_with: Some(error),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl AudioOutput for RecordingOutput {
        fn play(&self, cue: Cue) -> Result<(), PlaybackError> {
            self.calls.lock().unwrap().push(Call::Play(cue));
            match &self.fail_with {
                Some(error) => Err(error.clone()),
                None => Ok(()),
            }
        }

        fn stop(&self, cue: Cue) {
            self.calls.lock().unwrap().push(Call::Stop(cue));
        }
    }

    fn controller(
        output: &Arc<RecordingOutput>,
        preferences: &Arc<InMemoryPreferenceStore>,
    ) -> MediaController {
        MediaController::load(output.clone(), preferences.clone())
    }

    fn play(recitation: Recitation) -> PlayRecitation {
        PlayRecitation {
            correlation_id: Uuid::new_v4(),
            recitation,
        }
    }

    fn toggle() -> ToggleBacksound {
        ToggleBacksound {
            correlation_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_absent_preference_defaults_to_enabled() {
        let output = Arc::new(RecordingOutput::default());
        let preferences = Arc::new(InMemoryPreferenceStore::default());

        let controller = controller(&output, &preferences);

        assert!(controller.deck().backsound_enabled());
        assert!(preferences.writes().is_empty());
    }

    #[test]
    fn test_stored_preference_is_respected() {
        let output = Arc::new(RecordingOutput::default());
        let preferences = Arc::new(InMemoryPreferenceStore::with_entries(&[(
            BACKSOUND_ENABLED_KEY,
            false,
        )]));
        let clock = FixedClock::default_instant();
        let mut controller = controller(&output, &preferences);

        let result = controller.handle_resume_backsound(
            &ResumeBacksound {
                correlation_id: Uuid::new_v4(),
            },
            &clock,
        );

        assert!(!controller.deck().backsound_enabled());
        assert!(result.events.is_empty());
        assert!(output.calls().is_empty());
    }

    #[test]
    fn test_unreadable_store_defaults_to_enabled() {
        let output: Arc<dyn AudioOutput> = Arc::new(RecordingOutput::default());

        let controller = MediaController::load(output, Arc::new(FailingPreferenceStore));

        assert!(controller.deck().backsound_enabled());
    }

    #[test]
    fn test_play_recitation_stops_backsound_then_plays() {
        // Arrange
        let output = Arc::new(RecordingOutput::default());
        let preferences = Arc::new(InMemoryPreferenceStore::default());
        let clock = FixedClock::default_instant();
        let mut controller = controller(&output, &preferences);

        // Act
        let result = controller
            .handle_play_recitation(&play(Recitation::Adzan), &clock)
            .unwrap();

        // Assert
        assert_eq!(result.events.len(), 1);
        assert!(result.notices.is_empty());
        assert_eq!(
            output.calls(),
            vec![
                Call::Stop(Cue::Backsound),
                Call::Play(Cue::Recitation(Recitation::Adzan)),
            ]
        );
    }

    #[test]
    fn test_recitation_while_playing_is_ignored_without_output() {
        let output = Arc::new(RecordingOutput::default());
        let preferences = Arc::new(InMemoryPreferenceStore::default());
        let clock = FixedClock::default_instant();
        let mut controller = controller(&output, &preferences);
        controller
            .handle_play_recitation(&play(Recitation::Adzan), &clock)
            .unwrap();

        let result = controller.handle_play_recitation(&play(Recitation::Doa), &clock);

        assert!(matches!(
            result,
            Err(DomainError::IgnoredInput(IgnoredReason::RecitationInProgress))
        ));
        assert_eq!(output.calls().len(), 2);
    }

    #[test]
    fn test_finish_recitation_resumes_backsound() {
        let output = Arc::new(RecordingOutput::default());
        let preferences = Arc::new(InMemoryPreferenceStore::default());
        let clock = FixedClock::default_instant();
        let mut controller = controller(&output, &preferences);
        controller
            .handle_play_recitation(&play(Recitation::Doa), &clock)
            .unwrap();

        controller
            .handle_finish_recitation(
                &FinishRecitation {
                    correlation_id: Uuid::new_v4(),
                    recitation: Recitation::Doa,
                },
                &clock,
            )
            .unwrap();

        assert_eq!(output.calls().last(), Some(&Call::Play(Cue::Backsound)));
        assert!(controller.deck().playing().is_none());
    }

    #[test]
    fn test_every_toggle_writes_preference() {
        let output = Arc::new(RecordingOutput::default());
        let preferences = Arc::new(InMemoryPreferenceStore::default());
        let clock = FixedClock::default_instant();
        let mut controller = controller(&output, &preferences);

        controller.handle_toggle_backsound(&toggle(), &clock);
        controller.handle_toggle_backsound(&toggle(), &clock);
        controller.handle_toggle_backsound(&toggle(), &clock);

        assert_eq!(
            preferences.writes(),
            vec![
                (BACKSOUND_ENABLED_KEY.to_owned(), false),
                (BACKSOUND_ENABLED_KEY.to_owned(), true),
                (BACKSOUND_ENABLED_KEY.to_owned(), false),
            ]
        );
        assert_eq!(
            output.calls(),
            vec![
                Call::Stop(Cue::Backsound),
                Call::Play(Cue::Backsound),
                Call::Stop(Cue::Backsound),
            ]
        );
    }

    #[test]
    fn test_toggle_with_failing_store_still_toggles() {
        let output: Arc<dyn AudioOutput> = Arc::new(RecordingOutput::default());
        let clock = FixedClock::default_instant();
        let mut controller = MediaController::load(output, Arc::new(FailingPreferenceStore));

        let result = controller.handle_toggle_backsound(&toggle(), &clock);

        assert!(!result.persisted);
        assert_eq!(result.events.len(), 1);
        assert!(!controller.deck().backsound_enabled());
    }

    #[test]
    fn test_playback_failure_is_reported_as_notice() {
        let output = Arc::new(RecordingOutput::failing(
            PlaybackError::InteractionRequired,
        ));
        let preferences = Arc::new(InMemoryPreferenceStore::default());
        let clock = FixedClock::default_instant();
        let mut controller = MediaController::load(output.clone(), preferences);

        let result = controller
            .handle_play_recitation(&play(Recitation::Adzan), &clock)
            .unwrap();

        assert_eq!(result.notices, vec![PlaybackError::InteractionRequired]);
        assert_eq!(controller.deck().playing(), Some(Recitation::Adzan));
        assert_eq!(
            controller.play_cue(Cue::Click),
            Some(PlaybackError::InteractionRequired)
        );
        assert_eq!(
            PlaybackError::InteractionRequired.to_string(),
            "please interact first"
        );
    }
}
