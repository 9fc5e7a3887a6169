//! Aggregate roots for the Media context.

use adzan_core::aggregate::AggregateRoot;
use adzan_core::clock::Clock;
use adzan_core::error::{DomainError, IgnoredReason};
use adzan_core::event::EventMetadata;
use uuid::Uuid;

use super::audio::Recitation;
use super::events::{
    BacksoundResumed, BacksoundToggled, MediaEvent, MediaEventKind, RecitationFinished,
    RecitationStarted,
};

/// The aggregate root for everything the widget can make audible.
///
/// At most one recitation plays at a time, and the backsound never plays
/// alongside one.
#[derive(Debug)]
pub struct AudioDeck {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub version: i64,
    backsound_enabled: bool,
    backsound_playing: bool,
    playing: Option<Recitation>,
    /// Uncommitted events pending publication.
    uncommitted_events: Vec<MediaEvent>,
}

impl AudioDeck {
    /// Creates a silent deck with the stored backsound preference.
    #[must_use]
    pub fn new(id: Uuid, backsound_enabled: bool) -> Self {
        Self {
            id,
            version: 0,
            backsound_enabled,
            backsound_playing: false,
            playing: None,
            uncommitted_events: Vec::new(),
        }
    }

    /// Starts `recitation`, silencing the backsound.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IgnoredInput` while any recitation is playing.
    pub fn play_recitation(
        &mut self,
        recitation: Recitation,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if self.playing.is_some() {
            return Err(DomainError::IgnoredInput(
                IgnoredReason::RecitationInProgress,
            ));
        }

        let backsound_stopped = self.backsound_playing;
        self.backsound_playing = false;
        self.playing = Some(recitation);

        self.record(
            MediaEventKind::RecitationStarted(RecitationStarted {
                recitation,
                backsound_stopped,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Marks `recitation` as ended and lets the backsound pick up again if
    /// the preference allows it. Returns whether the backsound resumed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IgnoredInput` if `recitation` is not the one
    /// playing.
    pub fn finish_recitation(
        &mut self,
        recitation: Recitation,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<bool, DomainError> {
        if self.playing != Some(recitation) {
            return Err(DomainError::IgnoredInput(IgnoredReason::NotPlaying));
        }

        self.playing = None;
        self.backsound_playing = self.backsound_enabled;

        self.record(
            MediaEventKind::RecitationFinished(RecitationFinished {
                recitation,
                backsound_resumed: self.backsound_playing,
            }),
            correlation_id,
            clock,
        );
        Ok(self.backsound_playing)
    }

    /// Flips the backsound preference and returns the new value.
    ///
    /// Turning it on while a recitation plays only records the preference;
    /// the backsound starts when the recitation ends.
    pub fn toggle_backsound(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> bool {
        self.backsound_enabled = !self.backsound_enabled;
        self.backsound_playing = self.backsound_enabled && self.playing.is_none();

        self.record(
            MediaEventKind::BacksoundToggled(BacksoundToggled {
                enabled: self.backsound_enabled,
                playing: self.backsound_playing,
            }),
            correlation_id,
            clock,
        );
        self.backsound_enabled
    }

    /// Starts the backsound if enabled, idle and not already playing.
    /// Returns whether it started.
    pub fn resume_backsound(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> bool {
        if !self.backsound_enabled || self.backsound_playing || self.playing.is_some() {
            return false;
        }

        self.backsound_playing = true;
        self.record(
            MediaEventKind::BacksoundResumed(BacksoundResumed),
            correlation_id,
            clock,
        );
        true
    }

    /// The stored backsound preference.
    #[must_use]
    pub fn backsound_enabled(&self) -> bool {
        self.backsound_enabled
    }

    /// Whether the backsound is audible.
    #[must_use]
    pub fn backsound_playing(&self) -> bool {
        self.backsound_playing
    }

    /// The recitation playing, if any.
    #[must_use]
    pub fn playing(&self) -> Option<Recitation> {
        self.playing
    }

    fn record(&mut self, kind: MediaEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        let metadata = EventMetadata::new(
            kind.event_type(),
            self.id,
            self.version + 1,
            correlation_id,
            clock.now(),
        );
        self.version += 1;
        self.uncommitted_events.push(MediaEvent { metadata, kind });
    }
}

impl AggregateRoot for AudioDeck {
    type Event = MediaEvent;

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
