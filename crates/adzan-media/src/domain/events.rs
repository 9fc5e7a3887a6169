//! Domain events for the Media context.

use adzan_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

use super::audio::Recitation;

/// Emitted when a recitation starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecitationStarted {
    /// The recitation now playing.
    pub recitation: Recitation,
    /// Whether the backsound was playing and had to stop.
    pub backsound_stopped: bool,
}

/// Emitted when a recitation reaches its end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecitationFinished {
    /// The recitation that ended.
    pub recitation: Recitation,
    /// Whether the backsound picked up again.
    pub backsound_resumed: bool,
}

/// Emitted on every backsound toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacksoundToggled {
    /// The new preference value.
    pub enabled: bool,
    /// Whether the backsound is audible after the toggle.
    pub playing: bool,
}

/// Emitted when the backsound starts without a toggle, e.g. at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacksoundResumed;

/// Event type identifier for [`RecitationStarted`].
pub const RECITATION_STARTED_EVENT_TYPE: &str = "media.recitation_started";

/// Event type identifier for [`RecitationFinished`].
pub const RECITATION_FINISHED_EVENT_TYPE: &str = "media.recitation_finished";

/// Event type identifier for [`BacksoundToggled`].
pub const BACKSOUND_TOGGLED_EVENT_TYPE: &str = "media.backsound_toggled";

/// Event type identifier for [`BacksoundResumed`].
pub const BACKSOUND_RESUMED_EVENT_TYPE: &str = "media.backsound_resumed";

/// Event payload variants for the Media context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaEventKind {
    /// A recitation has started.
    RecitationStarted(RecitationStarted),
    /// A recitation has ended.
    RecitationFinished(RecitationFinished),
    /// The backsound preference flipped.
    BacksoundToggled(BacksoundToggled),
    /// The backsound resumed.
    BacksoundResumed(BacksoundResumed),
}

impl MediaEventKind {
    /// The event type identifier for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::RecitationStarted(_) => RECITATION_STARTED_EVENT_TYPE,
            Self::RecitationFinished(_) => RECITATION_FINISHED_EVENT_TYPE,
            Self::BacksoundToggled(_) => BACKSOUND_TOGGLED_EVENT_TYPE,
            Self::BacksoundResumed(_) => BACKSOUND_RESUMED_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the Media context.
#[derive(Debug, Clone)]
pub struct MediaEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: MediaEventKind,
}

impl DomainEvent for MediaEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("MediaEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
