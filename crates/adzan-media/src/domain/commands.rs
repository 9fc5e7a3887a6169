//! Commands for the Media context.

use adzan_core::command::Command;
use uuid::Uuid;

use super::audio::Recitation;

/// Command to start a recitation.
#[derive(Debug, Clone)]
pub struct PlayRecitation {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Which recitation to play.
    pub recitation: Recitation,
}

impl Command for PlayRecitation {
    fn command_type(&self) -> &'static str {
        "media.play_recitation"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command delivered when the audio output reports a recitation ended.
#[derive(Debug, Clone)]
pub struct FinishRecitation {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The recitation that ended.
    pub recitation: Recitation,
}

impl Command for FinishRecitation {
    fn command_type(&self) -> &'static str {
        "media.finish_recitation"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to flip the backsound preference.
#[derive(Debug, Clone)]
pub struct ToggleBacksound {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for ToggleBacksound {
    fn command_type(&self) -> &'static str {
        "media.toggle_backsound"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to start the backsound if the preference allows it.
#[derive(Debug, Clone)]
pub struct ResumeBacksound {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for ResumeBacksound {
    fn command_type(&self) -> &'static str {
        "media.resume_backsound"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
