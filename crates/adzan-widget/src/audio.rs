//! Console stand-in for a sound device.

use std::sync::atomic::{AtomicBool, Ordering};

use adzan_media::application::output::{AudioOutput, PlaybackError};
use adzan_media::domain::audio::Cue;
use tracing::info;

/// Logs cues instead of playing them.
///
/// Like a browser's autoplay policy, nothing plays until the user has
/// interacted once; earlier attempts fail with
/// [`PlaybackError::InteractionRequired`].
#[derive(Debug, Default)]
pub struct ConsoleAudioOutput {
    interacted: AtomicBool,
}

impl ConsoleAudioOutput {
    /// Creates an output that still waits for the first interaction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioOutput for ConsoleAudioOutput {
    fn play(&self, cue: Cue) -> Result<(), PlaybackError> {
        if !self.interacted.load(Ordering::Relaxed) {
            return Err(PlaybackError::InteractionRequired);
        }
        info!(%cue, "play");
        Ok(())
    }

    fn stop(&self, cue: Cue) {
        info!(%cue, "stop");
    }

    fn notify_interaction(&self) {
        self.interacted.store(true, Ordering::Relaxed);
    }
}
