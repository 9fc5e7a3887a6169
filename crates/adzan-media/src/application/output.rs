//! Audio output port.

use thiserror::Error;

use crate::domain::audio::Cue;

/// Why a cue could not be played.
///
/// Playback failures are informational. They are logged and reported to the
/// user but never change competition or deck state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The platform refuses audio until the user has interacted with it.
    #[error("please interact first")]
    InteractionRequired,

    /// The output device or clip is missing.
    #[error("audio unavailable: {0}")]
    Unavailable(String),
}

/// Plays and stops cues.
pub trait AudioOutput: Send + Sync {
    /// Plays `cue` from its beginning.
    ///
    /// # Errors
    ///
    /// Returns `PlaybackError` if the cue could not be started.
    fn play(&self, cue: Cue) -> Result<(), PlaybackError>;

    /// Stops `cue` and rewinds it. Stopping a silent cue does nothing.
    fn stop(&self, cue: Cue);

    /// Tells the output the user has interacted. Outputs with an autoplay
    /// policy unlock here.
    fn notify_interaction(&self) {}
}
