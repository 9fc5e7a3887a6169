//! Bridges competition feedback to audio cues.

use std::sync::Arc;

use adzan_competition::application::notifications::FeedbackSignaler;
use adzan_competition::domain::player::Outcome;
use adzan_media::application::output::AudioOutput;
use adzan_media::domain::audio::Cue;
use tracing::{info, warn};

/// Plays the success and wrong cues for graded answers.
pub struct AudioFeedback {
    output: Arc<dyn AudioOutput>,
}

impl AudioFeedback {
    /// Creates a signaler over `output`.
    #[must_use]
    pub fn new(output: Arc<dyn AudioOutput>) -> Self {
        Self { output }
    }

    fn play(&self, cue: Cue) {
        if let Err(e) = self.output.play(cue) {
            warn!(%cue, error = %e, "feedback cue failed");
        }
    }
}

impl FeedbackSignaler for AudioFeedback {
    fn signal_correct(&self) {
        self.play(Cue::Success);
    }

    fn signal_incorrect(&self) {
        self.play(Cue::Wrong);
    }

    fn signal_game_end(&self, outcome: Outcome) {
        info!(?outcome, "game over");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use adzan_media::application::output::PlaybackError;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        played: Mutex<Vec<Cue>>,
        fail: bool,
    }

    impl AudioOutput for Recorder {
        fn play(&self, cue: Cue) -> Result<(), PlaybackError> {
            self.played.lock().unwrap().push(cue);
            if self.fail {
                Err(PlaybackError::Unavailable("no device".into()))
            } else {
                Ok(())
            }
        }

        fn stop(&self, _cue: Cue) {}
    }

    #[test]
    fn test_correct_and_incorrect_map_to_cues() {
        let recorder = Arc::new(Recorder::default());
        let feedback = AudioFeedback::new(recorder.clone());

        feedback.signal_correct();
        feedback.signal_incorrect();
        feedback.signal_game_end(Outcome::Tie);

        assert_eq!(*recorder.played.lock().unwrap(), vec![Cue::Success, Cue::Wrong]);
    }

    #[test]
    fn test_failing_output_does_not_panic() {
        let recorder = Arc::new(Recorder {
            played: Mutex::new(Vec::new()),
            fail: true,
        });
        let feedback = AudioFeedback::new(recorder.clone());

        feedback.signal_correct();

        assert_eq!(recorder.played.lock().unwrap().len(), 1);
    }
}
