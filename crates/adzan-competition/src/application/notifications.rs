//! Outbound ports and the event-to-presentation mapping.
//!
//! The competition never talks to a screen or a speaker directly. After each
//! command the host passes the recorded events to [`publish_events`], which
//! turns them into calls on a [`FeedbackSignaler`] and a
//! [`PresentationAdapter`].

use crate::application::query_handlers::{TrackView, get_track_view};
use crate::domain::aggregates::Competition;
use crate::domain::events::{CompetitionEvent, CompetitionEventKind};
use crate::domain::player::{Outcome, PlayerId};
use crate::domain::timer::ElapsedTime;

/// Fire-and-forget feedback cues. Failures stay inside the implementation.
pub trait FeedbackSignaler {
    /// A correct answer was graded.
    fn signal_correct(&self);

    /// A wrong answer was graded.
    fn signal_incorrect(&self);

    /// The game ended with `outcome`.
    fn signal_game_end(&self, outcome: Outcome);
}

/// Feedback for one graded answer.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerFeedback {
    /// The answering player.
    pub player: PlayerId,
    /// Option that was picked.
    pub choice: usize,
    /// Option that was correct.
    pub correct_index: usize,
    /// Whether the pick was correct.
    pub correct: bool,
    /// Score formatted as `"{score} / {count}"`.
    pub score_display: String,
    /// Climber height in percent.
    pub progress_percent: f64,
}

/// Renders competition state for the players.
pub trait PresentationAdapter {
    /// Shows a track's current question, score and controls.
    fn render_track(&mut self, view: &TrackView);

    /// Highlights a graded answer.
    fn render_feedback(&mut self, feedback: &AnswerFeedback);

    /// Shows the elapsed time as `MM:SS`.
    fn render_elapsed(&mut self, elapsed: &str);

    /// Shows the result, or hides it when `None`.
    fn render_outcome(&mut self, outcome: Option<Outcome>);

    /// Enables or disables the start control.
    fn set_start_enabled(&mut self, enabled: bool);
}

/// Maps recorded events onto the signaler and presenter, in order.
///
/// `competition` must be the aggregate the events came from; views are built
/// from its current state.
pub fn publish_events(
    events: &[CompetitionEvent],
    competition: &Competition,
    signaler: &dyn FeedbackSignaler,
    presenter: &mut dyn PresentationAdapter,
) {
    for event in events {
        match &event.kind {
            CompetitionEventKind::CompetitionStarted(_) => {
                presenter.render_outcome(None);
                presenter.set_start_enabled(false);
                render_tracks(competition, presenter);
                presenter.render_elapsed(&ElapsedTime::ZERO.to_string());
            }
            CompetitionEventKind::AnswerSubmitted(submitted) => {
                let outcome = submitted.outcome;
                if outcome.correct {
                    signaler.signal_correct();
                } else {
                    signaler.signal_incorrect();
                }
                let track = competition.track(submitted.player);
                presenter.render_feedback(&AnswerFeedback {
                    player: submitted.player,
                    choice: outcome.choice,
                    correct_index: outcome.correct_index,
                    correct: outcome.correct,
                    score_display: track.score_display(),
                    progress_percent: track.progress_percent(),
                });
            }
            CompetitionEventKind::TrackAdvanced(advanced) => {
                if !advanced.exhausted {
                    presenter.render_track(&get_track_view(competition, advanced.player));
                }
            }
            CompetitionEventKind::TimerTicked(ticked) => {
                presenter.render_elapsed(&ticked.elapsed.to_string());
            }
            CompetitionEventKind::CompetitionEnded(ended) => {
                signaler.signal_game_end(ended.outcome);
                presenter.render_outcome(Some(ended.outcome));
                presenter.set_start_enabled(true);
            }
            CompetitionEventKind::CompetitionReset(_) => {
                render_tracks(competition, presenter);
                presenter.render_elapsed(&ElapsedTime::ZERO.to_string());
                presenter.render_outcome(None);
                presenter.set_start_enabled(true);
            }
        }
    }
}

fn render_tracks(competition: &Competition, presenter: &mut dyn PresentationAdapter) {
    for player in PlayerId::ALL {
        presenter.render_track(&get_track_view(competition, player));
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use adzan_core::aggregate::AggregateRoot;
    use adzan_test_support::{FixedClock, MockRng};
    use uuid::Uuid;

    use super::*;
    use crate::domain::question_bank::OPTION_COUNT;

    #[derive(Debug, Default)]
    struct RecordingSignaler {
        calls: RefCell<Vec<String>>,
    }

    impl FeedbackSignaler for RecordingSignaler {
        fn signal_correct(&self) {
            self.calls.borrow_mut().push("correct".to_owned());
        }

        fn signal_incorrect(&self) {
            self.calls.borrow_mut().push("incorrect".to_owned());
        }

        fn signal_game_end(&self, outcome: Outcome) {
            self.calls.borrow_mut().push(format!("end {outcome:?}"));
        }
    }

    #[derive(Debug, Default)]
    struct RecordingPresenter {
        tracks: Vec<TrackView>,
        feedback: Vec<AnswerFeedback>,
        elapsed: Vec<String>,
        outcomes: Vec<Option<Outcome>>,
        start_enabled: Vec<bool>,
    }

    impl PresentationAdapter for RecordingPresenter {
        fn render_track(&mut self, view: &TrackView) {
            self.tracks.push(view.clone());
        }

        fn render_feedback(&mut self, feedback: &AnswerFeedback) {
            self.feedback.push(feedback.clone());
        }

        fn render_elapsed(&mut self, elapsed: &str) {
            self.elapsed.push(elapsed.to_owned());
        }

        fn render_outcome(&mut self, outcome: Option<Outcome>) {
            self.outcomes.push(outcome);
        }

        fn set_start_enabled(&mut self, enabled: bool) {
            self.start_enabled.push(enabled);
        }
    }

    fn started() -> (Competition, FixedClock) {
        let clock = FixedClock::default_instant();
        let mut competition = Competition::with_default_banks();
        competition
            .start(Uuid::new_v4(), &clock, &mut MockRng)
            .unwrap();
        (competition, clock)
    }

    #[test]
    fn test_started_renders_both_tracks_and_disables_start() {
        // Arrange
        let (mut competition, _clock) = started();
        let events = competition.take_uncommitted_events();
        let signaler = RecordingSignaler::default();
        let mut presenter = RecordingPresenter::default();

        // Act
        publish_events(&events, &competition, &signaler, &mut presenter);

        // Assert
        assert_eq!(presenter.tracks.len(), 2);
        assert_eq!(presenter.tracks[0].player, PlayerId::One);
        assert_eq!(presenter.tracks[1].player, PlayerId::Two);
        assert_eq!(presenter.elapsed, vec!["00:00"]);
        assert_eq!(presenter.outcomes, vec![None]);
        assert_eq!(presenter.start_enabled, vec![false]);
        assert!(signaler.calls.borrow().is_empty());
    }

    #[test]
    fn test_wrong_answer_signals_and_reveals_correct_option() {
        let (mut competition, clock) = started();
        competition.take_uncommitted_events();
        let correct = competition
            .track(PlayerId::Two)
            .current_question()
            .unwrap()
            .correct_index();
        let wrong = (correct + 1) % OPTION_COUNT;
        competition
            .submit_answer(PlayerId::Two, wrong, Uuid::new_v4(), &clock)
            .unwrap();
        let events = competition.take_uncommitted_events();
        let signaler = RecordingSignaler::default();
        let mut presenter = RecordingPresenter::default();

        publish_events(&events, &competition, &signaler, &mut presenter);

        assert_eq!(*signaler.calls.borrow(), vec!["incorrect"]);
        assert_eq!(
            presenter.feedback,
            vec![AnswerFeedback {
                player: PlayerId::Two,
                choice: wrong,
                correct_index: correct,
                correct: false,
                score_display: "0 / 20".to_owned(),
                progress_percent: 0.0,
            }]
        );
    }

    #[test]
    fn test_advance_renders_next_question_and_tick_renders_elapsed() {
        let (mut competition, clock) = started();
        let generation = competition.generation();
        competition
            .submit_answer(PlayerId::One, 0, Uuid::new_v4(), &clock)
            .unwrap();
        competition
            .advance_track(PlayerId::One, generation, Uuid::new_v4(), &clock)
            .unwrap();
        competition
            .tick(generation, Uuid::new_v4(), &clock)
            .unwrap();
        let events = competition.take_uncommitted_events();
        let signaler = RecordingSignaler::default();
        let mut presenter = RecordingPresenter::default();

        publish_events(&events[2..], &competition, &signaler, &mut presenter);

        assert_eq!(presenter.tracks.len(), 1);
        assert_eq!(presenter.tracks[0].question_number, Some(2));
        assert_eq!(presenter.elapsed, vec!["00:01"]);
    }

    #[test]
    fn test_reset_renders_idle_state_and_enables_start() {
        let (mut competition, clock) = started();
        competition.take_uncommitted_events();
        competition.reset(Uuid::new_v4(), &clock);
        let events = competition.take_uncommitted_events();
        let signaler = RecordingSignaler::default();
        let mut presenter = RecordingPresenter::default();

        publish_events(&events, &competition, &signaler, &mut presenter);

        assert_eq!(presenter.tracks.len(), 2);
        assert!(presenter.tracks.iter().all(|track| track.prompt.is_none()));
        assert_eq!(presenter.elapsed, vec!["00:00"]);
        assert_eq!(presenter.outcomes, vec![None]);
        assert_eq!(presenter.start_enabled, vec![true]);
    }
}
