//! Query handlers for the Competition context.
//!
//! Builds read-only view DTOs from the live aggregate.

use serde::Serialize;

use crate::domain::aggregates::Competition;
use crate::domain::player::{Outcome, PlayerId};
use crate::domain::track::{Track, TrackPhase};

/// Read-only view of one player's track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackView {
    /// Owning player.
    pub player: PlayerId,
    /// Track lifecycle phase.
    pub phase: TrackPhase,
    /// One-based number of the question shown, `None` when nothing is shown.
    pub question_number: Option<usize>,
    /// Questions in this game.
    pub question_count: usize,
    /// Prompt of the question shown.
    pub prompt: Option<String>,
    /// Option labels of the question shown.
    pub options: Vec<String>,
    /// Correct answers so far.
    pub score: usize,
    /// Score formatted as `"{score} / {count}"`.
    pub score_display: String,
    /// Climber height in percent.
    pub progress_percent: f64,
    /// Whether the answer buttons accept input.
    pub controls_enabled: bool,
}

/// Read-only view of the whole competition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitionView {
    /// Whether a game is running.
    pub active: bool,
    /// Elapsed time as `MM:SS`.
    pub elapsed_display: String,
    /// Both tracks, player 1 first.
    pub tracks: [TrackView; 2],
    /// Result of the last finished game.
    pub outcome: Option<Outcome>,
    /// Whether the start control is enabled.
    pub start_enabled: bool,
}

fn track_view(competition: &Competition, track: &Track) -> TrackView {
    let shown = track.current_question().ok();
    // An idle track has no order yet; show the configured size instead.
    let count = match track.phase() {
        TrackPhase::NotStarted => competition.settings().question_count,
        _ => track.question_count(),
    };
    TrackView {
        player: track.player(),
        phase: track.phase(),
        question_number: shown.map(|_| track.current_index() + 1),
        question_count: count,
        prompt: shown.map(|question| question.prompt().to_owned()),
        options: shown
            .map(|question| {
                question
                    .options()
                    .iter()
                    .map(|option| (*option).to_owned())
                    .collect()
            })
            .unwrap_or_default(),
        score: track.score(),
        score_display: format!("{} / {}", track.score(), count),
        progress_percent: track.progress_percent(),
        controls_enabled: competition.is_active()
            && track.phase() == TrackPhase::InProgress
            && track.pending().is_none(),
    }
}

/// Returns the view of `player`'s track.
#[must_use]
pub fn get_track_view(competition: &Competition, player: PlayerId) -> TrackView {
    track_view(competition, competition.track(player))
}

/// Returns the view of the whole competition.
#[must_use]
pub fn get_competition_view(competition: &Competition) -> CompetitionView {
    CompetitionView {
        active: competition.is_active(),
        elapsed_display: competition.elapsed().to_string(),
        tracks: PlayerId::ALL.map(|player| get_track_view(competition, player)),
        outcome: competition.outcome(),
        start_enabled: !competition.is_active(),
    }
}

#[cfg(test)]
mod tests {
    use adzan_test_support::{FixedClock, MockRng};
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_idle_view_shows_nothing_and_enables_start() {
        let competition = Competition::with_default_banks();

        let view = get_competition_view(&competition);

        assert!(!view.active);
        assert!(view.start_enabled);
        assert_eq!(view.elapsed_display, "00:00");
        assert!(view.outcome.is_none());
        for track in &view.tracks {
            assert_eq!(track.phase, TrackPhase::NotStarted);
            assert!(track.prompt.is_none());
            assert!(track.options.is_empty());
            assert!(!track.controls_enabled);
            assert_eq!(track.score_display, "0 / 20");
        }
    }

    #[test]
    fn test_started_view_shows_first_question() {
        let clock = FixedClock::default_instant();
        let mut competition = Competition::with_default_banks();
        competition
            .start(Uuid::new_v4(), &clock, &mut MockRng)
            .unwrap();

        let view = get_track_view(&competition, PlayerId::Two);

        let first = competition.track(PlayerId::Two).order()[0];
        assert_eq!(view.question_number, Some(1));
        assert_eq!(view.prompt.as_deref(), Some(first.prompt()));
        assert_eq!(view.options.len(), 4);
        assert_eq!(view.score_display, "0 / 20");
        assert!(view.controls_enabled);
        assert!(!get_competition_view(&competition).start_enabled);
    }

    #[test]
    fn test_pending_answer_disables_controls() {
        let clock = FixedClock::default_instant();
        let mut competition = Competition::with_default_banks();
        competition
            .start(Uuid::new_v4(), &clock, &mut MockRng)
            .unwrap();
        let correct = competition
            .track(PlayerId::One)
            .current_question()
            .unwrap()
            .correct_index();
        competition
            .submit_answer(PlayerId::One, correct, Uuid::new_v4(), &clock)
            .unwrap();

        let view = get_track_view(&competition, PlayerId::One);

        assert!(!view.controls_enabled);
        assert_eq!(view.score_display, "1 / 20");
        assert!((view.progress_percent - 5.0).abs() < 1e-9);
        assert!(get_track_view(&competition, PlayerId::Two).controls_enabled);
    }
}
