//! Terminal presentation and input parsing.

use std::io::Write;

use adzan_competition::application::notifications::{AnswerFeedback, PresentationAdapter};
use adzan_competition::application::query_handlers::TrackView;
use adzan_competition::domain::player::{Outcome, PlayerId};
use adzan_media::application::query_handlers::DeckView;
use adzan_media::domain::audio::Recitation;
use tracing::warn;

use crate::config::{Labels, Theme};
use crate::navigation::Page;
use crate::runtime::WidgetInput;

const OPTION_LETTERS: [char; 4] = ['a', 'b', 'c', 'd'];

fn letter(index: usize) -> char {
    OPTION_LETTERS.get(index).copied().unwrap_or('?')
}

/// Usage text printed by `help` and after unknown input.
pub const HELP: &str = "\
commands:
  start | mulai          start a game
  reset                  abandon the game
  <player> <a-d|1-4>     answer, e.g. `1 b` or `2 4`
  page <name>            home, lafal, doa, materi, kompetisi
  adzan | doa            play a recitation
  backsound              toggle background music
  help                   show this text
  quit                   leave";

/// Writes the widget to a line-oriented terminal.
///
/// Write failures are logged and otherwise ignored; a broken stdout must
/// not stop the game.
pub struct TerminalPresenter<W> {
    out: W,
    labels: Labels,
    outcome_shown: bool,
}

impl<W: Write> TerminalPresenter<W> {
    /// Creates a presenter writing to `out`.
    pub fn new(out: W, labels: Labels) -> Self {
        Self {
            out,
            labels,
            outcome_shown: false,
        }
    }

    /// Returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Borrows the writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            warn!(error = %e, "terminal write failed");
        }
    }

    fn player_name(&self, player: PlayerId) -> String {
        format!("{} {}", self.labels.player, player.number())
    }

    /// Shows the heading of `page`.
    pub fn render_page(&mut self, page: Page, theme: &Theme) {
        let heading = format!("=== {} ===", page.title(theme));
        self.emit(&heading);
        if page == Page::Home {
            let menu = Page::ALL[1..]
                .iter()
                .map(|page| format!("[{}] {}", page.slug(), page.title(theme)))
                .collect::<Vec<_>>()
                .join("  ");
            self.emit(&menu);
        }
    }

    /// Shows the recitation buttons and the backsound state.
    pub fn render_deck(&mut self, view: &DeckView) {
        for recitation in Recitation::ALL {
            let (play, pause) = match recitation {
                Recitation::Adzan => (&self.labels.play_adzan, &self.labels.pause_adzan),
                Recitation::Doa => (&self.labels.play_doa, &self.labels.pause_doa),
            };
            let line = if view.playing == Some(recitation) {
                format!("⏸️ {pause}")
            } else if view.recitation_buttons_enabled {
                format!("▶️ {play}")
            } else {
                format!("▶️ {play} (-)")
            };
            self.emit(&line);
        }
        let backsound = if view.backsound_enabled { "on" } else { "off" };
        self.emit(&format!("🎵 backsound: {backsound}"));
    }

    /// Shows a one-line notice.
    pub fn render_notice(&mut self, text: &str) {
        self.emit(&format!("! {text}"));
    }

    /// Shows the command list.
    pub fn render_help(&mut self) {
        self.emit(HELP);
    }
}

impl<W: Write> PresentationAdapter for TerminalPresenter<W> {
    fn render_track(&mut self, view: &TrackView) {
        let name = self.player_name(view.player);
        match (&view.prompt, view.question_number) {
            (Some(prompt), Some(number)) => {
                let header = format!(
                    "[{name}] {} {number}/{}: {prompt}",
                    self.labels.question, view.question_count
                );
                self.emit(&header);
                let options = view
                    .options
                    .iter()
                    .enumerate()
                    .map(|(i, option)| format!("  {}) {option}", letter(i)))
                    .collect::<Vec<_>>();
                for option in options {
                    self.emit(&option);
                }
            }
            _ => {
                let idle = format!("[{name}] {}", self.labels.idle_prompt);
                self.emit(&idle);
            }
        }
        self.emit(&format!(
            "[{name}] {}  ({:.0}%)",
            view.score_display, view.progress_percent
        ));
    }

    fn render_feedback(&mut self, feedback: &AnswerFeedback) {
        let name = self.player_name(feedback.player);
        let line = if feedback.correct {
            format!("[{name}] ✅ {}", letter(feedback.choice))
        } else {
            format!(
                "[{name}] ❌ {} → ✅ {}",
                letter(feedback.choice),
                letter(feedback.correct_index)
            )
        };
        self.emit(&line);
        self.emit(&format!(
            "[{name}] {}  ({:.0}%)",
            feedback.score_display, feedback.progress_percent
        ));
    }

    fn render_elapsed(&mut self, elapsed: &str) {
        let line = format!("{}: {elapsed}", self.labels.timer);
        self.emit(&line);
    }

    fn render_outcome(&mut self, outcome: Option<Outcome>) {
        self.outcome_shown = outcome.is_some();
        let text = match outcome {
            Some(Outcome::PlayerOneWins) => self.labels.player_one_wins.clone(),
            Some(Outcome::PlayerTwoWins) => self.labels.player_two_wins.clone(),
            Some(Outcome::Tie) => self.labels.tie.clone(),
            None => return,
        };
        self.emit(&text);
    }

    fn set_start_enabled(&mut self, enabled: bool) {
        let label = match (enabled, self.outcome_shown) {
            (false, _) => self.labels.in_progress.clone(),
            (true, true) => self.labels.play_again.clone(),
            (true, false) => self.labels.start.clone(),
        };
        self.emit(&format!("[{label}]"));
    }
}

fn parse_choice(token: &str) -> Result<usize, String> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_lowercase() => Ok(c as usize - 'a' as usize),
        _ => token
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .ok_or_else(|| format!("invalid choice: {token}")),
    }
}

/// Parses one line of terminal input.
///
/// Player numbers and choices are only checked for shape here; the
/// competition decides whether they are in range.
///
/// # Errors
///
/// Returns a message naming the problem when the line is not a command.
pub fn parse_command(line: &str) -> Result<WidgetInput, String> {
    let lowered = line.trim().to_ascii_lowercase();
    let tokens: Vec<&str> = lowered.split_whitespace().collect();
    match tokens.as_slice() {
        ["start" | "mulai"] => Ok(WidgetInput::Start),
        ["reset"] => Ok(WidgetInput::Reset),
        ["adzan"] => Ok(WidgetInput::PlayRecitation(Recitation::Adzan)),
        ["doa"] => Ok(WidgetInput::PlayRecitation(Recitation::Doa)),
        ["backsound"] => Ok(WidgetInput::ToggleBacksound),
        ["help" | "?"] => Ok(WidgetInput::Help),
        ["quit" | "exit"] => Ok(WidgetInput::Quit),
        ["page", name] => name.parse().map(WidgetInput::ShowPage),
        [player, choice] => {
            let player = player
                .trim_start_matches('p')
                .parse::<u8>()
                .map_err(|_| format!("invalid player: {player}"))?;
            let choice = parse_choice(choice)?;
            Ok(WidgetInput::Answer { player, choice })
        }
        [] => Err("empty input".to_owned()),
        _ => Err(format!("unknown command: {}", line.trim())),
    }
}
