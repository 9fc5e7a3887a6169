//! Widget configuration.
//!
//! Everything is optional. The YAML file only overrides what it names, and
//! any value that is missing, empty or malformed falls back to the built-in
//! default.

use std::path::Path;
use std::time::Duration;

use adzan_competition::domain::settings::CompetitionSettings;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::AppError;

/// Environment variable naming the YAML configuration file.
pub const CONFIG_PATH_ENV: &str = "ADZAN_CONFIG";

/// Title, menu texts and colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Main heading.
    pub app_title: String,
    /// Menu entry for the adzan recitation page.
    pub menu_lafal: String,
    /// Menu entry for the doa page.
    pub menu_doa: String,
    /// Menu entry for the learning material page.
    pub menu_materi: String,
    /// Menu entry for the competition page.
    pub menu_kompetisi: String,
    /// Accent of menu buttons and headings.
    pub primary_color: String,
    /// Play buttons and headings.
    pub secondary_color: String,
    /// Page background.
    pub background_color: String,
    /// Body text.
    pub text_color: String,
    /// Start button.
    pub accent_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            app_title: "🕌 Belajar Adzan Yuk! 🕌".to_owned(),
            menu_lafal: "Lafal Adzan".to_owned(),
            menu_doa: "Doa Setelah Adzan".to_owned(),
            menu_materi: "Materi Adzan".to_owned(),
            menu_kompetisi: "Kompetisi".to_owned(),
            primary_color: "#2196F3".to_owned(),
            secondary_color: "#4CAF50".to_owned(),
            background_color: "#87CEEB".to_owned(),
            text_color: "#333333".to_owned(),
            accent_color: "#FF6B6B".to_owned(),
        }
    }
}

/// User-facing texts of the competition and the recitation buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    /// Shown in an idle track.
    pub idle_prompt: String,
    /// Start control before the first game.
    pub start: String,
    /// Start control while a game runs.
    pub in_progress: String,
    /// Start control after a game ended.
    pub play_again: String,
    /// Result when player 1 wins.
    pub player_one_wins: String,
    /// Result when player 2 wins.
    pub player_two_wins: String,
    /// Result on equal scores.
    pub tie: String,
    /// Prefix of the elapsed-time display.
    pub timer: String,
    /// Prefix of the question number.
    pub question: String,
    /// Name of a player slot, followed by its number.
    pub player: String,
    /// Adzan button while idle.
    pub play_adzan: String,
    /// Adzan button while playing.
    pub pause_adzan: String,
    /// Doa button while idle.
    pub play_doa: String,
    /// Doa button while playing.
    pub pause_doa: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            idle_prompt: "Klik \"Mulai Kompetisi\" untuk memulai!".to_owned(),
            start: "🚀 Mulai Kompetisi".to_owned(),
            in_progress: "🎮 Permainan Berlangsung...".to_owned(),
            play_again: "🔄 Main Lagi".to_owned(),
            player_one_wins: "🎉 Pemain 1 Menang! 🏆".to_owned(),
            player_two_wins: "🎉 Pemain 2 Menang! 🏆".to_owned(),
            tie: "🤝 Seri! Kedua Pemain Hebat! 🌟".to_owned(),
            timer: "Waktu".to_owned(),
            question: "Soal".to_owned(),
            player: "Pemain".to_owned(),
            play_adzan: "Putar Suara Adzan".to_owned(),
            pause_adzan: "Jeda Adzan".to_owned(),
            play_doa: "Putar Doa".to_owned(),
            pause_doa: "Jeda Doa".to_owned(),
        }
    }
}

/// Nominal clip lengths, used to report when a recitation ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioClips {
    /// Length of the adzan recording.
    pub adzan: Duration,
    /// Length of the doa recording.
    pub doa: Duration,
}

impl Default for AudioClips {
    fn default() -> Self {
        Self {
            adzan: Duration::from_secs(180),
            doa: Duration::from_secs(60),
        }
    }
}

/// Fully resolved widget configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WidgetConfig {
    /// Title, menus and colors.
    pub theme: Theme,
    /// Competition and button texts.
    pub labels: Labels,
    /// Question count and timings.
    pub competition: CompetitionSettings,
    /// Recitation lengths.
    pub audio: AudioClips,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    app_title: Option<String>,
    menu_lafal: Option<String>,
    menu_doa: Option<String>,
    menu_materi: Option<String>,
    menu_kompetisi: Option<String>,
    primary_color: Option<String>,
    secondary_color: Option<String>,
    background_color: Option<String>,
    text_color: Option<String>,
    accent_color: Option<String>,
    labels: RawLabels,
    competition: RawCompetition,
    audio: RawAudio,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLabels {
    idle_prompt: Option<String>,
    start: Option<String>,
    in_progress: Option<String>,
    play_again: Option<String>,
    player_one_wins: Option<String>,
    player_two_wins: Option<String>,
    tie: Option<String>,
    timer: Option<String>,
    question: Option<String>,
    player: Option<String>,
    play_adzan: Option<String>,
    pause_adzan: Option<String>,
    play_doa: Option<String>,
    pause_doa: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCompetition {
    question_count: Option<usize>,
    settle_delay_ms: Option<u64>,
    tick_period_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawAudio {
    adzan_seconds: Option<u64>,
    doa_seconds: Option<u64>,
}

fn text(value: Option<String>, default: String) -> String {
    match value {
        Some(value) if !value.trim().is_empty() => value,
        _ => default,
    }
}

/// Whether `value` is a `#RRGGBB` color.
#[must_use]
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

fn color(key: &str, value: Option<String>, default: String) -> String {
    match value {
        Some(value) if is_hex_color(value.trim()) => value.trim().to_owned(),
        Some(value) if !value.trim().is_empty() => {
            warn!(key, value = %value, fallback = %default, "invalid color, using default");
            default
        }
        _ => default,
    }
}

fn positive<T: PartialEq + Default + Copy + std::fmt::Display>(
    key: &str,
    value: Option<T>,
    default: T,
) -> T {
    match value {
        Some(value) if value == T::default() => {
            warn!(key, fallback = %default, "zero is not allowed, using default");
            default
        }
        Some(value) => value,
        None => default,
    }
}

impl RawConfig {
    fn resolve(self) -> WidgetConfig {
        let theme = Theme::default();
        let labels = Labels::default();
        let competition = CompetitionSettings::default();
        let audio = AudioClips::default();
        let raw_labels = self.labels;

        WidgetConfig {
            theme: Theme {
                app_title: text(self.app_title, theme.app_title),
                menu_lafal: text(self.menu_lafal, theme.menu_lafal),
                menu_doa: text(self.menu_doa, theme.menu_doa),
                menu_materi: text(self.menu_materi, theme.menu_materi),
                menu_kompetisi: text(self.menu_kompetisi, theme.menu_kompetisi),
                primary_color: color("primary_color", self.primary_color, theme.primary_color),
                secondary_color: color(
                    "secondary_color",
                    self.secondary_color,
                    theme.secondary_color,
                ),
                background_color: color(
                    "background_color",
                    self.background_color,
                    theme.background_color,
                ),
                text_color: color("text_color", self.text_color, theme.text_color),
                accent_color: color("accent_color", self.accent_color, theme.accent_color),
            },
            labels: Labels {
                idle_prompt: text(raw_labels.idle_prompt, labels.idle_prompt),
                start: text(raw_labels.start, labels.start),
                in_progress: text(raw_labels.in_progress, labels.in_progress),
                play_again: text(raw_labels.play_again, labels.play_again),
                player_one_wins: text(raw_labels.player_one_wins, labels.player_one_wins),
                player_two_wins: text(raw_labels.player_two_wins, labels.player_two_wins),
                tie: text(raw_labels.tie, labels.tie),
                timer: text(raw_labels.timer, labels.timer),
                question: text(raw_labels.question, labels.question),
                player: text(raw_labels.player, labels.player),
                play_adzan: text(raw_labels.play_adzan, labels.play_adzan),
                pause_adzan: text(raw_labels.pause_adzan, labels.pause_adzan),
                play_doa: text(raw_labels.play_doa, labels.play_doa),
                pause_doa: text(raw_labels.pause_doa, labels.pause_doa),
            },
            competition: CompetitionSettings {
                question_count: positive(
                    "competition.question_count",
                    self.competition.question_count,
                    competition.question_count,
                ),
                settle_delay: self
                    .competition
                    .settle_delay_ms
                    .map_or(competition.settle_delay, Duration::from_millis),
                tick_period: Duration::from_millis(positive(
                    "competition.tick_period_ms",
                    self.competition.tick_period_ms,
                    u64::try_from(competition.tick_period.as_millis()).unwrap_or(1000),
                )),
            },
            audio: AudioClips {
                adzan: self
                    .audio
                    .adzan_seconds
                    .map_or(audio.adzan, Duration::from_secs),
                doa: self.audio.doa_seconds.map_or(audio.doa, Duration::from_secs),
            },
        }
    }
}

impl WidgetConfig {
    /// Parses YAML, filling gaps with defaults. An empty document yields
    /// the defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Yaml` if the document is not valid YAML or has
    /// values of the wrong type.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, AppError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawConfig = serde_yaml::from_str(yaml)?;
        Ok(raw.resolve())
    }

    /// Reads and parses the YAML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the file cannot be read and
    /// `AppError::Yaml` if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let yaml = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&yaml)?;
        info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Loads from `ADZAN_CONFIG` if set, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the variable is set but empty, plus any
    /// error from [`WidgetConfig::load`].
    pub fn from_env() -> Result<Self, AppError> {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) if path.is_empty() => Err(AppError::Config(format!(
                "{CONFIG_PATH_ENV} is set but empty"
            ))),
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }
}
