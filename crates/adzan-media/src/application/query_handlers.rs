//! Query handlers for the Media context.

use serde::Serialize;

use crate::domain::aggregates::AudioDeck;
use crate::domain::audio::Recitation;

/// Read-only view of the audio deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeckView {
    /// The stored backsound preference.
    pub backsound_enabled: bool,
    /// Whether the backsound is audible.
    pub backsound_playing: bool,
    /// The recitation playing, if any.
    pub playing: Option<Recitation>,
    /// Whether the recitation buttons accept input.
    pub recitation_buttons_enabled: bool,
}

/// Returns the view of `deck`.
#[must_use]
pub fn get_deck_view(deck: &AudioDeck) -> DeckView {
    DeckView {
        backsound_enabled: deck.backsound_enabled(),
        backsound_playing: deck.backsound_playing(),
        playing: deck.playing(),
        recitation_buttons_enabled: deck.playing().is_none(),
    }
}
