//! Sound identities known to the widget.

use serde::{Deserialize, Serialize};

/// A long-form recording that pre-empts the backsound while it plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recitation {
    /// The call to prayer.
    Adzan,
    /// The prayer recited after the adzan.
    Doa,
}

impl Recitation {
    /// Both recitations, in menu order.
    pub const ALL: [Self; 2] = [Self::Adzan, Self::Doa];
}

impl std::fmt::Display for Recitation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Adzan => f.write_str("adzan"),
            Self::Doa => f.write_str("doa"),
        }
    }
}

/// Anything the `AudioOutput` can be asked to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    /// Played on every button press.
    Click,
    /// Played for a correct answer.
    Success,
    /// Played for a wrong answer.
    Wrong,
    /// Looping background music.
    Backsound,
    /// One of the recitations.
    Recitation(Recitation),
}

impl std::fmt::Display for Cue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Click => f.write_str("click"),
            Self::Success => f.write_str("success"),
            Self::Wrong => f.write_str("wrong"),
            Self::Backsound => f.write_str("backsound"),
            Self::Recitation(recitation) => write!(f, "{recitation}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_display_names() {
        assert_eq!(Cue::Click.to_string(), "click");
        assert_eq!(Cue::Backsound.to_string(), "backsound");
        assert_eq!(Cue::Recitation(Recitation::Doa).to_string(), "doa");
    }
}
