//! Widget pages.

use std::str::FromStr;

use crate::config::Theme;

/// One of the widget's pages. Only one is shown at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// Menu.
    Home,
    /// Adzan text with its recitation button.
    Lafal,
    /// Post-adzan prayer with its recitation button.
    Doa,
    /// Learning material.
    Materi,
    /// Two-player competition.
    Kompetisi,
}

impl Page {
    /// Every page, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Home,
        Self::Lafal,
        Self::Doa,
        Self::Materi,
        Self::Kompetisi,
    ];

    /// Entering the competition page always starts from a clean slate.
    #[must_use]
    pub fn resets_competition(self) -> bool {
        self == Self::Kompetisi
    }

    /// Heading for this page under `theme`.
    #[must_use]
    pub fn title(self, theme: &Theme) -> &str {
        match self {
            Self::Home => &theme.app_title,
            Self::Lafal => &theme.menu_lafal,
            Self::Doa => &theme.menu_doa,
            Self::Materi => &theme.menu_materi,
            Self::Kompetisi => &theme.menu_kompetisi,
        }
    }

    /// The identifier accepted by [`Page::from_str`].
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Lafal => "lafal",
            Self::Doa => "doa",
            Self::Materi => "materi",
            Self::Kompetisi => "kompetisi",
        }
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|page| page.slug() == wanted)
            .ok_or_else(|| format!("unknown page: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_kompetisi_resets_competition() {
        let resetting: Vec<Page> = Page::ALL
            .into_iter()
            .filter(|page| page.resets_competition())
            .collect();
        assert_eq!(resetting, vec![Page::Kompetisi]);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Kompetisi".parse::<Page>().unwrap(), Page::Kompetisi);
        assert_eq!(" doa ".parse::<Page>().unwrap(), Page::Doa);
        assert!("settings".parse::<Page>().is_err());
    }

    #[test]
    fn test_title_follows_theme() {
        let theme = Theme {
            menu_materi: "Belajar".to_owned(),
            ..Theme::default()
        };
        assert_eq!(Page::Materi.title(&theme), "Belajar");
        assert_eq!(Page::Home.title(&theme), Theme::default().app_title);
    }
}
