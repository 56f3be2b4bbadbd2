use crate::prefs::{PreferenceStore, keys};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Toggle button glyph: offers the opposite theme.
    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Light => "\u{1F319}",
            Theme::Dark => "\u{2600}\u{FE0F}",
        }
    }
}

/// Light/dark switch backed by the preference store.
#[derive(Debug, Clone, Copy)]
pub struct ThemeToggle {
    theme: Theme,
}

impl ThemeToggle {
    pub fn load(prefs: &impl PreferenceStore) -> Self {
        let theme = prefs
            .get(keys::THEME)
            .and_then(|v| Theme::parse(&v))
            .unwrap_or_default();
        Self { theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle(&mut self, prefs: &mut impl PreferenceStore) -> Theme {
        self.set(self.theme.flipped(), prefs)
    }

    pub fn set(&mut self, theme: Theme, prefs: &mut impl PreferenceStore) -> Theme {
        self.theme = theme;
        prefs.set(keys::THEME, theme.as_str());
        theme
    }
}
