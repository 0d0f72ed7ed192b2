//! Appearance themes.

use std::fmt::{Display, Formatter};

/// Color palette handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub background: &'static str,
    pub text: &'static str,
    pub event_background: &'static str,
}

/// Closed set of selectable themes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Minimalist,
    Solaris,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Light, Theme::Dark, Theme::Minimalist, Theme::Solaris];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Minimalist => "minimalist",
            Self::Solaris => "solaris",
        }
    }

    /// Looks up a theme by its persisted name. Matching is exact.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|theme| theme.as_str() == name)
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                primary: "#3788d8",
                secondary: "#ff7f50",
                background: "#ffffff",
                text: "#333333",
                event_background: "#e0f7fa",
            },
            Self::Dark => Palette {
                primary: "#90caf9",
                secondary: "#ffab91",
                background: "#303030",
                text: "#ffffff",
                event_background: "#424242",
            },
            Self::Minimalist => Palette {
                primary: "#000000",
                secondary: "#555555",
                background: "#ffffff",
                text: "#000000",
                event_background: "#f5f5f5",
            },
            Self::Solaris => Palette {
                primary: "#ffcc00",
                secondary: "#ff6600",
                background: "#fff8e1",
                text: "#5d4037",
                event_background: "#ffe0b2",
            },
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Theme;

    #[test]
    fn from_name_round_trips_every_theme() {
        for theme in Theme::ALL {
            assert_eq!(Theme::from_name(theme.as_str()), Some(theme));
        }
    }

    #[test]
    fn from_name_is_case_sensitive() {
        assert_eq!(Theme::from_name("Dark"), None);
        assert_eq!(Theme::from_name(""), None);
    }
}
