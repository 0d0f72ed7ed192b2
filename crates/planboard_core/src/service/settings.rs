//! Appearance settings persistence.
//!
//! # Invariants
//! - The theme is stored as its bare name under `THEME_KEY`.
//! - Unknown or unreadable values fall back to the default theme.

use crate::model::theme::Theme;
use crate::repo::kv_repo::{KvRepository, RepoResult};
use log::{info, warn};

/// Storage key of the selected theme name.
pub const THEME_KEY: &str = "selectedTheme";

pub struct SettingsService<R: KvRepository> {
    repo: R,
}

impl<R: KvRepository> SettingsService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the persisted theme, or `Theme::default()`.
    pub fn load_theme(&self) -> Theme {
        match self.repo.get(THEME_KEY) {
            Ok(Some(name)) => Theme::from_name(name.trim()).unwrap_or_else(|| {
                warn!("event=theme_load module=settings status=skip reason=unknown_theme");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(err) => {
                warn!("event=theme_load module=settings status=error error={err}");
                Theme::default()
            }
        }
    }

    /// Persists the selected theme.
    pub fn save_theme(&self, theme: Theme) -> RepoResult<()> {
        self.repo.put(THEME_KEY, theme.as_str())?;
        info!("event=theme_save module=settings status=ok theme={theme}");
        Ok(())
    }
}
