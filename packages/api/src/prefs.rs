//! Per-device presentation preferences. Only the color theme is stored;
//! it lives in its own well-known slot beside the tables.

use store::{Storage, StoreError};

/// Well-known slot holding the theme choice.
pub const THEME_SLOT: &str = "theme";

/// Color theme for the UI. Dark is the application default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// The value stored on device.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Parse a stored value; anything unrecognized falls back to dark.
    pub fn from_stored(value: &str) -> Theme {
        match value {
            "light" => Theme::Light,
            _ => Theme::Dark,
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Theme persistence over the `theme` slot.
pub struct Preferences<S: Storage> {
    storage: S,
}

impl<S: Storage> Preferences<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The stored theme, defaulting to dark when absent or unreadable.
    pub async fn theme(&self) -> Theme {
        match self.storage.read(THEME_SLOT).await {
            Ok(Some(value)) => Theme::from_stored(&value),
            Ok(None) => Theme::default(),
            Err(err) => {
                tracing::warn!(%err, "theme slot unreadable, using default");
                Theme::default()
            }
        }
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<(), StoreError> {
        self.storage.write(THEME_SLOT, theme.as_str()).await
    }

    /// Flip between dark and light, returning the new theme.
    pub async fn toggle_theme(&self) -> Result<Theme, StoreError> {
        let next = self.theme().await.toggled();
        self.set_theme(next).await?;
        Ok(next)
    }
}
