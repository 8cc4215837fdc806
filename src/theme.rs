//! Light/dark theme toggle

use serde::Serialize;

use crate::map::{MapSurface, TileLayerKind};
use crate::page::PageState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The toggle is a checkbox: checked means dark
    #[must_use]
    pub fn from_checked(checked: bool) -> Self {
        if checked { Theme::Dark } else { Theme::Light }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    #[must_use]
    pub fn tile_layer(self) -> TileLayerKind {
        match self {
            Theme::Light => TileLayerKind::Light,
            Theme::Dark => TileLayerKind::Dark,
        }
    }

    /// Text shown next to the toggle
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light Mode",
            Theme::Dark => "Dark Mode",
        }
    }
}

/// Apply the toggle state to the map and the page chrome
pub fn set_theme(checked: bool, map: &mut MapSurface, page: &mut PageState) -> Theme {
    let theme = Theme::from_checked(checked);
    map.set_active_layer(theme.tile_layer());
    page.theme = theme;
    page.body_dark_mode = theme.is_dark();
    page.info.dark_mode = theme.is_dark();
    page.toggle_label = theme.label().to_string();
    tracing::debug!("Theme set to {:?}", theme);
    theme
}
