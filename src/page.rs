//! Page chrome state and the HTML shell around the map

use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde::Serialize;

use crate::theme::Theme;

const LEAFLET_VERSION: &str = "1.9.4";
pub const DARK_MODE_CLASS: &str = "dark-mode";

/// The side panel holding the weather report
#[derive(Debug, Clone, Default, Serialize)]
pub struct InfoPanel {
    /// Rendered report, `None` until the first location is shown
    pub html: Option<String>,
    pub dark_mode: bool,
}

/// Everything on the page that is not the map itself
#[derive(Debug, Clone, Serialize)]
pub struct PageState {
    pub theme: Theme,
    pub body_dark_mode: bool,
    pub toggle_label: String,
    pub info: InfoPanel,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            body_dark_mode: false,
            toggle_label: Theme::Light.label().to_string(),
            info: InfoPanel::default(),
        }
    }
}

/// Full page with the search box, theme toggle, map canvas and info panel
#[must_use]
pub fn render_shell(page: &PageState) -> Markup {
    let leaflet = format!("https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist");
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Weather Map" }
                link rel="stylesheet" href=(format!("{leaflet}/leaflet.css"));
                link rel="stylesheet" href="/style.css";
            }
            body class=[page.body_dark_mode.then_some(DARK_MODE_CLASS)] {
                div class="controls" {
                    input type="text" id="place" placeholder="Enter a place name";
                    button id="search-btn" { "Search" }
                    label class="switch" {
                        input type="checkbox" id="themeToggle" checked[page.theme.is_dark()];
                        span id="toggleLabel" { (page.toggle_label) }
                    }
                }
                div id="map" {}
                div id="info" class=[page.info.dark_mode.then_some(DARK_MODE_CLASS)] {
                    @if let Some(report) = &page.info.html {
                        (PreEscaped(report))
                    } @else {
                        "Click on the map or search for a place to see the weather."
                    }
                }
                script src=(format!("{leaflet}/leaflet.js")) {}
                script src="/app.js" {}
            }
        }
    }
}
