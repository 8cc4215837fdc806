//! User input handlers: search submit and map click

use serde::Serialize;
use tracing::{error, info, instrument};

use crate::app::AppContext;
use crate::handler::LocationOutcome;
use crate::models::Coordinate;

/// Blocking notices shown to the user instead of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    EmptyQuery,
    NotFound,
    SearchFailed,
}

impl Notice {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Notice::EmptyQuery => "Please enter a place name to search.",
            Notice::NotFound => "Location not found. Please try again.",
            Notice::SearchFailed => "An error occurred while searching. Please try again.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The place was found, the map recentered and the location handled
    Located {
        coordinate: Coordinate,
        outcome: LocationOutcome,
    },
    /// Nothing changed; tell the user why
    Notice(Notice),
}

impl AppContext {
    /// Search box submit: geocode, recenter, then handle the location
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> SearchOutcome {
        let query = query.trim();
        if query.is_empty() {
            return SearchOutcome::Notice(Notice::EmptyQuery);
        }

        let coordinate = match self.forward.geocode_place(query).await {
            Ok(Some(coordinate)) => coordinate,
            Ok(None) => return SearchOutcome::Notice(Notice::NotFound),
            Err(e) => {
                error!("Error searching for '{}': {}", query, e);
                return SearchOutcome::Notice(Notice::SearchFailed);
            }
        };

        let zoom = self.config.map.search_zoom;
        self.state.write().await.map.set_view(coordinate, zoom);
        info!(
            "Recentered map on '{}' at {} (zoom {})",
            query,
            coordinate.format_coordinates(),
            zoom
        );

        let outcome = self.handle_location(coordinate).await;
        SearchOutcome::Located {
            coordinate,
            outcome,
        }
    }

    /// Map click: handle the clicked point without moving the map
    pub async fn click(&self, coordinate: Coordinate) -> LocationOutcome {
        self.handle_location(coordinate).await
    }
}
