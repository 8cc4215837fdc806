//! `WeatherMap` - Interactive weather map
//!
//! Click a point on the map or search a place by name to see current
//! conditions and a 5-day forecast for it. The server keeps the map and page
//! state; the browser only draws what `/api/state` describes.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod geocoding;
pub mod handler;
pub mod input;
pub mod logging;
pub mod map;
pub mod models;
pub mod page;
pub mod report;
pub mod summary;
pub mod theme;
pub mod upstream;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use app::{AppContext, StateSnapshot};
pub use config::{MarkerPolicy, WeatherMapConfig};
pub use error::{ErrorCode, WeatherMapError};
pub use geocoding::{ForwardGeocoder, NominatimClient, ReverseGeocoder};
pub use handler::LocationOutcome;
pub use input::{Notice, SearchOutcome};
pub use models::{Coordinate, CurrentWeather, ForecastEntry, PlaceInfo};
pub use report::WeatherReport;
pub use theme::Theme;
pub use weather::{OpenWeatherMapClient, WeatherSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherMapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
