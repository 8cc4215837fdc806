//! Weather retrieval
//!
//! The orchestrator only sees the [`WeatherSource`] trait so that tests and
//! alternative providers can stand in for OpenWeatherMap.

use async_trait::async_trait;

use crate::models::{Coordinate, CurrentWeather, ForecastEntry};

pub mod openweathermap;

pub use openweathermap::OpenWeatherMapClient;

#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Current conditions at `coord`
    async fn fetch_current_weather(&self, coord: Coordinate) -> crate::Result<CurrentWeather>;

    /// 5-day forecast at 3-hour resolution, in provider order
    async fn fetch_forecast(&self, coord: Coordinate) -> crate::Result<Vec<ForecastEntry>>;
}
