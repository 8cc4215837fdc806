//! Weather data models and display helpers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions at a coordinate, metric units
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentWeather {
    /// Temperature in Celsius
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Atmospheric pressure in hPa
    pub pressure: f64,
    /// Human-readable description of weather conditions
    pub description: String,
    /// Sunrise, unix seconds
    pub sunrise: i64,
    /// Sunset, unix seconds
    pub sunset: i64,
    /// The provider's own name for the nearest place, if any
    pub name: Option<String>,
}

impl CurrentWeather {
    #[must_use]
    pub fn sunrise_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.sunrise, 0)
    }

    #[must_use]
    pub fn sunset_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.sunset, 0)
    }
}

/// One 3-hourly forecast sample
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastEntry {
    /// Sample time, unix seconds
    pub timestamp: i64,
    /// Temperature in Celsius
    pub temperature: f64,
    pub description: String,
}

impl ForecastEntry {
    #[must_use]
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}
