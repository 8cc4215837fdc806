//! Weather report view-model and its HTML and plain-text renderings
//!
//! Upstream text (place names, descriptions) only reaches the page through
//! maud, which escapes it. The labels are the only markup.

use std::fmt::Write as _;

use chrono::{DateTime, Local, TimeZone, Utc};
use maud::{Markup, html};
use serde::Serialize;

use crate::models::{CurrentWeather, ForecastEntry, PlaceInfo};
use crate::summary::{pictogram_for, summarize_forecast};

const DATE_FORMAT: &str = "%-m/%-d/%Y";
const TIME_FORMAT: &str = "%-I:%M:%S %p";

/// One line of the 5-day list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastLine {
    pub date: String,
    pub temperature: f64,
    pub description: String,
    pub pictogram: &'static str,
}

/// Everything shown for one location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub place: PlaceInfo,
    pub pictogram: &'static str,
    pub temperature: f64,
    pub description: String,
    pub humidity: f64,
    pub wind_speed: f64,
    pub pressure: f64,
    pub sunrise: String,
    pub sunset: String,
    pub forecast: Vec<ForecastLine>,
}

fn time_of_day<Tz: TimeZone>(time: Option<DateTime<Utc>>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.map_or_else(
        || "n/a".to_string(),
        |t| t.with_timezone(tz).format(TIME_FORMAT).to_string(),
    )
}

impl WeatherReport {
    /// Build the report in the server's local time zone
    #[must_use]
    pub fn build_local(
        place: PlaceInfo,
        current: &CurrentWeather,
        forecast: &[ForecastEntry],
    ) -> Self {
        Self::build(place, current, forecast, &Local)
    }

    /// Build the report, formatting dates and times in `tz`
    #[must_use]
    pub fn build<Tz: TimeZone>(
        place: PlaceInfo,
        current: &CurrentWeather,
        forecast: &[ForecastEntry],
        tz: &Tz,
    ) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let forecast = summarize_forecast(forecast, tz)
            .into_iter()
            .map(|day| ForecastLine {
                date: day.date.format(DATE_FORMAT).to_string(),
                temperature: day.entry.temperature,
                pictogram: pictogram_for(&day.entry.description),
                description: day.entry.description,
            })
            .collect();

        Self {
            place,
            pictogram: pictogram_for(&current.description),
            temperature: current.temperature,
            description: current.description.clone(),
            humidity: current.humidity,
            wind_speed: current.wind_speed,
            pressure: current.pressure,
            sunrise: time_of_day(current.sunrise_at(), tz),
            sunset: time_of_day(current.sunset_at(), tz),
            forecast,
        }
    }

    /// Popup body for the map marker
    #[must_use]
    pub fn popup_html(&self) -> Markup {
        html! {
            b { "Location:" } " " (self.place.display_name()) " " (self.pictogram)
        }
    }

    /// Body of the info panel
    #[must_use]
    pub fn to_html(&self) -> Markup {
        html! {
            b { "Location:" } " " (self.place.display_name()) " " (self.pictogram) br;
            b { "Temperature:" } " " (self.temperature) "°C" br;
            b { "Weather:" } " " (self.description) br;
            b { "Humidity:" } " " (self.humidity) "%" br;
            b { "Wind Speed:" } " " (self.wind_speed) " m/s" br;
            b { "Pressure:" } " " (self.pressure) " hPa" br;
            b { "Sunrise:" } " " (self.sunrise) br;
            b { "Sunset:" } " " (self.sunset) br;
            hr;
            b { "5-Day Forecast (around midday):" } br;
            @for (i, line) in self.forecast.iter().enumerate() {
                @if i > 0 { br; }
                b { (line.date) ":" } " " (line.temperature) "°C, " (line.description) " " (line.pictogram)
            }
        }
    }

    /// Plain-text rendering for the terminal
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Location:    {} {}", self.place.display_name(), self.pictogram);
        let _ = writeln!(out, "Temperature: {}°C", self.temperature);
        let _ = writeln!(out, "Weather:     {}", self.description);
        let _ = writeln!(out, "Humidity:    {}%", self.humidity);
        let _ = writeln!(out, "Wind Speed:  {} m/s", self.wind_speed);
        let _ = writeln!(out, "Pressure:    {} hPa", self.pressure);
        let _ = writeln!(out, "Sunrise:     {}", self.sunrise);
        let _ = writeln!(out, "Sunset:      {}", self.sunset);
        let _ = writeln!(out);
        let _ = writeln!(out, "5-Day Forecast (around midday):");
        for line in &self.forecast {
            let _ = writeln!(
                out,
                "  {}: {}°C, {} {}",
                line.date, line.temperature, line.description, line.pictogram
            );
        }
        out
    }
}
