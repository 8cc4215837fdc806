//! OpenWeatherMap client for current conditions and the 5-day forecast
//!
//! Both endpoints take `lat`, `lon`, `appid` and `units=metric`. Only the
//! fields the report needs are decoded; a response without a
//! `weather[0]` entry is rejected as invalid.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument};

use super::WeatherSource;
use crate::config::WeatherMapConfig;
use crate::models::{Coordinate, CurrentWeather, ForecastEntry};
use crate::upstream::{build_client, get_json};
use crate::{ErrorCode, WeatherMapError};

const PROVIDER: &str = "OpenWeatherMap";

/// Client for the OpenWeatherMap weather and geocoding APIs
#[derive(Debug, Clone)]
pub struct OpenWeatherMapClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherMapClient {
    /// Create a client against `base_url` (no trailing slash needed)
    pub fn new(client: Client, api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from configuration; fails when no API key is set
    pub fn from_config(config: &WeatherMapConfig) -> anyhow::Result<Self> {
        let api_key = config.require_api_key()?;
        let client = build_client(
            config.weather.timeout_seconds,
            &config.geocoding.user_agent,
        )?;
        Ok(Self::new(client, api_key, config.weather.base_url.clone()))
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    fn data_url(&self, endpoint: &str, coord: Coordinate) -> String {
        format!(
            "{}/data/2.5/{}?lat={}&lon={}&appid={}&units=metric",
            self.base_url,
            endpoint,
            coord.lat,
            coord.lon,
            urlencoding::encode(&self.api_key)
        )
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherMapClient {
    #[instrument(skip(self), fields(lat = coord.lat, lon = coord.lon))]
    async fn fetch_current_weather(&self, coord: Coordinate) -> crate::Result<CurrentWeather> {
        let url = self.data_url("weather", coord);
        let response: CurrentResponse = get_json(&self.client, &url, PROVIDER).await?;
        let current = CurrentWeather::try_from(response).map_err(|e| with_coordinates(e, coord))?;

        info!(
            "Current weather at {}: {}°C, {}",
            coord.format_coordinates(),
            current.temperature,
            current.description
        );
        Ok(current)
    }

    #[instrument(skip(self), fields(lat = coord.lat, lon = coord.lon))]
    async fn fetch_forecast(&self, coord: Coordinate) -> crate::Result<Vec<ForecastEntry>> {
        let url = self.data_url("forecast", coord);
        let response: ForecastResponse = get_json(&self.client, &url, PROVIDER).await?;

        let entries = response
            .list
            .into_iter()
            .map(ForecastEntry::try_from)
            .collect::<crate::Result<Vec<_>>>()
            .map_err(|e| with_coordinates(e, coord))?;

        info!(
            "Retrieved forecast with {} data points for {}",
            entries.len(),
            coord.format_coordinates()
        );
        Ok(entries)
    }
}

fn with_coordinates(err: WeatherMapError, coord: Coordinate) -> WeatherMapError {
    match err {
        WeatherMapError::Api {
            message,
            code,
            mut context,
        } => {
            context.insert("coordinates".to_string(), coord.format_coordinates());
            WeatherMapError::Api {
                message,
                code,
                context,
            }
        }
        other => other,
    }
}

fn missing_condition(what: &str) -> WeatherMapError {
    WeatherMapError::api_with_context(
        format!("{PROVIDER} {what} response has no weather condition"),
        ErrorCode::ApiInvalidResponse,
        HashMap::new(),
    )
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct SysBlock {
    sunrise: i64,
    sunset: i64,
}

/// `GET /data/2.5/weather`
#[derive(Debug, Deserialize)]
struct CurrentResponse {
    main: MainBlock,
    wind: WindBlock,
    weather: Vec<Condition>,
    sys: SysBlock,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastItem {
    dt: i64,
    main: ForecastMain,
    weather: Vec<Condition>,
}

/// `GET /data/2.5/forecast`
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<ForecastItem>,
}

impl TryFrom<CurrentResponse> for CurrentWeather {
    type Error = WeatherMapError;

    fn try_from(response: CurrentResponse) -> Result<Self, Self::Error> {
        let description = response
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| missing_condition("current weather"))?
            .description;

        Ok(CurrentWeather {
            temperature: response.main.temp,
            humidity: response.main.humidity,
            wind_speed: response.wind.speed,
            pressure: response.main.pressure,
            description,
            sunrise: response.sys.sunrise,
            sunset: response.sys.sunset,
            name: response.name,
        })
    }
}

impl TryFrom<ForecastItem> for ForecastEntry {
    type Error = WeatherMapError;

    fn try_from(item: ForecastItem) -> Result<Self, Self::Error> {
        let description = item
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| missing_condition("forecast"))?
            .description;

        Ok(ForecastEntry {
            timestamp: item.dt,
            temperature: item.main.temp,
            description,
        })
    }
}
