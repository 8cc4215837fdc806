//! Application context: the providers plus the map and page state they feed
//!
//! One `AppContext` lives for the whole server process and is handed to
//! every request handler. State is locked only for short synchronous
//! mutations, never across an upstream call.

use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::config::WeatherMapConfig;
use crate::geocoding::{ForwardGeocoder, NominatimClient, ReverseGeocoder};
use crate::map::{MapSurface, MapView, Marker, TileLayer, TileLayerKind};
use crate::models::Coordinate;
use crate::page::{InfoPanel, PageState};
use crate::theme::{self, Theme};
use crate::weather::{OpenWeatherMapClient, WeatherSource};

/// Mutable UI state shared by all handlers
#[derive(Debug)]
pub struct UiState {
    pub map: MapSurface,
    pub page: PageState,
    /// Generation of the newest run that reached the page
    pub(crate) last_committed: u64,
}

pub struct AppContext {
    pub(crate) config: WeatherMapConfig,
    pub(crate) weather: Arc<dyn WeatherSource>,
    pub(crate) forward: Arc<dyn ForwardGeocoder>,
    pub(crate) reverse: Arc<dyn ReverseGeocoder>,
    pub(crate) state: RwLock<UiState>,
    /// Last generation handed out to a location run
    pub(crate) generation: AtomicU64,
}

/// Serializable copy of everything the browser needs to draw the page
#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot {
    pub view: MapView,
    pub active_layer: TileLayerKind,
    pub tile_layers: Vec<TileLayer>,
    pub markers: Vec<Marker>,
    pub theme: Theme,
    pub body_dark_mode: bool,
    pub toggle_label: String,
    pub info: InfoPanel,
}

impl AppContext {
    /// Build a context from explicit providers
    pub fn new(
        config: WeatherMapConfig,
        weather: Arc<dyn WeatherSource>,
        forward: Arc<dyn ForwardGeocoder>,
        reverse: Arc<dyn ReverseGeocoder>,
    ) -> Self {
        let view = MapView {
            center: Coordinate {
                lat: config.map.default_latitude,
                lon: config.map.default_longitude,
            },
            zoom: config.map.default_zoom,
        };
        let state = UiState {
            map: MapSurface::new(view, config.map.marker_policy),
            page: PageState::default(),
            last_committed: 0,
        };

        Self {
            config,
            weather,
            forward,
            reverse,
            state: RwLock::new(state),
            generation: AtomicU64::new(0),
        }
    }

    /// Build a context wired to OpenWeatherMap and Nominatim
    pub fn from_config(config: WeatherMapConfig) -> anyhow::Result<Self> {
        let owm = Arc::new(OpenWeatherMapClient::from_config(&config)?);
        let nominatim = Arc::new(NominatimClient::from_config(&config)?);
        Ok(Self::new(config, owm.clone(), owm, nominatim))
    }

    #[must_use]
    pub fn config(&self) -> &WeatherMapConfig {
        &self.config
    }

    /// Theme toggle handler
    pub async fn set_theme(&self, checked: bool) -> Theme {
        let mut state = self.state.write().await;
        let UiState { map, page, .. } = &mut *state;
        theme::set_theme(checked, map, page)
    }

    pub async fn page(&self) -> PageState {
        self.state.read().await.page.clone()
    }

    pub async fn snapshot(&self) -> StateSnapshot {
        let state = self.state.read().await;
        StateSnapshot {
            view: state.map.view(),
            active_layer: state.map.active_layer(),
            tile_layers: vec![TileLayerKind::Light.layer(), TileLayerKind::Dark.layer()],
            markers: state.map.markers().to_vec(),
            theme: state.page.theme,
            body_dark_mode: state.page.body_dark_mode,
            toggle_label: state.page.toggle_label.clone(),
            info: state.page.info.clone(),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory providers for exercising the orchestration without HTTP

    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::models::{CurrentWeather, ForecastEntry, PlaceInfo};
    use crate::{ErrorCode, WeatherMapError};

    #[derive(Default)]
    pub struct FakeProviders {
        pub current: Option<CurrentWeather>,
        pub forecast: Option<Vec<ForecastEntry>>,
        pub places: HashMap<String, Coordinate>,
        pub search_fails: bool,
        pub place: Option<PlaceInfo>,
        /// Per-latitude delay so tests can force out-of-order completion
        pub delays: Mutex<HashMap<i64, Duration>>,
    }

    fn unavailable() -> WeatherMapError {
        WeatherMapError::api("unavailable", ErrorCode::ApiNetworkError)
    }

    impl FakeProviders {
        async fn maybe_delay(&self, coord: Coordinate) {
            let delay = self
                .delays
                .lock()
                .unwrap()
                .get(&(coord.lat as i64))
                .copied();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
        }
    }

    #[async_trait]
    impl WeatherSource for FakeProviders {
        async fn fetch_current_weather(&self, coord: Coordinate) -> crate::Result<CurrentWeather> {
            self.maybe_delay(coord).await;
            self.current.clone().ok_or_else(unavailable)
        }

        async fn fetch_forecast(&self, _coord: Coordinate) -> crate::Result<Vec<ForecastEntry>> {
            self.forecast.clone().ok_or_else(unavailable)
        }
    }

    #[async_trait]
    impl ForwardGeocoder for FakeProviders {
        async fn geocode_place(&self, name: &str) -> crate::Result<Option<Coordinate>> {
            if self.search_fails {
                return Err(unavailable());
            }
            Ok(self.places.get(name).copied())
        }
    }

    #[async_trait]
    impl ReverseGeocoder for FakeProviders {
        async fn reverse_geocode(&self, _coord: Coordinate, provider_name: Option<&str>) -> PlaceInfo {
            self.place
                .clone()
                .unwrap_or_else(|| PlaceInfo::unresolved(provider_name))
        }
    }

    pub fn sample_current(description: &str) -> CurrentWeather {
        CurrentWeather {
            temperature: 21.0,
            humidity: 60.0,
            wind_speed: 2.5,
            pressure: 1012.0,
            description: description.to_string(),
            sunrise: 1_717_213_620,
            sunset: 1_717_270_000,
            name: Some("Provider Town".to_string()),
        }
    }

    pub fn sample_forecast() -> Vec<ForecastEntry> {
        (0..40)
            .map(|i| ForecastEntry {
                timestamp: 1_717_200_000 + i * 3 * 3600,
                temperature: 15.0 + i as f64 / 10.0,
                description: "scattered clouds".to_string(),
            })
            .collect()
    }

    pub fn context_with(providers: FakeProviders, config: WeatherMapConfig) -> AppContext {
        let providers = Arc::new(providers);
        AppContext::new(config, providers.clone(), providers.clone(), providers)
    }

    pub fn healthy() -> FakeProviders {
        FakeProviders {
            current: Some(sample_current("broken clouds")),
            forecast: Some(sample_forecast()),
            ..FakeProviders::default()
        }
    }
}
