//! Location handler: from a coordinate to a marker and a weather report
//!
//! A run fetches current weather and the forecast, resolves the place name,
//! then renders. If either weather call fails the run is aborted and the page
//! is left alone. Runs are not cancelled when a newer one starts; instead each
//! run carries a generation number and a run that finishes after a newer one
//! has already rendered is dropped.

use std::sync::atomic::Ordering;

use tracing::{error, info, instrument, warn};

use crate::app::AppContext;
use crate::geocoding::ReverseGeocoder;
use crate::models::Coordinate;
use crate::report::WeatherReport;
use crate::weather::WeatherSource;

/// How a location run ended
#[derive(Debug, Clone, PartialEq)]
pub enum LocationOutcome {
    /// Marker placed and info panel updated
    Rendered(Box<WeatherReport>),
    /// Weather or forecast unavailable; nothing changed
    Aborted,
    /// A newer run rendered first; this result was discarded
    Superseded,
}

impl LocationOutcome {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationOutcome::Rendered(_) => "rendered",
            LocationOutcome::Aborted => "aborted",
            LocationOutcome::Superseded => "superseded",
        }
    }
}

/// Fetch everything for `coord` and build the report, `None` if the weather
/// provider could not deliver both current conditions and the forecast.
#[instrument(skip(weather, reverse), fields(lat = coord.lat, lon = coord.lon))]
pub async fn gather_report(
    weather: &dyn WeatherSource,
    reverse: &dyn ReverseGeocoder,
    coord: Coordinate,
) -> Option<WeatherReport> {
    let (current, forecast) = tokio::join!(
        weather.fetch_current_weather(coord),
        weather.fetch_forecast(coord)
    );

    let (current, forecast) = match (current, forecast) {
        (Ok(current), Ok(forecast)) => (current, forecast),
        (Err(e), _) => {
            error!("Error fetching weather data: {}", e);
            return None;
        }
        (_, Err(e)) => {
            error!("Error fetching forecast data: {}", e);
            return None;
        }
    };

    let place = reverse
        .reverse_geocode(coord, current.name.as_deref())
        .await;

    Some(WeatherReport::build_local(place, &current, &forecast))
}

impl AppContext {
    /// Run the full location flow for `coord` and update the page
    #[instrument(skip(self), fields(lat = coord.lat, lon = coord.lon))]
    pub async fn handle_location(&self, coord: Coordinate) -> LocationOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(report) = gather_report(self.weather.as_ref(), self.reverse.as_ref(), coord).await
        else {
            warn!("Run {} aborted for {}", generation, coord.format_coordinates());
            return LocationOutcome::Aborted;
        };

        let mut state = self.state.write().await;
        if generation < state.last_committed {
            warn!(
                "Run {} finished after run {}, discarding",
                generation, state.last_committed
            );
            return LocationOutcome::Superseded;
        }
        state.last_committed = generation;

        state
            .map
            .add_marker(coord, report.popup_html().into_string());
        state.page.info.html = Some(report.to_html().into_string());

        info!(
            "Run {} rendered {} at {}",
            generation,
            report.place.display_name(),
            coord.format_coordinates()
        );
        LocationOutcome::Rendered(Box::new(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::*;
    use crate::config::{MarkerPolicy, WeatherMapConfig};
    use crate::models::PlaceInfo;
    use crate::summary::{CLOUDS, RAIN};
    use std::sync::Arc;
    use std::time::Duration;

    fn coord(lat: f64) -> Coordinate {
        Coordinate::new(lat, 2.0).unwrap()
    }

    #[tokio::test]
    async fn test_render_places_marker_and_report() {
        let providers = FakeProviders {
            place: Some(PlaceInfo {
                city: "Paris".to_string(),
                state: "Île-de-France".to_string(),
                country: "France".to_string(),
            }),
            ..healthy()
        };
        let ctx = context_with(providers, WeatherMapConfig::default());

        let outcome = ctx.handle_location(coord(48.0)).await;
        let LocationOutcome::Rendered(report) = outcome else {
            panic!("expected a rendered report, got {outcome:?}");
        };
        assert_eq!(report.pictogram, CLOUDS);
        assert_eq!(report.forecast.len(), 5);

        let snapshot = ctx.snapshot().await;
        assert_eq!(snapshot.markers.len(), 1);
        assert!(snapshot.markers[0].popup_open);
        assert_eq!(
            snapshot.markers[0].popup,
            "<b>Location:</b> Paris, Île-de-France, France ☁️"
        );
        let info = snapshot.info.html.unwrap();
        assert!(info.contains("<b>Temperature:</b> 21°C"));
        assert!(info.contains("5-Day Forecast (around midday):"));
    }

    #[tokio::test]
    async fn test_reverse_fallback_uses_provider_name() {
        let ctx = context_with(healthy(), WeatherMapConfig::default());
        let LocationOutcome::Rendered(report) = ctx.handle_location(coord(10.0)).await else {
            panic!("expected a rendered report");
        };
        assert_eq!(report.place.city, "Provider Town");
        assert_eq!(report.place.state, "Unknown State");
    }

    #[tokio::test]
    async fn test_missing_weather_aborts_without_changes() {
        let providers = FakeProviders {
            current: None,
            ..healthy()
        };
        let ctx = context_with(providers, WeatherMapConfig::default());

        assert_eq!(ctx.handle_location(coord(1.0)).await, LocationOutcome::Aborted);
        let snapshot = ctx.snapshot().await;
        assert!(snapshot.markers.is_empty());
        assert!(snapshot.info.html.is_none());
    }

    #[tokio::test]
    async fn test_missing_forecast_aborts() {
        let providers = FakeProviders {
            forecast: None,
            ..healthy()
        };
        let ctx = context_with(providers, WeatherMapConfig::default());
        assert_eq!(ctx.handle_location(coord(1.0)).await, LocationOutcome::Aborted);
        assert!(ctx.snapshot().await.markers.is_empty());
    }

    #[tokio::test]
    async fn test_markers_accumulate_by_default() {
        let ctx = context_with(healthy(), WeatherMapConfig::default());
        ctx.handle_location(coord(1.0)).await;
        ctx.handle_location(coord(2.0)).await;
        assert_eq!(ctx.snapshot().await.markers.len(), 2);
    }

    #[tokio::test]
    async fn test_replace_policy_keeps_one_marker() {
        let mut config = WeatherMapConfig::default();
        config.map.marker_policy = MarkerPolicy::Replace;
        let ctx = context_with(healthy(), config);

        ctx.handle_location(coord(1.0)).await;
        ctx.handle_location(coord(2.0)).await;

        let snapshot = ctx.snapshot().await;
        assert_eq!(snapshot.markers.len(), 1);
        assert_eq!(snapshot.markers[0].coordinate, coord(2.0));
    }

    #[tokio::test]
    async fn test_stale_run_is_discarded() {
        let providers = healthy();
        providers
            .delays
            .lock()
            .unwrap()
            .insert(30, Duration::from_millis(200));
        let ctx = Arc::new(context_with(providers, WeatherMapConfig::default()));

        let slow_ctx = ctx.clone();
        let slow = tokio::spawn(async move { slow_ctx.handle_location(coord(30.0)).await });
        // let the slow run take its generation first
        tokio::time::sleep(Duration::from_millis(20)).await;
        let fast = ctx.handle_location(coord(40.0)).await;
        let slow = slow.await.unwrap();

        assert!(matches!(fast, LocationOutcome::Rendered(_)));
        assert_eq!(slow, LocationOutcome::Superseded);

        let snapshot = ctx.snapshot().await;
        assert_eq!(snapshot.markers.len(), 1);
        assert_eq!(snapshot.markers[0].coordinate, coord(40.0));
    }

    #[tokio::test]
    async fn test_gather_report_without_page() {
        let providers = FakeProviders {
            current: Some(sample_current("light rain")),
            ..healthy()
        };
        let report = gather_report(&providers, &providers, coord(5.0)).await.unwrap();
        assert_eq!(report.pictogram, RAIN);
    }
}
