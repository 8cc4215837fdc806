//! Forward geocoding via OpenWeatherMap's direct geocoding endpoint

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::ForwardGeocoder;
use crate::models::Coordinate;
use crate::upstream::get_json;
use crate::weather::OpenWeatherMapClient;

#[derive(Debug, Deserialize)]
struct DirectGeocodingResult {
    name: Option<String>,
    lat: f64,
    lon: f64,
    country: Option<String>,
}

#[async_trait]
impl ForwardGeocoder for OpenWeatherMapClient {
    #[instrument(skip(self))]
    async fn geocode_place(&self, name: &str) -> crate::Result<Option<Coordinate>> {
        let url = format!(
            "{}/geo/1.0/direct?q={}&limit=1&appid={}",
            self.base_url(),
            urlencoding::encode(name),
            urlencoding::encode(self.api_key())
        );

        let results: Vec<DirectGeocodingResult> =
            get_json(self.client(), &url, "OpenWeatherMap geocoding").await?;

        let Some(best) = results.into_iter().next() else {
            warn!("No results found for location '{}'", name);
            return Ok(None);
        };

        debug!(
            "Geocoded '{}' to {} ({}) at ({:.4}, {:.4})",
            name,
            best.name.as_deref().unwrap_or("?"),
            best.country.as_deref().unwrap_or("?"),
            best.lat,
            best.lon
        );

        let coord = Coordinate::new(best.lat, best.lon)?;
        info!("Found location for '{}': {}", name, coord.format_coordinates());
        Ok(Some(coord))
    }
}
