//! Reverse geocoding via Nominatim (OpenStreetMap)

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use super::ReverseGeocoder;
use crate::config::WeatherMapConfig;
use crate::models::{AddressFields, Coordinate, PlaceInfo};
use crate::upstream::{build_client, get_json};

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<AddressFields>,
}

/// Nominatim `reverse` client
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &WeatherMapConfig) -> anyhow::Result<Self> {
        let client = build_client(
            config.weather.timeout_seconds,
            &config.geocoding.user_agent,
        )?;
        Ok(Self::new(client, config.geocoding.reverse_base_url.clone()))
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimClient {
    #[instrument(skip(self), fields(lat = coord.lat, lon = coord.lon))]
    async fn reverse_geocode(&self, coord: Coordinate, provider_name: Option<&str>) -> PlaceInfo {
        let url = format!(
            "{}/reverse?format=jsonv2&lat={}&lon={}",
            self.base_url, coord.lat, coord.lon
        );

        let address = match get_json::<NominatimResponse>(&self.client, &url, "Nominatim").await {
            Ok(body) => body.address.unwrap_or_default(),
            Err(e) => {
                warn!("Reverse geocoding failed, using fallback names: {}", e);
                AddressFields::default()
            }
        };

        let place = PlaceInfo::resolve(address, provider_name);
        info!("Reverse geocoded to: {}", place.display_name());
        place
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> NominatimClient {
        NominatimClient::new(build_client(5, "test").unwrap(), server.uri())
    }

    fn coord() -> Coordinate {
        Coordinate::new(19.076, 72.8777).unwrap()
    }

    #[tokio::test]
    async fn test_reverse_geocode_full_address() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .and(query_param("format", "jsonv2"))
            .and(query_param("lat", "19.076"))
            .and(query_param("lon", "72.8777"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "display_name": "Mumbai, Maharashtra, India",
                "address": {"city": "Mumbai", "state": "Maharashtra", "country": "India", "country_code": "in"}
            })))
            .mount(&mock_server)
            .await;

        let place = client_for(&mock_server).reverse_geocode(coord(), None).await;
        assert_eq!(place.display_name(), "Mumbai, Maharashtra, India");
    }

    #[tokio::test]
    async fn test_reverse_geocode_uses_provider_name() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "address": {"state": "Maharashtra", "country": "India"}
            })))
            .mount(&mock_server)
            .await;

        let place = client_for(&mock_server)
            .reverse_geocode(coord(), Some("Bombay"))
            .await;
        assert_eq!(place.city, "Bombay");
        assert_eq!(place.state, "Maharashtra");
    }

    #[tokio::test]
    async fn test_reverse_geocode_error_degrades() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let place = client_for(&mock_server).reverse_geocode(coord(), None).await;
        assert_eq!(place, PlaceInfo::unresolved(None));
    }

    #[tokio::test]
    async fn test_reverse_geocode_without_address_object() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "error": "Unable to geocode"
            })))
            .mount(&mock_server)
            .await;

        let place = client_for(&mock_server)
            .reverse_geocode(coord(), Some("Ocean"))
            .await;
        assert_eq!(place.city, "Ocean");
        assert_eq!(place.country, "Unknown Country");
    }
}
