//! Forward and reverse geocoding
//!
//! Forward lookups go to OpenWeatherMap's geocoder, reverse lookups to
//! Nominatim. They are separate traits because they are separate providers
//! with different failure contracts: a forward miss is reported to the user,
//! a reverse miss silently degrades to default names.

use async_trait::async_trait;

use crate::models::{Coordinate, PlaceInfo};

pub mod nominatim;
pub mod openweathermap;

pub use nominatim::NominatimClient;

#[async_trait]
pub trait ForwardGeocoder: Send + Sync {
    /// Best match for a free-text place name, `None` when nothing matched
    async fn geocode_place(&self, name: &str) -> crate::Result<Option<Coordinate>>;
}

#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Place for a coordinate. Never fails: missing data falls back to
    /// `provider_name` and then to the "Unknown" defaults.
    async fn reverse_geocode(&self, coord: Coordinate, provider_name: Option<&str>) -> PlaceInfo;
}
