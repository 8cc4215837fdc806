//! Data models for the WeatherMap application
//!
//! All of these are request-scoped: they are built from one round of
//! upstream responses and dropped once the report is rendered.
//! - Coordinate: a validated WGS84 point
//! - Weather: current conditions and forecast samples
//! - Place: reverse-geocoded place name with fallbacks

pub mod coordinate;
pub mod place;
pub mod weather;

pub use coordinate::Coordinate;
pub use place::{AddressFields, PlaceInfo};
pub use weather::{CurrentWeather, ForecastEntry};
