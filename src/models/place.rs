//! Reverse-geocoded place model

use serde::{Deserialize, Serialize};

pub const UNKNOWN_CITY: &str = "Unknown";
pub const UNKNOWN_STATE: &str = "Unknown State";
pub const UNKNOWN_COUNTRY: &str = "Unknown Country";

/// Optional address parts as returned by a reverse geocoder
#[derive(Debug, Default, Clone, Deserialize)]
pub struct AddressFields {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

/// City, region and country for a coordinate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceInfo {
    pub city: String,
    pub state: String,
    pub country: String,
}

/// Empty strings count as missing
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl PlaceInfo {
    /// Resolve a place from address parts.
    ///
    /// City falls back through town, village and the weather provider's own
    /// place name before settling on "Unknown".
    #[must_use]
    pub fn resolve(address: AddressFields, provider_name: Option<&str>) -> Self {
        let city = present(address.city)
            .or_else(|| present(address.town))
            .or_else(|| present(address.village))
            .or_else(|| present(provider_name.map(str::to_string)))
            .unwrap_or_else(|| UNKNOWN_CITY.to_string());

        Self {
            city,
            state: present(address.state).unwrap_or_else(|| UNKNOWN_STATE.to_string()),
            country: present(address.country).unwrap_or_else(|| UNKNOWN_COUNTRY.to_string()),
        }
    }

    /// Place with no address information at all
    #[must_use]
    pub fn unresolved(provider_name: Option<&str>) -> Self {
        Self::resolve(AddressFields::default(), provider_name)
    }

    /// "city, state, country"
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{}, {}, {}", self.city, self.state, self.country)
    }
}
