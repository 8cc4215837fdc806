//! Map surface state: view, tile layers and markers
//!
//! The browser draws the map with Leaflet; this is the authoritative copy of
//! what it should show. Tile sources are CARTO basemaps with the usual
//! `a`-`d` subdomain load balancing.

use serde::Serialize;

use crate::config::MarkerPolicy;
use crate::models::Coordinate;

const OSM_CARTO_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/\">CARTO</a>";

/// The two basemaps the theme toggle switches between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TileLayerKind {
    Light,
    Dark,
}

/// Everything Leaflet needs to build a tile layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileLayer {
    pub kind: TileLayerKind,
    pub url_template: &'static str,
    pub attribution: &'static str,
    pub subdomains: &'static str,
    pub max_zoom: u8,
}

impl TileLayerKind {
    #[must_use]
    pub fn layer(self) -> TileLayer {
        let url_template = match self {
            TileLayerKind::Light => {
                "https://{s}.basemaps.cartocdn.com/rastertiles/voyager_labels_under/{z}/{x}/{y}{r}.png"
            }
            TileLayerKind::Dark => "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png",
        };

        TileLayer {
            kind: self,
            url_template,
            attribution: OSM_CARTO_ATTRIBUTION,
            subdomains: "abcd",
            max_zoom: 19,
        }
    }
}

/// Center and zoom of the visible map
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
}

/// A pin on the map with its popup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: u64,
    pub coordinate: Coordinate,
    /// Popup body, already escaped HTML
    pub popup: String,
    pub popup_open: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapSurface {
    view: MapView,
    active_layer: TileLayerKind,
    markers: Vec<Marker>,
    #[serde(skip)]
    next_marker_id: u64,
    #[serde(skip)]
    marker_policy: MarkerPolicy,
}

impl MapSurface {
    /// A map showing the light basemap at `view`, with no markers
    #[must_use]
    pub fn new(view: MapView, marker_policy: MarkerPolicy) -> Self {
        Self {
            view,
            active_layer: TileLayerKind::Light,
            markers: Vec::new(),
            next_marker_id: 1,
            marker_policy,
        }
    }

    #[must_use]
    pub fn view(&self) -> MapView {
        self.view
    }

    pub fn set_view(&mut self, center: Coordinate, zoom: u8) {
        self.view = MapView { center, zoom };
    }

    #[must_use]
    pub fn active_layer(&self) -> TileLayerKind {
        self.active_layer
    }

    /// Swap the basemap; the previous layer is removed
    pub fn set_active_layer(&mut self, kind: TileLayerKind) {
        self.active_layer = kind;
    }

    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Place a marker and open its popup, returning the marker id.
    ///
    /// Only one popup is open at a time. Under [`MarkerPolicy::Replace`] the
    /// existing markers are removed first.
    pub fn add_marker(&mut self, coordinate: Coordinate, popup: String) -> u64 {
        match self.marker_policy {
            MarkerPolicy::Accumulate => {
                for marker in &mut self.markers {
                    marker.popup_open = false;
                }
            }
            MarkerPolicy::Replace => self.markers.clear(),
        }

        let id = self.next_marker_id;
        self.next_marker_id += 1;
        self.markers.push(Marker {
            id,
            coordinate,
            popup,
            popup_open: true,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(policy: MarkerPolicy) -> MapSurface {
        MapSurface::new(
            MapView {
                center: Coordinate { lat: 20.0, lon: 77.0 },
                zoom: 5,
            },
            policy,
        )
    }

    fn point(lat: f64) -> Coordinate {
        Coordinate { lat, lon: 10.0 }
    }

    #[test]
    fn test_new_surface_defaults() {
        let map = surface(MarkerPolicy::Accumulate);
        assert_eq!(map.active_layer(), TileLayerKind::Light);
        assert!(map.markers().is_empty());
        assert_eq!(map.view().zoom, 5);
    }

    #[test]
    fn test_markers_accumulate() {
        let mut map = surface(MarkerPolicy::Accumulate);
        let first = map.add_marker(point(1.0), "a".into());
        let second = map.add_marker(point(2.0), "b".into());

        assert_ne!(first, second);
        assert_eq!(map.markers().len(), 2);
        assert!(!map.markers()[0].popup_open);
        assert!(map.markers()[1].popup_open);
    }

    #[test]
    fn test_markers_replace() {
        let mut map = surface(MarkerPolicy::Replace);
        map.add_marker(point(1.0), "a".into());
        let id = map.add_marker(point(2.0), "b".into());

        assert_eq!(map.markers().len(), 1);
        assert_eq!(map.markers()[0].id, id);
        assert_eq!(map.markers()[0].popup, "b");
    }

    #[test]
    fn test_set_view() {
        let mut map = surface(MarkerPolicy::Accumulate);
        map.set_view(point(48.0), 10);
        assert_eq!(map.view().center, point(48.0));
        assert_eq!(map.view().zoom, 10);
    }

    #[test]
    fn test_tile_layers() {
        let light = TileLayerKind::Light.layer();
        let dark = TileLayerKind::Dark.layer();
        assert!(light.url_template.contains("voyager_labels_under"));
        assert!(dark.url_template.contains("dark_all"));
        assert_eq!(dark.subdomains, "abcd");
        assert_eq!(light.max_zoom, 19);
    }
}
