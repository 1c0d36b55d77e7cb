//! Geocoordinate extraction and map framing
//!
//! Entity pages show the entity's own coordinates as primary markers. When
//! it has none, coordinates of linked entities (places of birth, schools)
//! become secondary markers. The full map lists every place with the
//! entities that reference it.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use crate::model::{Entity, LocationIndex, Property};

use super::order::compare_by_property_then_surname;

/// The canonical coordinate property
pub const COORDINATE_LOCATION: (&str, &str) = ("P625", "coordinate location");

/// Centre used when there is nothing to show
pub const DEFAULT_CENTER: (f64, f64) = (41.31755569862629, -72.92211258237327);

/// Zoom used for a single point, and the ceiling after fitting bounds
pub const MAX_ZOOM: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    /// Large icon with its popup opened
    Primary,
    /// Regular icon with a hover tooltip
    Secondary,
}

/// A point to draw on an entity map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPlace {
    pub lat: f64,
    pub long: f64,
    pub title: String,
    pub label: String,
    pub value: Option<String>,
    pub marker: Marker,
}

impl MapPlace {
    /// Popup body for primary markers
    pub fn popup(&self) -> Option<&str> {
        match self.marker {
            Marker::Primary => self.value.as_deref(),
            Marker::Secondary => None,
        }
    }

    /// Tooltip text for secondary markers
    pub fn tooltip(&self) -> Option<String> {
        match (self.marker, &self.value) {
            (Marker::Secondary, Some(value)) => Some(format!("{}: {}", self.label, value)),
            (Marker::Secondary, None) => Some(format!("{}:", self.label)),
            (Marker::Primary, _) => None,
        }
    }
}

fn is_coordinate_location(property: &Property) -> bool {
    property.is(COORDINATE_LOCATION.0, COORDINATE_LOCATION.1)
}

/// Properties whose first value is a usable globe coordinate
fn coordinate_properties(properties: &[Property]) -> impl Iterator<Item = (&Property, (f64, f64))> {
    properties.iter().filter_map(|property| {
        let value = property.first_value()?;
        if !value.is_globe_coordinate() {
            return None;
        }
        match value.coordinates() {
            Some(point) => Some((property, point)),
            None => {
                debug!("Skipping {} without latitude/longitude", property.key);
                None
            }
        }
    })
}

/// Map points for an entity page
pub fn extract_places(entity: &Entity) -> Vec<MapPlace> {
    let primary: Vec<MapPlace> = coordinate_properties(&entity.properties)
        .map(|(property, (lat, long))| {
            let title = if is_coordinate_location(property) {
                entity.label().to_string()
            } else {
                property.label().to_string()
            };
            MapPlace {
                lat,
                long,
                label: "Location of".to_string(),
                value: Some(title.clone()),
                title,
                marker: Marker::Primary,
            }
        })
        .collect();

    if !primary.is_empty() {
        return primary;
    }

    let mut secondary = Vec::new();
    for outer in &entity.properties {
        for value in &outer.values {
            let Some(linked) = &value.data else {
                continue;
            };
            for (property, (lat, long)) in coordinate_properties(&linked.properties) {
                let place = if is_coordinate_location(property) {
                    let linked_label = linked.label.clone().unwrap_or_default();
                    MapPlace {
                        lat,
                        long,
                        title: format!("{}: {}", outer.label(), linked_label),
                        label: outer.label().to_string(),
                        value: Some(linked_label),
                        marker: Marker::Secondary,
                    }
                } else {
                    MapPlace {
                        lat,
                        long,
                        title: property.label().to_string(),
                        label: property.label().to_string(),
                        value: None,
                        marker: Marker::Secondary,
                    }
                };
                secondary.push(place);
            }
        }
    }
    secondary
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

/// Initial map framing for a set of points
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapViewport {
    pub center: (f64, f64),
    pub zoom: u8,
    pub bounds: Option<Bounds>,
}

impl MapViewport {
    /// Fit all points, capping the zoom at [`MAX_ZOOM`]
    pub fn fit(points: &[(f64, f64)]) -> Self {
        if points.len() <= 1 {
            let center = points.first().copied().unwrap_or(DEFAULT_CENTER);
            return Self {
                center,
                zoom: MAX_ZOOM,
                bounds: None,
            };
        }

        let mut bounds = Bounds {
            south: f64::INFINITY,
            west: f64::INFINITY,
            north: f64::NEG_INFINITY,
            east: f64::NEG_INFINITY,
        };
        for &(lat, long) in points {
            bounds.south = bounds.south.min(lat);
            bounds.north = bounds.north.max(lat);
            bounds.west = bounds.west.min(long);
            bounds.east = bounds.east.max(long);
        }

        let span = (bounds.north - bounds.south)
            .max(bounds.east - bounds.west)
            .max(f64::EPSILON);
        let fitted = (360.0 / span).log2().floor().clamp(0.0, MAX_ZOOM as f64) as u8;

        Self {
            center: (
                (bounds.south + bounds.north) / 2.0,
                (bounds.west + bounds.east) / 2.0,
            ),
            zoom: fitted,
            bounds: Some(bounds),
        }
    }

    pub fn for_places(places: &[MapPlace]) -> Self {
        let points: Vec<(f64, f64)> = places.iter().map(|p| (p.lat, p.long)).collect();
        Self::fit(&points)
    }
}

/// One entity line in a full-map popup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupEntry {
    pub property_name: String,
    pub entity_id: String,
    pub entity_name: String,
}

/// A place on the full map with its sorted popup entries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocatedPlace {
    pub id: String,
    pub label: String,
    pub lat: f64,
    pub long: f64,
    pub entries: Vec<PopupEntry>,
}

/// Places of the full map, each with entries sorted by property then surname
pub fn process_locations(index: &LocationIndex) -> Vec<LocatedPlace> {
    index
        .places
        .iter()
        .filter_map(|(id, info)| {
            let (Some(lat), Some(long)) = (info.lat, info.long) else {
                debug!("Skipping location {} without coordinates", id);
                return None;
            };
            let mut entries: Vec<PopupEntry> = info
                .entity_properties
                .iter()
                .map(|r| PopupEntry {
                    property_name: r.property_name.clone(),
                    entity_id: r.entity_id.clone(),
                    entity_name: r.entity_name.clone(),
                })
                .collect();
            entries.sort_by(compare_entries);
            Some(LocatedPlace {
                id: id.clone(),
                label: info.label.clone(),
                lat,
                long,
                entries,
            })
        })
        .collect()
}

fn compare_entries(a: &PopupEntry, b: &PopupEntry) -> Ordering {
    compare_by_property_then_surname(&a.property_name, &a.entity_name, &b.property_name, &b.entity_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WITH_COORDS: &str = r#"{
        "id": "Q1", "label": "Old Campus",
        "properties": {
            "P625": {"key": "P625", "property": {"label": "coordinate location"},
                     "values": [{"value-type": "globe-coordinate", "latitude": 41.3, "longitude": -72.9}]},
            "P31": {"key": "P31", "property": {"label": "instance of"},
                    "values": [{"value-type": "wikibase-item", "text": "building"}]}
        }
    }"#;

    const NESTED: &str = r#"{
        "id": "Q2", "label": "Ann Lee",
        "properties": {
            "P19": {"key": "P19", "property": {"label": "place of birth"},
                    "values": [{"value-type": "wikibase-item", "text": "Hartford",
                                "data": {"label": "Hartford", "properties": {
                                    "P625": {"key": "P625", "property": {"label": "coordinate location"},
                                             "values": [{"value-type": "globe-coordinate", "latitude": 41.76, "longitude": -72.68}]}}}}]},
            "P69": {"key": "P69", "property": {"label": "educated at"},
                    "values": [{"value-type": "wikibase-item", "text": "Yale",
                                "data": {"label": "Yale", "properties": {
                                    "P9": {"key": "P9", "property": {"label": "campus point"},
                                           "values": [{"value-type": "globe-coordinate", "latitude": 41.31, "longitude": -72.92}]}}}}]}
        }
    }"#;

    #[test]
    fn test_primary_places() {
        let entity: Entity = serde_json::from_str(WITH_COORDS).unwrap();
        let places = extract_places(&entity);
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].marker, Marker::Primary);
        assert_eq!(places[0].title, "Old Campus");
        assert_eq!(places[0].label, "Location of");
        assert_eq!(places[0].popup(), Some("Old Campus"));
        assert_eq!(places[0].tooltip(), None);
    }

    #[test]
    fn test_secondary_places_from_linked_entities() {
        let entity: Entity = serde_json::from_str(NESTED).unwrap();
        let places = extract_places(&entity);
        assert_eq!(places.len(), 2);

        assert_eq!(places[0].marker, Marker::Secondary);
        assert_eq!(places[0].title, "place of birth: Hartford");
        assert_eq!(places[0].tooltip().as_deref(), Some("place of birth: Hartford"));

        assert_eq!(places[1].title, "campus point");
        assert_eq!(places[1].value, None);
        assert_eq!(places[1].popup(), None);
    }

    #[test]
    fn test_no_places() {
        let entity: Entity = serde_json::from_str(r#"{"id": "Q3", "properties": {}}"#).unwrap();
        assert!(extract_places(&entity).is_empty());
    }

    #[test]
    fn test_viewport_single_and_empty() {
        let empty = MapViewport::fit(&[]);
        assert_eq!(empty.center, DEFAULT_CENTER);
        assert_eq!(empty.zoom, MAX_ZOOM);
        assert!(empty.bounds.is_none());

        let single = MapViewport::fit(&[(10.0, 20.0)]);
        assert_eq!(single.center, (10.0, 20.0));
        assert_eq!(single.zoom, MAX_ZOOM);
    }

    #[test]
    fn test_viewport_fits_bounds_with_zoom_cap() {
        let close = MapViewport::fit(&[(41.3, -72.9), (41.31, -72.92)]);
        assert_eq!(close.zoom, MAX_ZOOM);
        let bounds = close.bounds.unwrap();
        assert_eq!(bounds.south, 41.3);
        assert_eq!(bounds.west, -72.92);

        let wide = MapViewport::fit(&[(40.0, -100.0), (50.0, 20.0)]);
        assert!(wide.zoom < MAX_ZOOM);
        assert_eq!(wide.center, (45.0, -40.0));
    }

    #[test]
    fn test_process_locations_sorts_entries() {
        let index: LocationIndex = serde_json::from_str(
            r#"{
                "Q100": {"label": "New Haven", "lat": 41.3, "long": -72.9, "entity_properties": [
                    {"property_id": "P69", "property_name": "educated at", "entity_id": "Q2", "entity_name": "Cy Young"},
                    {"property_id": "P19", "property_name": "place of birth", "entity_id": "Q3", "entity_name": "Al Brown"},
                    {"property_id": "P69", "property_name": "educated at", "entity_id": "Q4", "entity_name": "Bo Adams Jr."}
                ]},
                "Q101": {"label": "Nowhere"}
            }"#,
        )
        .unwrap();
        let places = process_locations(&index);
        assert_eq!(places.len(), 1);
        let ids: Vec<&str> = places[0].entries.iter().map(|e| e.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["Q4", "Q2", "Q3"]);
    }
}
