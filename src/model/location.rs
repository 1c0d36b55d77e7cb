//! Place index from `data/location_information.json`

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

/// Link from a place back to an entity that mentions it
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct EntityPropertyRef {
    #[serde(deserialize_with = "super::null_as_default")]
    pub property_name: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub entity_id: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub entity_name: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct LocationInfo {
    #[serde(deserialize_with = "super::null_as_default")]
    pub label: String,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub entity_properties: Vec<EntityPropertyRef>,
}

/// Places keyed by id, kept in file order
#[derive(Debug, Clone, Default)]
pub struct LocationIndex {
    pub places: Vec<(String, LocationInfo)>,
}

impl<'de> Deserialize<'de> for LocationIndex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        let places = map
            .into_iter()
            .filter_map(|(id, value)| match serde_json::from_value::<LocationInfo>(value) {
                Ok(info) => Some((id, info)),
                Err(e) => {
                    warn!("Skipping malformed location {}: {}", id, e);
                    None
                }
            })
            .collect();
        Ok(Self { places })
    }
}
