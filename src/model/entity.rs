//! Entity records and their typed property values
//!
//! Property values arrive as duck-typed JSON objects discriminated by a
//! `value-type` string. They are read through a permissive [`RawValue`] and
//! converted once into the [`ValueKind`] tagged union, so every consumer
//! dispatches with an exhaustive `match`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// Change status attached by the site comparison step
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Status {
    New,
    Updated,
    Removed,
    Other(String),
}

impl From<String> for Status {
    fn from(value: String) -> Self {
        match value.as_str() {
            "new" => Status::New,
            "updated" => Status::Updated,
            "removed" => Status::Removed,
            _ => Status::Other(value),
        }
    }
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::New => "new",
            Status::Updated => "updated",
            Status::Removed => "removed",
            Status::Other(s) => s,
        }
    }
}

/// Label metadata for a property key
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PropertyMeta {
    pub label: Option<String>,
}

/// A named, possibly multi-valued attribute of an entity
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Property {
    #[serde(deserialize_with = "super::null_as_default")]
    pub key: String,
    label: Option<String>,
    property: Option<PropertyMeta>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub values: Vec<PropertyValue>,
    pub status: Option<Status>,
}

impl Property {
    pub fn new(key: &str, label: &str, values: Vec<PropertyValue>) -> Self {
        Self {
            key: key.to_string(),
            label: Some(label.to_string()),
            property: None,
            values,
            status: None,
        }
    }

    /// Display label: explicit label, then the property metadata label, then the key
    pub fn label(&self) -> &str {
        self.label
            .as_deref()
            .or_else(|| self.property.as_ref().and_then(|p| p.label.as_deref()))
            .unwrap_or(&self.key)
    }

    pub fn first_value(&self) -> Option<&PropertyValue> {
        self.values.first()
    }

    /// `value-type` of the first value, which drives sorting and map extraction
    pub fn first_value_type(&self) -> Option<&str> {
        self.first_value().map(PropertyValue::value_type)
    }

    /// True when the key or the display label equals `key_or_label`
    pub fn is(&self, key: &str, label: &str) -> bool {
        self.key == key || self.label() == label
    }
}

/// Media file metadata resolved from Wikimedia Commons
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImageInfo {
    pub url: Option<String>,
    pub mime: Option<String>,
    pub name: Option<String>,
}

/// Nested data for an entity referenced from a property value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LinkedEntity {
    pub label: Option<String>,
    #[serde(deserialize_with = "ordered_properties")]
    pub properties: Vec<Property>,
}

impl LinkedEntity {
    pub fn property(&self, key: &str, label: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.is(key, label))
    }
}

/// Type-specific payload of a property value
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    String { text: Option<String> },
    MonolingualText { text: Option<String> },
    WikibaseForm { id: Option<String>, text: Option<String> },
    Time { text: Option<String> },
    Url { text: Option<String> },
    ExternalId { text: Option<String> },
    Quantity { amount: String, unit: Option<String> },
    GlobeCoordinate { latitude: f64, longitude: f64 },
    WikibaseItem { id: Option<String>, text: Option<String> },
    WikibaseProperty { id: Option<String>, text: Option<String> },
    CommonsMedia { name: Option<String>, image_info: Vec<ImageInfo> },
    GeoShape { name: Option<String> },
    /// Unrecognized type, or a known type whose payload was unusable
    Unknown { value_type: String, text: Option<String> },
}

/// One value of a property with its qualifiers and references
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawValue")]
pub struct PropertyValue {
    pub kind: ValueKind,
    /// Linked entity data for item/form/property values
    pub data: Option<LinkedEntity>,
    pub qualifiers: Vec<Property>,
    pub references: Vec<Vec<Property>>,
}

impl PropertyValue {
    pub fn new(kind: ValueKind) -> Self {
        Self {
            kind,
            data: None,
            qualifiers: Vec::new(),
            references: Vec::new(),
        }
    }

    /// Shorthand for a plain string value
    pub fn text(text: &str) -> Self {
        Self::new(ValueKind::String {
            text: Some(text.to_string()),
        })
    }

    /// The `value-type` discriminant as written in the data files
    pub fn value_type(&self) -> &str {
        match &self.kind {
            ValueKind::String { .. } => "string",
            ValueKind::MonolingualText { .. } => "monolingualtext",
            ValueKind::WikibaseForm { .. } => "wikibase-form",
            ValueKind::Time { .. } => "time",
            ValueKind::Url { .. } => "url",
            ValueKind::ExternalId { .. } => "external-id",
            ValueKind::Quantity { .. } => "quantity",
            ValueKind::GlobeCoordinate { .. } => "globe-coordinate",
            ValueKind::WikibaseItem { .. } => "wikibase-item",
            ValueKind::WikibaseProperty { .. } => "wikibase-property",
            ValueKind::CommonsMedia { .. } => "commonsMedia",
            ValueKind::GeoShape { .. } => "geo-shape",
            ValueKind::Unknown { value_type, .. } => value_type,
        }
    }

    /// Text payload, if the variant carries one
    pub fn text_value(&self) -> Option<&str> {
        match &self.kind {
            ValueKind::String { text }
            | ValueKind::MonolingualText { text }
            | ValueKind::WikibaseForm { text, .. }
            | ValueKind::Time { text }
            | ValueKind::Url { text }
            | ValueKind::ExternalId { text }
            | ValueKind::WikibaseItem { text, .. }
            | ValueKind::WikibaseProperty { text, .. }
            | ValueKind::Unknown { text, .. } => text.as_deref(),
            ValueKind::Quantity { amount, .. } => Some(amount),
            ValueKind::CommonsMedia { name, .. } | ValueKind::GeoShape { name } => name.as_deref(),
            ValueKind::GlobeCoordinate { .. } => None,
        }
    }

    /// `(latitude, longitude)` for globe-coordinate values
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match self.kind {
            ValueKind::GlobeCoordinate {
                latitude,
                longitude,
            } => Some((latitude, longitude)),
            _ => None,
        }
    }

    pub fn is_globe_coordinate(&self) -> bool {
        self.value_type() == "globe-coordinate"
    }
}

/// Wire shape of a property value before dispatch on `value-type`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawValue {
    #[serde(rename = "value-type")]
    value_type: Option<String>,
    id: Option<String>,
    text: Option<String>,
    amount: Option<Value>,
    unit: Option<LinkedEntity>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    data: Option<LinkedEntity>,
    name: Option<String>,
    #[serde(rename = "image-info")]
    image_info: Option<Vec<ImageInfo>>,
    qualifiers: Vec<Property>,
    references: Vec<Vec<Property>>,
}

impl From<RawValue> for PropertyValue {
    fn from(raw: RawValue) -> Self {
        let value_type = raw.value_type.unwrap_or_default();
        let kind = match value_type.as_str() {
            "string" => ValueKind::String { text: raw.text },
            "monolingualtext" => ValueKind::MonolingualText { text: raw.text },
            "wikibase-form" => ValueKind::WikibaseForm {
                id: raw.id,
                text: raw.text,
            },
            "time" => ValueKind::Time { text: raw.text },
            "url" => ValueKind::Url { text: raw.text },
            "external-id" => ValueKind::ExternalId { text: raw.text },
            "quantity" => match raw.amount {
                Some(Value::String(amount)) => ValueKind::Quantity {
                    amount,
                    unit: raw.unit.and_then(|u| u.label),
                },
                Some(Value::Number(amount)) => ValueKind::Quantity {
                    amount: amount.to_string(),
                    unit: raw.unit.and_then(|u| u.label),
                },
                _ => ValueKind::Unknown {
                    value_type: value_type.clone(),
                    text: raw.text,
                },
            },
            "globe-coordinate" => match (raw.latitude, raw.longitude) {
                (Some(latitude), Some(longitude)) => ValueKind::GlobeCoordinate {
                    latitude,
                    longitude,
                },
                _ => ValueKind::Unknown {
                    value_type: value_type.clone(),
                    text: raw.text,
                },
            },
            "wikibase-item" => ValueKind::WikibaseItem {
                id: raw.id,
                text: raw.text,
            },
            "wikibase-property" => ValueKind::WikibaseProperty {
                id: raw.id,
                text: raw.text,
            },
            "commonsMedia" | "commons-media" => ValueKind::CommonsMedia {
                name: raw.name,
                image_info: raw.image_info.unwrap_or_default(),
            },
            "geo-shape" => ValueKind::GeoShape { name: raw.name },
            _ => ValueKind::Unknown {
                value_type: value_type.clone(),
                text: raw.text,
            },
        };

        PropertyValue {
            kind,
            data: raw.data,
            qualifiers: raw.qualifiers,
            references: raw.references,
        }
    }
}

/// Read a JSON object of properties keeping file order
///
/// Entries that are null or malformed are skipped with a warning.
pub(crate) fn ordered_properties<'de, D>(deserializer: D) -> Result<Vec<Property>, D::Error>
where
    D: Deserializer<'de>,
{
    let map = Option::<serde_json::Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default();

    Ok(map
        .into_iter()
        .filter_map(|(key, value)| match serde_json::from_value::<Property>(value) {
            Ok(mut property) => {
                if property.key.is_empty() {
                    property.key = key;
                }
                Some(property)
            }
            Err(e) => {
                warn!("Skipping malformed property {}: {}", key, e);
                None
            }
        })
        .collect())
}

/// A publication row attached to an entity
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Publication {
    pub title: Option<String>,
    pub date: Option<String>,
    pub link: Option<String>,
    pub journal: Option<String>,
    pub role: Option<String>,
    pub authors: Option<String>,
}

/// Full entity record from `data/<id>.json`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Entity {
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: String,
    pub label: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "ordered_properties")]
    pub properties: Vec<Property>,
    pub publications: Option<Vec<Publication>>,
    pub publications_markdown: Option<String>,
    pub biography_markdown: Option<String>,
    pub label_status: Option<Status>,
    pub description_status: Option<Status>,
    pub biography_markdown_status: Option<Status>,
    pub publications_status: Option<Status>,
}

impl Entity {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }

    /// Biography with its first `##` heading demoted so it nests under the page title
    pub fn adjusted_biography(&self) -> Option<String> {
        super::non_empty(&self.biography_markdown).map(|md| md.replacen("##", "####", 1))
    }
}

/// Row of `data/entity_list.json`: enough to draw a gallery card
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EntitySummary {
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: String,
    pub label: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "ordered_properties")]
    pub properties: Vec<Property>,
    pub status: Option<Status>,
}

impl EntitySummary {
    /// Label for the card; entities without one fall back to their id
    pub fn label(&self) -> &str {
        super::non_empty(&self.label).unwrap_or(&self.id)
    }
}
