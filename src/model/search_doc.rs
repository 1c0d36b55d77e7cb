//! One row of the precomputed `data/search_index.json` payload

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::AppError;

/// Immutable search record: an id plus the ordered free-form field map
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct SearchDocument {
    pub id: String,
    /// Every field of the source object, `id` included, in file order
    pub fields: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for SearchDocument {
    type Error = AppError;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let id = match fields.get("id") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => {
                return Err(AppError::ParseFailed(
                    "search document without an id".to_string(),
                ))
            }
        };
        Ok(Self { id, fields })
    }
}

impl SearchDocument {
    /// Build a document from `(field, text)` pairs
    #[cfg(test)]
    pub fn from_pairs(id: &str, pairs: &[(&str, &str)]) -> Self {
        let mut fields = Map::new();
        fields.insert("id".to_string(), Value::String(id.to_string()));
        for (name, text) in pairs {
            fields.insert(name.to_string(), Value::String(text.to_string()));
        }
        Self {
            id: id.to_string(),
            fields,
        }
    }

    pub fn label(&self) -> &str {
        self.field_str("Label").unwrap_or(&self.id)
    }

    pub fn description(&self) -> Option<&str> {
        self.field_str("Description")
    }

    fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Scalar texts of a field: a string or number, or one level of array of those
    pub fn field_texts(&self, name: &str) -> Vec<String> {
        self.fields.get(name).map(scalar_texts).unwrap_or_default()
    }
}

/// Flatten a JSON value into comparable texts
pub(crate) fn scalar_texts(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Number(n) => vec![n.to_string()],
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_field_order() {
        let json = r#"{"id": "Q1", "Label": "John Smith", "Description": "A teacher", "AllText": ["a", "b"]}"#;
        let doc: SearchDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.id, "Q1");
        let names: Vec<&str> = doc.fields.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["id", "Label", "Description", "AllText"]);
        assert_eq!(doc.label(), "John Smith");
        assert_eq!(doc.description(), Some("A teacher"));
    }

    #[test]
    fn test_numeric_id() {
        let doc: SearchDocument = serde_json::from_str(r#"{"id": 17, "Label": "x"}"#).unwrap();
        assert_eq!(doc.id, "17");
    }

    #[test]
    fn test_missing_id_is_rejected() {
        assert!(serde_json::from_str::<SearchDocument>(r#"{"Label": "x"}"#).is_err());
    }

    #[test]
    fn test_field_texts() {
        let json = r#"{"id": "Q1", "Years": [1850, "1900", {"x": 1}], "Flag": true}"#;
        let doc: SearchDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.field_texts("Years"), vec!["1850", "1900"]);
        assert!(doc.field_texts("Flag").is_empty());
        assert!(doc.field_texts("Missing").is_empty());
    }
}
