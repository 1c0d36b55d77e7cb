//! Records read from the pre-generated exhibit data files
//!
//! All types deserialize leniently: a missing or malformed payload degrades
//! to an empty slot instead of failing the whole document.

pub mod entity;
pub mod location;
pub mod search_doc;
pub mod site;

pub use entity::{
    Entity, EntitySummary, ImageInfo, Property, PropertyValue, Publication, Status, ValueKind,
};
pub use location::LocationIndex;
pub use search_doc::SearchDocument;
pub use site::SiteInfo;

use serde::{Deserialize, Deserializer};

/// Treat empty strings the way the generated data does: as absent
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Read a field whose explicit `null` means the same as a missing key
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
