//! Site-wide settings from `data/site.json`

use serde::Deserialize;

/// Title, about text, copyright holder and the SPARQL query the exhibit was built from
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteInfo {
    #[serde(deserialize_with = "super::null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub about: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub copyright: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub sparql: String,
}
