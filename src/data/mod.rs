//! Access to the pre-generated exhibit data files
//!
//! All resources live relative to one base: a local directory (the built
//! site's `public/` folder) or an `http(s)://` URL where it is deployed.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::{validate_resource_name, AppError};
use crate::http::client_with_timeout;
use crate::model::{Entity, EntitySummary, LocationIndex, SearchDocument, SiteInfo};

pub const SITE_INFO: &str = "data/site.json";
pub const SEARCH_INDEX: &str = "data/search_index.json";
pub const DEFAULT_LIST: &str = "entity_list";
pub const LOCATION_INFORMATION: &str = "data/location_information.json";
pub const VERSION_FILES: [&str; 2] = ["LATEST_VERSION.txt", "LATEST_VERSION"];

/// Where the data files are read from
#[derive(Debug, Clone)]
pub enum DataSource {
    Local(PathBuf),
    Remote { base: Url, client: Client },
}

impl DataSource {
    /// Interpret `base` as a URL when it has an http(s) scheme, else as a directory
    pub fn from_base(base: &str, timeout: Duration) -> Result<Self, AppError> {
        if base.starts_with("http://") || base.starts_with("https://") {
            let with_slash = if base.ends_with('/') {
                base.to_string()
            } else {
                format!("{}/", base)
            };
            let base = Url::parse(&with_slash)
                .map_err(|e| AppError::Config(format!("Invalid data URL '{}': {}", base, e)))?;
            Ok(DataSource::Remote {
                base,
                client: client_with_timeout(timeout)?,
            })
        } else {
            Ok(DataSource::Local(PathBuf::from(base)))
        }
    }

    /// Human-readable location of a resource
    pub fn locate(&self, relative: &str) -> String {
        match self {
            DataSource::Local(root) => root.join(relative).display().to_string(),
            DataSource::Remote { base, .. } => base
                .join(relative)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| format!("{}{}", base, relative)),
        }
    }

    async fn read_text(&self, relative: &str) -> Result<String, AppError> {
        match self {
            DataSource::Local(root) => {
                let path = root.join(relative);
                debug!("Reading {}", path.display());
                tokio::fs::read_to_string(&path).await.map_err(|e| match e.kind() {
                    std::io::ErrorKind::NotFound => AppError::NotFound(path.display().to_string()),
                    _ => AppError::FetchFailed(format!("{}: {}", path.display(), e)),
                })
            }
            DataSource::Remote { base, client } => {
                let url = base
                    .join(relative)
                    .map_err(|e| AppError::InvalidInput(format!("{}: {}", relative, e)))?;
                debug!("Fetching {}", url);

                let response = client.get(url.clone()).send().await?;
                let status = response.status();
                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(AppError::NotFound(url.to_string()));
                }
                if !status.is_success() {
                    return Err(AppError::FetchFailed(format!(
                        "HTTP {} from {}: {}",
                        status,
                        url,
                        response.text().await.unwrap_or_default()
                    )));
                }
                Ok(response.text().await?)
            }
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, relative: &str) -> Result<T, AppError> {
        let text = self.read_text(relative).await?;
        serde_json::from_str(&text)
            .map_err(|e| AppError::ParseFailed(format!("{}: {}", self.locate(relative), e)))
    }

    pub async fn site_info(&self) -> Result<SiteInfo, AppError> {
        self.read_json(SITE_INFO).await
    }

    /// Search documents; rows without a usable id are skipped
    pub async fn search_index(&self) -> Result<Vec<SearchDocument>, AppError> {
        let rows: Vec<Value> = self.read_json(SEARCH_INDEX).await?;
        let total = rows.len();
        let documents: Vec<SearchDocument> = rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value::<SearchDocument>(row) {
                Ok(doc) => Some(doc),
                Err(e) => {
                    warn!("Skipping search index row: {}", e);
                    None
                }
            })
            .collect();
        debug!("Loaded {} of {} search documents", documents.len(), total);
        Ok(documents)
    }

    /// Gallery rows from `data/<name>.json`, `entity_list` by default
    pub async fn entity_list(&self, name: Option<&str>) -> Result<Vec<EntitySummary>, AppError> {
        let name = name.unwrap_or(DEFAULT_LIST);
        validate_resource_name(name)?;
        self.read_json(&format!("data/{}.json", name)).await
    }

    pub async fn entity(&self, id: &str) -> Result<Entity, AppError> {
        validate_resource_name(id)?;
        self.read_json(&entity_path(id)).await
    }

    pub async fn location_information(&self) -> Result<LocationIndex, AppError> {
        self.read_json(LOCATION_INFORMATION).await
    }

    /// Version banner, best effort
    pub async fn latest_version(&self) -> Option<String> {
        for file in VERSION_FILES {
            match self.read_text(file).await {
                Ok(text) if !text.trim().is_empty() => return Some(text.trim().to_string()),
                Ok(_) => continue,
                Err(e) => debug!("No version banner at {}: {}", file, e),
            }
        }
        None
    }
}

/// Relative path of an entity record
pub fn entity_path(id: &str) -> String {
    format!("data/{}.json", id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn source_with(files: &[(&str, &str)]) -> (TempDir, DataSource) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        for (path, content) in files {
            fs::write(dir.path().join(path), content).unwrap();
        }
        let source = DataSource::Local(dir.path().to_path_buf());
        (dir, source)
    }

    #[test]
    fn test_from_base() {
        let local = DataSource::from_base("./public", Duration::from_secs(5)).unwrap();
        assert!(matches!(local, DataSource::Local(_)));

        let remote = DataSource::from_base("https://example.org/exhibit", Duration::from_secs(5)).unwrap();
        assert_eq!(remote.locate("data/site.json"), "https://example.org/exhibit/data/site.json");
    }

    #[tokio::test]
    async fn test_site_info() {
        let (_dir, source) = source_with(&[(SITE_INFO, r#"{"title": "Students", "copyright": "Library"}"#)]);
        let site = source.site_info().await.unwrap();
        assert_eq!(site.title, "Students");
        assert_eq!(site.copyright, "Library");
    }

    #[tokio::test]
    async fn test_search_index_skips_bad_rows() {
        let (_dir, source) = source_with(&[(
            SEARCH_INDEX,
            r#"[{"id": "Q1", "Label": "Ann"}, {"Label": "no id"}, {"id": 7, "Label": "Bob"}]"#,
        )]);
        let docs = source.search_index().await.unwrap();
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["Q1", "7"]);
    }

    #[tokio::test]
    async fn test_entity_list_named_and_default() {
        let (_dir, source) = source_with(&[
            ("data/entity_list.json", r#"[{"id": "Q1", "label": "Ann Lee"}]"#),
            ("data/faculty.json", r#"[{"id": "Q2", "label": "Bob Ray"}, {"id": "Q3", "label": "Cy Young"}]"#),
        ]);
        assert_eq!(source.entity_list(None).await.unwrap().len(), 1);
        assert_eq!(source.entity_list(Some("faculty")).await.unwrap().len(), 2);
        assert!(matches!(
            source.entity_list(Some("../etc")).await,
            Err(AppError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_entity_errors() {
        let (_dir, source) = source_with(&[("data/Q9.json", "{not json")]);
        assert!(matches!(source.entity("Q1").await, Err(AppError::NotFound(_))));
        assert!(matches!(source.entity("Q9").await, Err(AppError::ParseFailed(_))));
    }

    #[tokio::test]
    async fn test_latest_version_fallback() {
        let (_dir, source) = source_with(&[("LATEST_VERSION", "v12 - 2024-05-01\n")]);
        assert_eq!(source.latest_version().await.as_deref(), Some("v12 - 2024-05-01"));

        let (_dir, empty) = source_with(&[]);
        assert_eq!(empty.latest_version().await, None);
    }

    #[tokio::test]
    async fn test_location_information() {
        let (_dir, source) = source_with(&[(
            LOCATION_INFORMATION,
            r#"{"Q100": {"label": "New Haven", "lat": 41.3, "long": -72.9, "entity_properties": []}}"#,
        )]);
        let index = source.location_information().await.unwrap();
        assert_eq!(index.places.len(), 1);
    }
}
