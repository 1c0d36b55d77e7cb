//! Markdown rendering of every exhibit route
//!
//! Renderers are pure functions over loaded data. The session decides what
//! is loaded; a view only turns it into text for the terminal.

pub mod entity;
pub mod map;
pub mod people;
pub mod search;
pub mod site;

use crate::error::AppError;
use crate::model::{Entity, EntitySummary, ImageInfo, SiteInfo, Status};
use crate::properties::LocatedPlace;
use crate::router::Route;
use crate::search::SearchEngine;

/// Session-local presentation toggles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Show the property key under each property name
    pub show_property_info: bool,
    /// Mark new, updated and removed content
    pub show_changes: bool,
}

impl DisplayOptions {
    pub fn toggle_property_info(&mut self) -> bool {
        self.show_property_info = !self.show_property_info;
        self.show_property_info
    }

    pub fn toggle_changes(&mut self) -> bool {
        self.show_changes = !self.show_changes;
        self.show_changes
    }

    /// ` [status-new]` style suffix, empty unless change highlights are on
    pub fn status_marker(&self, status: Option<&Status>) -> String {
        match status {
            Some(status) if self.show_changes => format!(" `[status-{}]`", status.as_str()),
            _ => String::new(),
        }
    }
}

/// Loaded content for one route
#[derive(Clone)]
pub enum Page {
    Home,
    About,
    News,
    People(Vec<EntitySummary>),
    Entity(Box<Entity>),
    Map(Vec<LocatedPlace>),
    /// The engine is absent when there is no term to run
    Search {
        term: Option<String>,
        engine: Option<SearchEngine>,
    },
    /// Shown while data is missing, including after a failed load
    Loading(Route),
}

/// Site-wide chrome around every page
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub site: &'a SiteInfo,
    pub version: Option<&'a str>,
    pub year: i32,
}

/// Header, page body and footer as one Markdown document
pub fn render(page: &Page, frame: &Frame<'_>, options: DisplayOptions) -> Result<String, AppError> {
    let body = render_body(page, frame.site, options)?;
    Ok(format!(
        "{}\n{}\n{}",
        site::header(frame.site, frame.version),
        body.trim_end(),
        site::footer(&frame.site.copyright, frame.year, options)
    ))
}

/// Page body without the site chrome
pub fn render_body(page: &Page, site_info: &SiteInfo, options: DisplayOptions) -> Result<String, AppError> {
    let body = match page {
        Page::Home => site::home(),
        Page::About => site::about(site_info),
        Page::News => site::news(),
        Page::People(entities) => people::render(entities, options),
        Page::Entity(entity) => entity::render(entity, options),
        Page::Map(places) => map::render(places),
        Page::Search { term, engine } => match (term, engine) {
            (Some(term), Some(engine)) => {
                let outcome = engine.search(term)?;
                search::render(Some(term), Some(&outcome))
            }
            _ => search::render(term.as_deref(), None),
        },
        Page::Loading(route) => loading(route),
    };
    Ok(body)
}

fn loading(route: &Route) -> String {
    match route {
        Route::Map => "Loading...\n".to_string(),
        _ => "# Loading\n".to_string(),
    }
}

/// Markdown for Commons media: images inline, videos as links
pub(crate) fn media_lines(name: Option<&str>, image_info: &[ImageInfo]) -> Vec<String> {
    let alt = name.unwrap_or("CommonsImage");
    image_info
        .iter()
        .filter_map(|info| {
            let url = info.url.as_deref()?;
            let mime = info.mime.as_deref().unwrap_or_default();
            if mime.starts_with("image") {
                Some(format!("![{}]({})", alt, url))
            } else if mime.starts_with("video") || mime.starts_with("application/ogg") {
                Some(format!("[video: {}]({})", alt, url))
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_marker_follows_toggle() {
        let mut options = DisplayOptions::default();
        assert_eq!(options.status_marker(Some(&Status::New)), "");
        assert!(options.toggle_changes());
        assert_eq!(options.status_marker(Some(&Status::New)), " `[status-new]`");
        assert_eq!(options.status_marker(None), "");
        assert!(!options.toggle_changes());
    }

    #[test]
    fn test_media_lines() {
        let info = vec![
            ImageInfo {
                url: Some("https://img/a.jpg".to_string()),
                mime: Some("image/jpeg".to_string()),
                name: None,
            },
            ImageInfo {
                url: Some("https://img/b.webm".to_string()),
                mime: Some("video/webm".to_string()),
                name: None,
            },
            ImageInfo {
                url: None,
                mime: Some("image/png".to_string()),
                name: None,
            },
            ImageInfo {
                url: Some("https://img/c.pdf".to_string()),
                mime: Some("application/pdf".to_string()),
                name: None,
            },
        ];
        assert_eq!(
            media_lines(Some("Portrait"), &info),
            vec!["![Portrait](https://img/a.jpg)", "[video: Portrait](https://img/b.webm)"]
        );
    }

    #[test]
    fn test_loading_states() {
        let site = SiteInfo::default();
        let options = DisplayOptions::default();
        let entity = render_body(&Page::Loading(Route::Entity { id: "Q1".to_string(), list: None }), &site, options)
            .unwrap();
        assert_eq!(entity, "# Loading\n");
        let map = render_body(&Page::Loading(Route::Map), &site, options).unwrap();
        assert_eq!(map, "Loading...\n");
    }

    #[test]
    fn test_render_wraps_chrome() {
        let site = SiteInfo {
            title: "Early Students".to_string(),
            copyright: "Library".to_string(),
            ..Default::default()
        };
        let frame = Frame {
            site: &site,
            version: None,
            year: 2024,
        };
        let page = render(&Page::About, &frame, DisplayOptions::default()).unwrap();
        assert!(page.starts_with("[Early Students](/)"));
        assert!(page.contains("# About"));
        assert!(page.contains("© 2024 Library • All Rights Reserved"));
    }
}
